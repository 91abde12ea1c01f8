//!
//!  File:     diet.rs
//!
//!  Purpose:  The classic diet problem: buy food at minimum cost so that the amount of each
//!            nutrient stays within given limits.
//!
//!  minimize   sum_j cost[j] Buy[j]
//!  such that  n_min[i] <= sum_j amt[i,j] Buy[j] <= n_max[i],   i in NUTR
//!             f_min[j] <= Buy[j] <= f_max[j],                  j in FOOD
//!
extern crate milpmodel;
extern crate milpmodel_highs;

use milpmodel::*;
use milpmodel_highs::Highs;

index_set!(NUTR);
index_set!(FOOD);

fn diet() -> Result<(Model,VariableSet<Index<FOOD>>,Solution),ModelError> {
    let mut m = Model::new(Some("diet"));

    let nutr = ["A","B1","B2","C"];
    let food = ["BEEF","CHK","FISH","HAM","MCH","MTL","SPG","TUR"];
    m.add_labels::<NUTR,_>(nutr)?;
    m.add_labels::<FOOD,_>(food)?;

    let mut cost  = m.parameter::<Index<FOOD>,_>(Some("cost"),greater_than(0.0));
    let     f_min = m.parameter::<Index<FOOD>,_>(Some("f_min"),greater_equal(0.0));
    let mut f_max = m.parameter::<Index<FOOD>,_>(Some("f_max"),greater_equal(&f_min));
    let     n_min = m.parameter::<Index<NUTR>,_>(Some("n_min"),greater_equal(0.0));
    let mut n_max = m.parameter::<Index<NUTR>,_>(Some("n_max"),greater_equal(&n_min));
    let mut amt   = m.parameter::<(Index<NUTR>,Index<FOOD>),_>(Some("amt"),greater_equal(0.0));

    let n_min = n_min.with_default(700.0);
    for (&j,c) in food.iter().zip([3.19,2.59,2.29,2.89,1.89,1.99,1.99,2.49]) {
        cost.try_add(j,c)?;
        f_max.try_add(j,100.0)?;
    }
    for &i in nutr.iter() {
        n_max.try_add(i,10000.0)?;
    }
    let table : [(&str,[f64;8]);4] = [
        ("A",  [60.0, 8.0, 8.0,40.0,15.0,70.0,25.0,60.0]),
        ("B1", [20.0, 0.0,10.0,40.0,35.0,30.0,50.0,20.0]),
        ("B2", [10.0,20.0,15.0,35.0,15.0,15.0,25.0,15.0]),
        ("C",  [15.0,20.0,10.0,10.0,15.0,15.0,15.0,10.0])];
    for (i,row) in table.iter() {
        for (&j,&v) in food.iter().zip(row.iter()) {
            amt.try_add((*i,j),v)?;
        }
    }
    for p in [&cost,&f_min,&f_max] { p.check()?; }
    n_min.check()?;
    n_max.check()?;
    amt.check()?;

    let buy : VariableSet<Index<FOOD>> = m.variable(Some("Buy"),in_range(&f_min,&f_max));
    m.seal_data()?;

    m.minimize(Some("Total_Cost"),m.try_sum(|j| Ok(cost.at(j) * buy.try_at(j)?))?);
    m.try_subject_to(Some("Diet"),|i : Index<NUTR>| {
        m.try_sum(|j : Index<FOOD>| Ok(amt.at((i,j)) * buy.try_at(j)?))?
            .try_geq(n_min.at(i))?
            .try_leq(n_max.at(i))
    })?;

    let sol = m.solve(&mut Highs::new())?;
    Ok((m,buy,sol))
}

fn main() {
    let (m,buy,sol) = diet().unwrap();
    println!("Status = {:?}",sol.status());
    println!("Total_Cost = {:.2}",sol.objective_value());
    sol.for_each_value(&buy,|j,v| println!("  Buy[{}] = {:.3}",m.label(j).unwrap(),v)).unwrap();

    assert_eq!(sol.status(),SolutionStatus::Optimal);
    assert_eq!((sol.objective_value()*10.0).round(),882.0);
    for r in m.rows().unwrap() {
        let v = r.entries.iter().map(|&(j,c)| c*sol.primal_values()[j]).sum::<f64>();
        assert!(v >= r.bounds.lower()-1e-6 && v <= r.bounds.upper()+1e-6,"{} = {}",r.name,v);
    }
}

#[test]
#[cfg(test)]
fn test() { main() }
