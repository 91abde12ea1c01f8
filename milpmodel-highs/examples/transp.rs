//!
//!  File:     transp.rs
//!
//!  Purpose:  Transportation problem: ship a product from origins to destinations at minimum
//!            cost, using all supply and meeting all demand.
//!
//!  minimize   sum_{i,j} cost[i,j] Trans[i,j]
//!  such that  sum_j Trans[i,j] = supply[i],   i in ORIG
//!             sum_i Trans[i,j] = demand[j],   j in DEST
//!             Trans >= 0
//!
extern crate milpmodel;
extern crate milpmodel_highs;

use milpmodel::*;
use milpmodel_highs::Highs;

index_set!(ORIG);
index_set!(DEST);

const ORIGINS : [(&str,f64);3] = [("GARY",1400.0),("CLEV",2600.0),("PITT",2900.0)];
const DESTINATIONS : [(&str,f64);7] = [("FRA",900.0),("DET",1200.0),("LAN",600.0),("WIN",400.0),("STL",1700.0),("FRE",1100.0),("LAF",1000.0)];
const COST : [[f64;7];3] = [
    [39.0, 14.0, 11.0, 14.0, 16.0, 82.0,  8.0],
    [27.0,  9.0, 12.0,  9.0, 26.0, 95.0, 17.0],
    [24.0, 14.0, 17.0, 13.0, 28.0, 99.0, 20.0]];

fn main() {
    let mut m = Model::new(Some("transp"));
    m.add_labels::<ORIG,_>(ORIGINS.iter().map(|o| o.0)).unwrap();
    m.add_labels::<DEST,_>(DESTINATIONS.iter().map(|d| d.0)).unwrap();

    let mut supply = m.parameter::<Index<ORIG>,_>(Some("supply"),greater_equal(0.0));
    let mut demand = m.parameter::<Index<DEST>,_>(Some("demand"),greater_equal(0.0));
    let mut cost   = m.parameter::<(Index<ORIG>,Index<DEST>),_>(Some("cost"),greater_equal(0.0));
    ORIGINS.iter().for_each(|&(o,s)| supply.add(o,s));
    DESTINATIONS.iter().for_each(|&(d,v)| demand.add(d,v));
    for (&(o,_),row) in ORIGINS.iter().zip(COST.iter()) {
        for (&(d,_),&c) in DESTINATIONS.iter().zip(row.iter()) {
            cost.add((o,d),c);
        }
    }

    let trans : VariableSet<(Index<ORIG>,Index<DEST>)> = m.variable(Some("Trans"),greater_equal(0.0));
    m.seal_data().unwrap();

    m.minimize(Some("Total_Cost"),m.sum(|(i,j)| cost.at((i,j)) * trans.at((i,j))));
    m.subject_to(Some("Supply"),|i : Index<ORIG>| m.sum(|j : Index<DEST>| trans.at((i,j))).equals(supply.at(i)));
    m.subject_to(Some("Demand"),|j : Index<DEST>| m.sum(|i : Index<ORIG>| trans.at((i,j))).equals(demand.at(j)));

    let sol = m.solve(Highs::new().set_option("presolve","on")).unwrap();
    println!("Status = {:?}",sol.status());
    println!("Total_Cost = {}",sol.objective_value());
    sol.for_each_value(&trans,|(i,j),v| {
        if v > 0.0 {
            println!("  Trans[{},{}] = {}",m.label(i).unwrap(),m.label(j).unwrap(),v);
        }
    }).unwrap();

    assert_eq!(sol.status(),SolutionStatus::Optimal);
    assert!((sol.objective_value() - 196200.0).abs() < 1e-4);

    let pitt = m.index_of::<ORIG>("PITT").unwrap();
    let shipped = sol.evaluate(&m.sum(|j : Index<DEST>| trans.at((pitt,j)))).unwrap();
    assert!((shipped - 2900.0).abs() < 1e-6);
}

#[test]
#[cfg(test)]
fn test() { main() }
