//!
//!  File:     steelt.rs
//!
//!  Purpose:  Multi-period steel production planning with inventories. Demonstrates range
//!            index sets whose upper end is given by data, and moving between the week range
//!            `1..=T` and the inventory range `0..=T`.
//!
//!  maximize   sum_{p,t} revenue[p,t] Sell[p,t] - prodcost[p] Make[p,t] - invcost[p] Inv[p,t]
//!  such that  sum_p (1/rate[p]) Make[p,t] <= avail[t]
//!             Inv[p,0] = inv0[p]
//!             Make[p,t] + Inv[p,t-1] = Sell[p,t] + Inv[p,t]
//!             0 <= Sell[p,t] <= market[p,t]
//!
extern crate milpmodel;
extern crate milpmodel_highs;

use milpmodel::*;
use milpmodel_highs::Highs;

index_set!(PROD);
range_bound!(T);
range_set!(WEEK  = 1 ..= T);
range_set!(WEEK0 = 0 ..= T);

type PW = (Index<PROD>,Index<WEEK>);

fn main() {
    let mut m = Model::new(Some("steelT"));
    m.add_labels::<PROD,_>(["bands","coils"]).unwrap();
    m.set_value::<T>(4).unwrap();

    let mut avail    = m.parameter::<Index<WEEK>,_>(Some("avail"),greater_equal(0.0));
    let mut rate     = m.parameter::<Index<PROD>,_>(Some("rate"),greater_than(0.0));
    let mut inv0     = m.parameter::<Index<PROD>,_>(Some("inv0"),greater_equal(0.0));
    let mut prodcost = m.parameter::<Index<PROD>,_>(Some("prodcost"),greater_equal(0.0));
    let mut invcost  = m.parameter::<Index<PROD>,_>(Some("invcost"),greater_equal(0.0));
    let mut revenue  = m.parameter::<PW,_>(Some("revenue"),greater_equal(0.0));
    let mut market   = m.parameter::<PW,_>(Some("market"),greater_equal(0.0));

    for (t,a) in (1..=4).zip([40.0,40.0,32.0,40.0]) { avail.add(t,a); }
    for (p,r,i,pc,ic) in [("bands",200.0,10.0,10.0,2.5),("coils",140.0,0.0,11.0,3.0)] {
        rate.add(p,r);
        inv0.add(p,i);
        prodcost.add(p,pc);
        invcost.add(p,ic);
    }
    for (p,rev,mkt) in [("bands",[25.0,26.0,27.0,27.0],[6000.0,6000.0,4000.0,6500.0]),
                        ("coils",[30.0,35.0,37.0,39.0],[4000.0,2500.0,3500.0,4200.0])] {
        for (t,(r,k)) in (1..=4).zip(rev.into_iter().zip(mkt)) {
            revenue.add((p,t),r);
            market.add((p,t),k);
        }
    }

    let make : VariableSet<PW>                         = m.variable(Some("Make"),greater_equal(0.0));
    let inv  : VariableSet<(Index<PROD>,Index<WEEK0>)> = m.variable(Some("Inv"),greater_equal(0.0));
    let sell : VariableSet<PW>                         = m.variable(Some("Sell"),in_range(0.0,&market));
    m.seal_data().unwrap();

    let inv_at = |p : Index<PROD>, t : Index<WEEK>| inv.at((p,t.convert::<WEEK0>().unwrap()));

    m.maximize(Some("Total_Profit"),m.sum(|(p,t) : PW|
        revenue.at((p,t)) * sell.at((p,t)) - prodcost.at(p) * make.at((p,t)) - invcost.at(p) * inv_at(p,t)));

    m.subject_to(Some("Time"),|t : Index<WEEK>| m.sum(|p : Index<PROD>| (1.0 / rate.value(p)) * make.at((p,t))).leq(avail.at(t)));
    m.subject_to(Some("Init_Inv"),|p : Index<PROD>| inv.at((p,Index::first())).equals(inv0.at(p)));
    m.subject_to(Some("Balance"),|(p,t) : PW| {
        let prev = t.convert::<WEEK0>().and_then(|t0| t0.prev()).unwrap();
        (make.at((p,t)) + inv.at((p,prev))).equals(sell.at((p,t)) + inv_at(p,t))
    });

    let sol = m.solve(&mut Highs::new()).unwrap();
    println!("Status = {:?}",sol.status());
    println!("Total_Profit = {:.2}",sol.objective_value());
    for (p,t) in m.indices::<PW>().unwrap() {
        println!("  {:>5} week {} : Make {:8.1}  Sell {:8.1}  Inv {:8.1}",
                 m.label(p).unwrap(),t.value(),
                 sol.value(&make,(p,t)).unwrap(),
                 sol.value(&sell,(p,t)).unwrap(),
                 sol.evaluate(&inv_at(p,t)).unwrap());
    }

    assert_eq!(sol.status(),SolutionStatus::Optimal);
    assert_eq!(sol.objective_value().round(),515033.0);
}

#[test]
#[cfg(test)]
fn test() { main() }
