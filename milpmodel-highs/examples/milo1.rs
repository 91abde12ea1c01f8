//!
//!  File:     milo1.rs
//!
//!  Purpose:  Demonstrates how to solve a small mixed
//!            integer linear optimization problem.
//!
//!  The problem:
//!
//!  max       x1 + 0.64 x2
//!  such that 50 x1 + 31 x2 < 250
//!            3 x1 - 2 x2   > -4
//!            x1,x2 ∈ N₊²
//!
extern crate milpmodel;
extern crate milpmodel_highs;

use milpmodel::*;
use milpmodel_highs::Highs;

index_set!(J);

fn milo1() -> (SolutionStatus,Result<Vec<f64>,ModelError>) {
    let a0 = [ 50.0, 31.0 ];
    let a1 = [ 3.0,  -2.0 ];
    let c  = [ 1.0, 0.64 ];

    let mut m = Model::new(Some("milo1"));
    m.add_labels::<J,_>(["x1","x2"]).unwrap();

    let x : VariableSet<Index<J>> = m.variable(Some("x"), greater_equal(0.0).integer());
    m.seal_data().unwrap();

    // Create the constraints
    //      50.0 x[0] + 31.0 x[1] <= 250.0
    //       3.0 x[0] -  2.0 x[1] >= -4.0
    m.constraint(Some("c1"), m.sum(|j : Index<J>| a0[j.raw()] * x.at(j)).leq(250.0));
    m.constraint(Some("c2"), m.sum(|j : Index<J>| a1[j.raw()] * x.at(j)).geq(-4.0));

    // Set the objective function to (c^T * x)
    m.objective(Some("obj"), Sense::Maximize, m.sum(|j : Index<J>| c[j.raw()] * x.at(j)));

    // Solve the problem
    let mut solver = Highs::new();
    solver.set_option("mip_rel_gap",1e-9);
    match m.solve(&mut solver) {
        Ok(sol) => (sol.status(),sol.primal(&x)),
        Err(e)  => (SolutionStatus::Unknown,Err(e))
    }
}

fn main() {
    let (psta,xx) = milo1();
    let xx = xx.unwrap();
    println!("Status = {:?}",psta);
    println!("x = {:?}", xx);
    let x = xx;

    assert_eq!(psta,SolutionStatus::Optimal);
    assert!(50.0 * x[0] + 31.0 * x[1] < 250.0 + 1e-7);
    assert!( 3.0 * x[0] -  2.0 * x[1] > -4.0 - 1e-7);
    assert!((x[0] - 5.0).abs() < 1e-6 && x[1].abs() < 1e-6);
}

#[test]
#[cfg(test)]
fn test() { main() }
