//!
//! Embedded modeling layer for linear (LP) and mixed integer linear (MILP) programs.
//!
//! A model is written with ordinary Rust values and closures:
//! - dimensions are marker types declared with [index_set!], [range_set!] and [range_bound!],
//! - input data are [Parameter]s indexed by tuples of [Index] values,
//! - decision variables are [VariableSet]s,
//! - linear expressions ([Expr]) are combined with the usual operators and aggregated over index
//!   spaces with [Model::sum],
//! - constraints are built with [Expr::leq], [Expr::geq] and [Expr::equals] and added for every
//!   element of an index space with [Model::subject_to].
//!
//! After [Model::seal_data] the model has a fixed column layout and is handed to a
//! [SolverBackend], which returns a [Solution] that maps the values back to the index tuples.
//!
//! # Example
//! ```
//! use milpmodel::*;
//!
//! index_set!(ORIG);
//! index_set!(DEST);
//!
//! let mut m = Model::new(Some("transp"));
//! m.add_labels::<ORIG,_>(["GARY","CLEV"]).unwrap();
//! m.add_labels::<DEST,_>(["FRA","DET","LAN"]).unwrap();
//!
//! let mut supply = m.parameter::<Index<ORIG>,_>(Some("supply"), greater_equal(0.0));
//! supply.add("GARY", 1400.0);
//! supply.add("CLEV", 2600.0);
//!
//! let trans : VariableSet<(Index<ORIG>,Index<DEST>)> = m.variable(Some("Trans"), greater_equal(0.0));
//! m.seal_data().unwrap();
//!
//! m.subject_to(Some("Supply"), |i : Index<ORIG>| m.sum(|j : Index<DEST>| trans.at((i,j))).equals(supply.at(i)));
//!
//! let rows = m.rows().unwrap();
//! assert_eq!(rows[1].name, "Supply[CLEV]");
//! assert_eq!(rows[1].entries, vec![(3,1.0),(4,1.0),(5,1.0)]);
//! assert_eq!(rows[1].bounds, BoundKind::Fixed(2600.0));
//! ```

extern crate itertools;

pub mod error;
pub mod index;
pub mod expr;
pub mod constraint;
pub mod domain;
pub mod parameter;
pub mod variable;
pub mod model;
pub mod solver;
pub mod lpformat;
pub mod utils;

pub use error::ModelError;
pub use index::{Index,IndexTag,RangeTag,RangeBound,IndexTuple,LabelTuple,IntoLabel,IndexRegistry,IndexSet,CompoundIndex,SetKind};
pub use expr::{Expr,VariableRef,Term,Sum};
pub use constraint::Constraint;
pub use domain::{LowerBound,UpperBound,Domain,IntoBoundFn,greater_than,greater_equal,less_than,less_equal,unbounded,equal_to,in_range,binary};
pub use parameter::Parameter;
pub use variable::{VariableSet,VariableFamily};
pub use model::{Model,Sense,NamedConstraint};
pub use solver::{BoundKind,Column,Row,ObjectiveRow,SolverBackend,Solution,SolutionStatus};
