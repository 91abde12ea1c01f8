//! The contract between a sealed [Model] and a solver backend: the flattened columns, rows and
//! objective handed to the solver, and the [Solution] handed back.

use crate::error::{ModelError,Result};
use crate::expr::Expr;
use crate::index::IndexTuple;
use crate::model::{Model,Sense};
use crate::variable::{VariableFamily,VariableSet};

/// Bounds of a column or a row.
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum BoundKind {
    /// `(-inf,+inf)`
    Free,
    /// `[lo,+inf)`
    Lower(f64),
    /// `(-inf,hi]`
    Upper(f64),
    /// `[lo,hi]`
    Double(f64,f64),
    /// `[v,v]`
    Fixed(f64),
}

impl BoundKind {
    /// Classify optional bounds. A lower bound that is not below the upper bound gives a fixed
    /// bound at the lower value.
    pub fn from_bounds(lower : Option<f64>, upper : Option<f64>) -> BoundKind {
        match (lower,upper) {
            (None,None)                => BoundKind::Free,
            (Some(l),None)             => BoundKind::Lower(l),
            (None,Some(u))             => BoundKind::Upper(u),
            (Some(l),Some(u)) if l < u => BoundKind::Double(l,u),
            (Some(l),Some(_))          => BoundKind::Fixed(l),
        }
    }

    /// Lower bound, `-inf` if none.
    pub fn lower(&self) -> f64 {
        match self {
            BoundKind::Lower(l) | BoundKind::Double(l,_) | BoundKind::Fixed(l) => *l,
            BoundKind::Free | BoundKind::Upper(_) => f64::NEG_INFINITY,
        }
    }

    /// Upper bound, `+inf` if none.
    pub fn upper(&self) -> f64 {
        match self {
            BoundKind::Upper(u) | BoundKind::Double(_,u) | BoundKind::Fixed(u) => *u,
            BoundKind::Free | BoundKind::Lower(_) => f64::INFINITY,
        }
    }
}

/// A flattened column.
#[derive(Debug,Clone,PartialEq)]
pub struct Column {
    pub name       : String,
    pub bounds     : BoundKind,
    pub is_integer : bool,
}

/// A flattened row. Entries are `(column, coefficient)` with 0-based columns in increasing order.
#[derive(Debug,Clone,PartialEq)]
pub struct Row {
    pub name    : String,
    pub bounds  : BoundKind,
    pub entries : Vec<(usize,f64)>,
}

/// The flattened objective.
#[derive(Debug,Clone,PartialEq)]
pub struct ObjectiveRow {
    pub name     : String,
    pub sense    : Sense,
    pub entries  : Vec<(usize,f64)>,
    pub constant : f64,
}

/// A solver adapter.
pub trait SolverBackend {
    /// Solve a sealed model.
    fn solve(&mut self, model : &Model) -> Result<Solution>;
}

/// Solution status indicator.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum SolutionStatus {
    /// The solution is optimal within tolerances.
    Optimal,
    /// The solution is feasible but not proven optimal, for example when a limit was reached.
    Feasible,
    Infeasible,
    Unbounded,
    /// Nothing is known about the values.
    Unknown,
}

/// Primal values and objective value returned by a solver adapter.
#[derive(Debug,Clone)]
pub struct Solution {
    status    : SolutionStatus,
    primal    : Vec<f64>,
    objective : f64,
}

impl Solution {
    pub fn new(status : SolutionStatus, primal : Vec<f64>, objective : f64) -> Solution {
        Solution{ status, primal, objective }
    }

    pub fn status(&self) -> SolutionStatus { self.status }
    pub fn objective_value(&self) -> f64 { self.objective }
    /// Values of all columns.
    pub fn primal_values(&self) -> &[f64] { self.primal.as_slice() }

    fn family_range<I : IndexTuple>(&self, var : &VariableSet<I>) -> Result<std::ops::Range<usize>> {
        let start = var.start_index()
            .ok_or_else(|| ModelError::NotSealed(format!("variable set `{}` has no columns",var.name())))?;
        let end = start + var.size()?;
        if end > self.primal.len() {
            Err(ModelError::InvalidIndex(format!("variable set `{}` is outside the solution ({} values)",var.name(),self.primal.len())))
        }
        else {
            Ok(start..end)
        }
    }

    /// Values of a variable family in row-major order.
    pub fn primal<I : IndexTuple>(&self, var : &VariableSet<I>) -> Result<Vec<f64>> {
        Ok(self.primal[self.family_range(var)?].to_vec())
    }

    /// Values of a variable family with their index tuples, in row-major order.
    pub fn values<I : IndexTuple>(&self, var : &VariableSet<I>) -> Result<Vec<(I,f64)>> {
        let range = self.family_range(var)?;
        Ok(var.indices()?.into_iter().zip(self.primal[range].iter().copied()).collect())
    }

    /// Call `f` with each index tuple of a family and its value.
    pub fn for_each_value<I,F>(&self, var : &VariableSet<I>, mut f : F) -> Result<()> where I : IndexTuple, F : FnMut(I,f64) {
        self.values(var)?.into_iter().for_each(|(i,v)| f(i,v));
        Ok(())
    }

    /// Value of a single variable.
    pub fn value<I : IndexTuple>(&self, var : &VariableSet<I>, index : I) -> Result<f64> {
        self.evaluate(&var.try_at(index)?)
    }

    /// Value of an expression at the solution.
    pub fn evaluate(&self, e : &Expr) -> Result<f64> {
        e.evaluate(&self.primal)
            .ok_or_else(|| ModelError::InvalidIndex("expression references a column outside the solution".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_kinds() {
        assert_eq!(BoundKind::from_bounds(None,None),BoundKind::Free);
        assert_eq!(BoundKind::from_bounds(Some(1.0),None),BoundKind::Lower(1.0));
        assert_eq!(BoundKind::from_bounds(None,Some(2.0)),BoundKind::Upper(2.0));
        assert_eq!(BoundKind::from_bounds(Some(1.0),Some(2.0)),BoundKind::Double(1.0,2.0));
        assert_eq!(BoundKind::from_bounds(Some(2.0),Some(2.0)),BoundKind::Fixed(2.0));
        assert_eq!(BoundKind::from_bounds(Some(3.0),Some(2.0)),BoundKind::Fixed(3.0));
        assert_eq!(BoundKind::Upper(4.0).lower(),f64::NEG_INFINITY);
        assert_eq!(BoundKind::Lower(4.0).upper(),f64::INFINITY);
        assert_eq!(BoundKind::Fixed(4.0).upper(),4.0);
    }
}
