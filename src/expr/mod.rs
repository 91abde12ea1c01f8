//! Linear expressions.
//!
//! An [Expr] is one of
//! - a constant,
//! - a reference to a single variable,
//! - a variable scaled by a coefficient, or
//! - a weighted sum of variables plus a constant.
//!
//! Arithmetic keeps expressions linear: products and quotients are only legal when one side is a
//! constant, anything else is a [ModelError::NonlinearExpression]. Addition and subtraction always
//! produce a [Sum] (unless both sides are constants), accumulating coefficients of repeated
//! variables.
//!
//! ```
//! use milpmodel::*;
//! let x = Expr::Variable(VariableRef::new(0,0));
//! let y = Expr::Variable(VariableRef::new(0,1));
//! let e = 2.0 * x.clone() + y - x + 5.0;
//! let Expr::Sum(s) = e else { panic!() };
//! assert_eq!(s.coefficient(0), Some(1.0));
//! assert_eq!(s.coefficient(1), Some(1.0));
//! assert_eq!(s.constant(), 5.0);
//! ```

use std::collections::BTreeMap;

pub mod add;
pub mod mul;

/// Reference to one variable: the start offset of its variable set and the offset within the set.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct VariableRef {
    start  : usize,
    offset : usize,
}

impl VariableRef {
    pub fn new(start : usize, offset : usize) -> VariableRef { VariableRef{ start, offset } }
    pub fn start(&self) -> usize { self.start }
    pub fn offset(&self) -> usize { self.offset }
    /// Column of the variable in the flattened model.
    pub fn absolute_index(&self) -> usize { self.start + self.offset }
}

/// A variable with a coefficient.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Term {
    pub variable    : VariableRef,
    pub coefficient : f64,
}

/// Weighted sum of variables plus a constant. Each variable appears at most once, keyed by its
/// absolute column.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct Sum {
    terms    : BTreeMap<usize,Term>,
    constant : f64,
}

impl Sum {
    pub fn new() -> Sum { Default::default() }
    pub fn with_constant(constant : f64) -> Sum { Sum{ terms : BTreeMap::new(), constant } }

    pub fn constant(&self) -> f64 { self.constant }
    /// Terms ordered by absolute column.
    pub fn terms(&self) -> impl Iterator<Item=&Term> { self.terms.values() }
    /// Coefficient of the variable in column `index`, if it appears.
    pub fn coefficient(&self, index : usize) -> Option<f64> { self.terms.get(&index).map(|t| t.coefficient) }
    /// Number of distinct variables.
    pub fn len(&self) -> usize { self.terms.len() }
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub(crate) fn add_term(&mut self, variable : VariableRef, coefficient : f64) {
        self.terms.entry(variable.absolute_index())
            .or_insert(Term{ variable, coefficient : 0.0 })
            .coefficient += coefficient;
    }

    pub(crate) fn scale(&mut self, k : f64) {
        self.terms.values_mut().for_each(|t| t.coefficient *= k);
        self.constant *= k;
    }
}

/// A linear expression.
#[derive(Debug,Clone,PartialEq)]
pub enum Expr {
    Constant(f64),
    Variable(VariableRef),
    Term(Term),
    Sum(Sum),
}

impl From<f64> for Expr { fn from(v : f64) -> Expr { Expr::Constant(v) } }
impl From<i32> for Expr { fn from(v : i32) -> Expr { Expr::Constant(v as f64) } }
impl From<VariableRef> for Expr { fn from(v : VariableRef) -> Expr { Expr::Variable(v) } }
impl From<Term> for Expr { fn from(t : Term) -> Expr { Expr::Term(t) } }
impl From<Sum> for Expr { fn from(s : Sum) -> Expr { Expr::Sum(s) } }

impl Expr {
    pub fn constant(v : f64) -> Expr { Expr::Constant(v) }
    pub fn zero() -> Expr { Expr::Constant(0.0) }

    pub fn is_constant(&self) -> bool { matches!(self,Expr::Constant(_)) }

    pub fn as_constant(&self) -> Option<f64> {
        if let Expr::Constant(v) = self { Some(*v) } else { None }
    }

    /// Promote the expression to a [Sum].
    pub fn into_sum(self) -> Sum {
        match self {
            Expr::Constant(v) => Sum::with_constant(v),
            Expr::Variable(v) => { let mut s = Sum::new(); s.add_term(v,1.0); s },
            Expr::Term(t)     => { let mut s = Sum::new(); s.add_term(t.variable,t.coefficient); s },
            Expr::Sum(s)      => s
        }
    }

    /// Split the expression into `(column, coefficient)` entries, in increasing column order, and
    /// the constant part. Terms with a zero coefficient, for example from `x - x`, are left out.
    pub fn linear_parts(&self) -> (Vec<(usize,f64)>,f64) {
        let (entries,constant) = match self {
            Expr::Constant(v) => (Vec::new(),*v),
            Expr::Variable(v) => (vec![(v.absolute_index(),1.0)],0.0),
            Expr::Term(t)     => (vec![(t.variable.absolute_index(),t.coefficient)],0.0),
            Expr::Sum(s)      => (s.terms().map(|t| (t.variable.absolute_index(),t.coefficient)).collect::<Vec<_>>(),s.constant)
        };
        (entries.into_iter().filter(|&(_,c)| c != 0.0).collect(),constant)
    }

    /// Evaluate the expression at the point `primal`, indexed by absolute column.
    ///
    /// # Returns
    /// `None` if the expression references a column outside `primal`.
    pub fn evaluate(&self, primal : &[f64]) -> Option<f64> {
        match self {
            Expr::Constant(v) => Some(*v),
            Expr::Variable(v) => primal.get(v.absolute_index()).copied(),
            Expr::Term(t)     => primal.get(t.variable.absolute_index()).map(|x| t.coefficient * x),
            Expr::Sum(s)      => s.terms().try_fold(s.constant,|acc,t| primal.get(t.variable.absolute_index()).map(|x| acc + t.coefficient * x))
        }
    }
}
