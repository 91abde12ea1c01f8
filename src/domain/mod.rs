//!
//! Bound specifications and variable domains.
//!
//! A bound is a function from an index tuple to a number, so the bound of each element of a
//! family may differ. Bounds are created with [greater_than], [greater_equal], [less_than] and
//! [less_equal] from
//! - a constant, used for every element,
//! - a closure `Fn(I) -> f64`, or
//! - a reference to a [Parameter] indexed like the family.
//!
//! Domains are created with a builder-like logic: a bound is turned into a [Domain], which may be
//! combined with an opposite bound and marked as integer, and then passed to
//! [Model::variable](crate::Model::variable) or [Model::parameter](crate::Model::parameter).
//!
//! ```
//! use milpmodel::*;
//! index_set!(FOOD);
//! let mut m = Model::new(Some("diet"));
//! let f_max = m.parameter::<Index<FOOD>,_>(Some("f_max"), greater_equal(0.0));
//! let buy : VariableSet<Index<FOOD>> = m.variable(Some("Buy"), greater_equal(0.0).and(less_equal(&f_max)));
//! let n : VariableSet<()> = m.variable(Some("n"), greater_equal(0).integer());
//! ```
//!
//! The strict variants only document intent. Solvers work with closed bounds, so `greater_than(0)`
//! and `greater_equal(0)` produce the same column.

use std::fmt;
use std::rc::Rc;

use crate::index::IndexTuple;
use crate::parameter::Parameter;

/// A bound as a function of the index tuple.
pub type BoundFn<I> = Rc<dyn Fn(I) -> f64>;

/// Anything that can be turned into a per-element bound.
pub trait IntoBoundFn<I> {
    fn into_bound_fn(self) -> BoundFn<I>;
}

impl<I : IndexTuple> IntoBoundFn<I> for f64 {
    fn into_bound_fn(self) -> BoundFn<I> { Rc::new(move |_| self) }
}

impl<I : IndexTuple> IntoBoundFn<I> for i32 {
    fn into_bound_fn(self) -> BoundFn<I> { let v = self as f64; Rc::new(move |_| v) }
}

impl<I,F> IntoBoundFn<I> for F where I : IndexTuple, F : Fn(I) -> f64 + 'static {
    fn into_bound_fn(self) -> BoundFn<I> { Rc::new(self) }
}

impl<I : IndexTuple> IntoBoundFn<I> for &Parameter<I> {
    fn into_bound_fn(self) -> BoundFn<I> {
        let p = self.clone();
        Rc::new(move |i| p.value(i))
    }
}

impl<I : IndexTuple> IntoBoundFn<I> for Parameter<I> {
    fn into_bound_fn(self) -> BoundFn<I> { Rc::new(move |i| self.value(i)) }
}

//======================================================
// LowerBound / UpperBound
//======================================================

/// Lower bound specification. An empty bound means unbounded below.
pub struct LowerBound<I> {
    value  : Option<BoundFn<I>>,
    strict : bool,
}

/// Upper bound specification. An empty bound means unbounded above.
pub struct UpperBound<I> {
    value  : Option<BoundFn<I>>,
    strict : bool,
}

impl<I> Clone for LowerBound<I> { fn clone(&self) -> Self { LowerBound{ value : self.value.clone(), strict : self.strict } } }
impl<I> Clone for UpperBound<I> { fn clone(&self) -> Self { UpperBound{ value : self.value.clone(), strict : self.strict } } }
impl<I> Default for LowerBound<I> { fn default() -> Self { LowerBound{ value : None, strict : false } } }
impl<I> Default for UpperBound<I> { fn default() -> Self { UpperBound{ value : None, strict : false } } }

impl<I> fmt::Debug for LowerBound<I> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value,self.strict) {
            (None,_) => write!(f,"LowerBound(none)"),
            (Some(_),true) => write!(f,"LowerBound(>)"),
            (Some(_),false) => write!(f,"LowerBound(>=)"),
        }
    }
}

impl<I> fmt::Debug for UpperBound<I> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value,self.strict) {
            (None,_) => write!(f,"UpperBound(none)"),
            (Some(_),true) => write!(f,"UpperBound(<)"),
            (Some(_),false) => write!(f,"UpperBound(<=)"),
        }
    }
}

impl<I : IndexTuple> LowerBound<I> {
    pub fn has_value(&self) -> bool { self.value.is_some() }
    pub fn is_strict(&self) -> bool { self.strict }
    /// Evaluate the bound for one element.
    pub fn eval(&self, i : I) -> Option<f64> { self.value.as_ref().map(|f| f(i)) }

    /// Combine with an upper bound.
    pub fn and(self, upper : UpperBound<I>) -> Domain<I> { Domain{ lower : self, upper, is_integer : false } }
    /// A domain with this bound and integer elements.
    pub fn integer(self) -> Domain<I> { Domain::from(self).integer() }
}

impl<I : IndexTuple> UpperBound<I> {
    pub fn has_value(&self) -> bool { self.value.is_some() }
    pub fn is_strict(&self) -> bool { self.strict }
    pub fn eval(&self, i : I) -> Option<f64> { self.value.as_ref().map(|f| f(i)) }

    /// Combine with a lower bound.
    pub fn and(self, lower : LowerBound<I>) -> Domain<I> { Domain{ lower, upper : self, is_integer : false } }
    pub fn integer(self) -> Domain<I> { Domain::from(self).integer() }
}

/// `x > b`
pub fn greater_than<I : IndexTuple,B : IntoBoundFn<I>>(b : B) -> LowerBound<I> { LowerBound{ value : Some(b.into_bound_fn()), strict : true } }
/// `x >= b`
pub fn greater_equal<I : IndexTuple,B : IntoBoundFn<I>>(b : B) -> LowerBound<I> { LowerBound{ value : Some(b.into_bound_fn()), strict : false } }
/// `x < b`
pub fn less_than<I : IndexTuple,B : IntoBoundFn<I>>(b : B) -> UpperBound<I> { UpperBound{ value : Some(b.into_bound_fn()), strict : true } }
/// `x <= b`
pub fn less_equal<I : IndexTuple,B : IntoBoundFn<I>>(b : B) -> UpperBound<I> { UpperBound{ value : Some(b.into_bound_fn()), strict : false } }

//======================================================
// Domain
//======================================================

/// Lower bound, upper bound and integrality of a family.
pub struct Domain<I> {
    lower      : LowerBound<I>,
    upper      : UpperBound<I>,
    is_integer : bool,
}

impl<I> Clone for Domain<I> {
    fn clone(&self) -> Self { Domain{ lower : self.lower.clone(), upper : self.upper.clone(), is_integer : self.is_integer } }
}

impl<I> fmt::Debug for Domain<I> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("lower",&self.lower)
            .field("upper",&self.upper)
            .field("is_integer",&self.is_integer)
            .finish()
    }
}

impl<I : IndexTuple> Domain<I> {
    pub fn lower(&self) -> &LowerBound<I> { &self.lower }
    pub fn upper(&self) -> &UpperBound<I> { &self.upper }
    pub fn is_integer(&self) -> bool { self.is_integer }
    /// Require integer values.
    pub fn integer(self) -> Domain<I> { Domain{ is_integer : true, ..self } }
}

impl<I : IndexTuple> From<LowerBound<I>> for Domain<I> {
    fn from(lower : LowerBound<I>) -> Domain<I> { Domain{ lower, upper : Default::default(), is_integer : false } }
}

impl<I : IndexTuple> From<UpperBound<I>> for Domain<I> {
    fn from(upper : UpperBound<I>) -> Domain<I> { Domain{ lower : Default::default(), upper, is_integer : false } }
}

impl<I : IndexTuple> From<(LowerBound<I>,UpperBound<I>)> for Domain<I> {
    fn from(v : (LowerBound<I>,UpperBound<I>)) -> Domain<I> { Domain{ lower : v.0, upper : v.1, is_integer : false } }
}

/// No bounds.
pub fn unbounded<I : IndexTuple>() -> Domain<I> { Domain{ lower : Default::default(), upper : Default::default(), is_integer : false } }

/// `x == b`
pub fn equal_to<I : IndexTuple,B : IntoBoundFn<I>>(b : B) -> Domain<I> {
    let f = b.into_bound_fn();
    Domain{ lower : LowerBound{ value : Some(f.clone()), strict : false },
            upper : UpperBound{ value : Some(f), strict : false },
            is_integer : false }
}

/// `lo <= x <= hi`
pub fn in_range<I : IndexTuple,L : IntoBoundFn<I>,U : IntoBoundFn<I>>(lo : L, hi : U) -> Domain<I> {
    greater_equal(lo).and(less_equal(hi))
}

/// Integer `0 <= x <= 1`.
pub fn binary<I : IndexTuple>() -> Domain<I> { in_range(0.0,1.0).integer() }
