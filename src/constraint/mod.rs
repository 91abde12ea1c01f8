//! Linear constraints: an expression with an optional lower and an optional upper bound.
//!
//! Constraints are built by comparing expressions:
//!
//! ```
//! use milpmodel::*;
//! let x = Expr::Variable(VariableRef::new(0,0));
//! let c = Expr::constant(700.0).leq(x * 60.0).leq(Expr::constant(10000.0));
//! assert_eq!(c.lower(), Some(700.0));
//! assert_eq!(c.upper(), Some(10000.0));
//! ```

use crate::error::{ModelError,Result};
use crate::expr::Expr;

#[derive(Debug,Clone,PartialEq)]
pub struct Constraint {
    expr  : Expr,
    lower : Option<f64>,
    upper : Option<f64>,
}

impl Constraint {
    /// `expr <= value`
    pub fn upper_bounded(expr : Expr, value : f64) -> Constraint { Constraint{ expr, lower : None, upper : Some(value) } }
    /// `value <= expr`
    pub fn lower_bounded(expr : Expr, value : f64) -> Constraint { Constraint{ expr, lower : Some(value), upper : None } }
    /// `expr == value`
    pub fn equal(expr : Expr, value : f64) -> Constraint { Constraint{ expr, lower : Some(value), upper : Some(value) } }
    /// `lower <= expr <= upper`
    pub fn ranged(expr : Expr, lower : f64, upper : f64) -> Constraint { Constraint{ expr, lower : Some(lower), upper : Some(upper) } }

    pub fn expr(&self) -> &Expr { &self.expr }
    pub fn lower(&self) -> Option<f64> { self.lower }
    pub fn upper(&self) -> Option<f64> { self.upper }

    /// Intersect with `expr <= value`. An existing upper bound is only ever tightened.
    pub fn upper_bound(self, value : f64) -> Constraint {
        Constraint{ upper : Some(self.upper.map_or(value,|u| u.min(value))), ..self }
    }

    /// Intersect with `value <= expr`. An existing lower bound is only ever tightened.
    pub fn lower_bound(self, value : f64) -> Constraint {
        Constraint{ lower : Some(self.lower.map_or(value,|l| l.max(value))), ..self }
    }

    /// Chain `constraint <= rhs`. The right hand side must be a constant.
    pub fn try_leq<E>(self, rhs : E) -> Result<Constraint> where E : Into<Expr> {
        match rhs.into() {
            Expr::Constant(v) => Ok(self.upper_bound(v)),
            _ => Err(ModelError::Unsupported("a constraint can only be compared with a constant".to_string()))
        }
    }

    /// Chain `constraint >= rhs`. The right hand side must be a constant.
    pub fn try_geq<E>(self, rhs : E) -> Result<Constraint> where E : Into<Expr> {
        match rhs.into() {
            Expr::Constant(v) => Ok(self.lower_bound(v)),
            _ => Err(ModelError::Unsupported("a constraint can only be compared with a constant".to_string()))
        }
    }

    pub fn leq<E>(self, rhs : E) -> Constraint where E : Into<Expr> { self.try_leq(rhs).unwrap_or_else(|e| panic!("{}",e)) }
    pub fn geq<E>(self, rhs : E) -> Constraint where E : Into<Expr> { self.try_geq(rhs).unwrap_or_else(|e| panic!("{}",e)) }
}

//======================================================
// Comparison of expressions
//======================================================

impl Expr {
    /// Build the constraint `self <= rhs`.
    ///
    /// If one side is a constant it becomes the bound. If both sides are variable the constraint
    /// is `self - rhs <= 0`.
    ///
    /// # Returns
    /// [ModelError::Unsupported] if both sides are constants.
    pub fn try_leq<E>(self, rhs : E) -> Result<Constraint> where E : Into<Expr> {
        match (self,rhs.into()) {
            (Expr::Constant(a),Expr::Constant(b)) => Err(constant_comparison(a,"<=",b)),
            (lhs,Expr::Constant(v)) => Ok(Constraint::upper_bounded(lhs,v)),
            (Expr::Constant(v),rhs) => Ok(Constraint::lower_bounded(rhs,v)),
            (lhs,rhs) => Ok(Constraint::upper_bounded(lhs - rhs,0.0))
        }
    }

    /// Build the constraint `self >= rhs`. See [Expr::try_leq].
    pub fn try_geq<E>(self, rhs : E) -> Result<Constraint> where E : Into<Expr> {
        match (self,rhs.into()) {
            (Expr::Constant(a),Expr::Constant(b)) => Err(constant_comparison(a,">=",b)),
            (lhs,Expr::Constant(v)) => Ok(Constraint::lower_bounded(lhs,v)),
            (Expr::Constant(v),rhs) => Ok(Constraint::upper_bounded(rhs,v)),
            (lhs,rhs) => Ok(Constraint::lower_bounded(lhs - rhs,0.0))
        }
    }

    /// Build the constraint `self == rhs`. If both sides are variable the constraint is
    /// `self - rhs == 0`.
    pub fn try_equals<E>(self, rhs : E) -> Result<Constraint> where E : Into<Expr> {
        match (self,rhs.into()) {
            (Expr::Constant(a),Expr::Constant(b)) => Err(constant_comparison(a,"==",b)),
            (lhs,Expr::Constant(v)) => Ok(Constraint::equal(lhs,v)),
            (Expr::Constant(v),rhs) => Ok(Constraint::equal(rhs,v)),
            (lhs,rhs) => Ok(Constraint::equal(lhs - rhs,0.0))
        }
    }

    pub fn leq<E>(self, rhs : E) -> Constraint where E : Into<Expr> { self.try_leq(rhs).unwrap_or_else(|e| panic!("{}",e)) }
    pub fn geq<E>(self, rhs : E) -> Constraint where E : Into<Expr> { self.try_geq(rhs).unwrap_or_else(|e| panic!("{}",e)) }
    pub fn equals<E>(self, rhs : E) -> Constraint where E : Into<Expr> { self.try_equals(rhs).unwrap_or_else(|e| panic!("{}",e)) }
}

fn constant_comparison(a : f64, op : &str, b : f64) -> ModelError {
    ModelError::Unsupported(format!("comparison of two constants ({} {} {})",a,op,b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::VariableRef;

    fn var(i : usize) -> Expr { Expr::Variable(VariableRef::new(0,i)) }

    #[test]
    fn tightening() {
        let c = Constraint::upper_bounded(var(0),10.0);
        assert_eq!(c.clone().upper_bound(5.0).upper(),Some(5.0));
        assert_eq!(c.clone().upper_bound(20.0).upper(),Some(10.0));
        let c = c.lower_bound(1.0).lower_bound(-3.0);
        assert_eq!(c.lower(),Some(1.0));
        assert_eq!(c.clone().leq(3.0).upper(),Some(3.0));
        assert_eq!(c.geq(2.0).lower(),Some(2.0));
    }

    #[test]
    fn comparisons() {
        let c = var(0).leq(4.0);
        assert_eq!((c.lower(),c.upper()),(None,Some(4.0)));
        let c = Expr::constant(4.0).leq(var(0));
        assert_eq!((c.lower(),c.upper()),(Some(4.0),None));
        let c = var(0).geq(4.0);
        assert_eq!((c.lower(),c.upper()),(Some(4.0),None));
        let c = var(0).equals(2);
        assert_eq!((c.lower(),c.upper()),(Some(2.0),Some(2.0)));

        let c = (var(0) + var(1)).equals(var(2) * 3.0);
        assert_eq!((c.lower(),c.upper()),(Some(0.0),Some(0.0)));
        let Expr::Sum(s) = c.expr() else { panic!("expected sum") };
        assert_eq!(s.coefficient(2),Some(-3.0));

        let c = var(0).leq(var(1));
        assert_eq!(c.upper(),Some(0.0));

        assert!(matches!(Expr::constant(1.0).try_leq(2.0),Err(ModelError::Unsupported(_))));
        assert!(matches!(Expr::constant(1.0).try_equals(1.0),Err(ModelError::Unsupported(_))));
        assert!(matches!(var(0).leq(1.0).try_leq(var(1)),Err(ModelError::Unsupported(_))));
    }
}
