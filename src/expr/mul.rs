//! Multiplication and division of expressions.
//!
//! Only products where at least one factor is a constant, and quotients by a constant, are
//! linear. Everything else is rejected.

use super::{Expr,Term};
use crate::error::{ModelError,Result};

impl Expr {
    /// Multiply every coefficient and the constant part by `k`.
    pub fn scale(self, k : f64) -> Expr {
        match self {
            Expr::Constant(v) => Expr::Constant(k*v),
            Expr::Variable(v) => Expr::Term(Term{ variable : v, coefficient : k }),
            Expr::Term(t)     => Expr::Term(Term{ variable : t.variable, coefficient : k * t.coefficient }),
            Expr::Sum(mut s)  => { s.scale(k); Expr::Sum(s) }
        }
    }

    /// Multiply two expressions.
    ///
    /// # Returns
    /// The product, or [ModelError::NonlinearExpression] if neither factor is a constant.
    pub fn try_mul(self, rhs : Expr) -> Result<Expr> {
        match (self,rhs) {
            (Expr::Constant(a),Expr::Constant(b)) => Ok(Expr::Constant(a*b)),
            (Expr::Constant(k),e) | (e,Expr::Constant(k)) => Ok(e.scale(k)),
            (lhs,rhs) => Err(ModelError::NonlinearExpression(format!("product of {} and {}",kind_name(&lhs),kind_name(&rhs))))
        }
    }

    /// Divide by an expression.
    ///
    /// # Returns
    /// The quotient, [ModelError::NonlinearExpression] if the divisor is not a constant, or
    /// [ModelError::Unsupported] if it is zero.
    pub fn try_div(self, rhs : Expr) -> Result<Expr> {
        match rhs {
            Expr::Constant(k) if k == 0.0 => Err(ModelError::Unsupported("division by zero".to_string())),
            Expr::Constant(k) => Ok(self.scale(1.0/k)),
            rhs => Err(ModelError::NonlinearExpression(format!("division of {} by {}",kind_name(&self),kind_name(&rhs))))
        }
    }
}

fn kind_name(e : &Expr) -> &'static str {
    match e {
        Expr::Constant(_) => "a constant",
        Expr::Variable(_) => "a variable",
        Expr::Term(_)     => "a term",
        Expr::Sum(_)      => "a sum"
    }
}

impl std::ops::Mul<Expr> for Expr {
    type Output = Expr;
    fn mul(self, rhs : Expr) -> Expr { self.try_mul(rhs).unwrap_or_else(|e| panic!("{}",e)) }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;
    fn mul(self, rhs : f64) -> Expr { self.scale(rhs) }
}

impl std::ops::Mul<Expr> for f64 {
    type Output = Expr;
    fn mul(self, rhs : Expr) -> Expr { rhs.scale(self) }
}

impl std::ops::Div<Expr> for Expr {
    type Output = Expr;
    fn div(self, rhs : Expr) -> Expr { self.try_div(rhs).unwrap_or_else(|e| panic!("{}",e)) }
}

impl std::ops::Div<f64> for Expr {
    type Output = Expr;
    fn div(self, rhs : f64) -> Expr { self.try_div(Expr::Constant(rhs)).unwrap_or_else(|e| panic!("{}",e)) }
}

impl std::ops::Div<Expr> for f64 {
    type Output = Expr;
    fn div(self, rhs : Expr) -> Expr { Expr::Constant(self).try_div(rhs).unwrap_or_else(|e| panic!("{}",e)) }
}

#[cfg(test)]
mod tests {
    use crate::expr::*;
    use crate::error::ModelError;

    fn var(i : usize) -> Expr { Expr::Variable(VariableRef::new(0,i)) }

    #[test]
    fn products() {
        assert_eq!(Expr::Constant(2.0).try_mul(Expr::Constant(3.0)),Ok(Expr::Constant(6.0)));

        let Expr::Term(t) = Expr::Constant(2.0) * var(1) else { panic!("expected term") };
        assert_eq!(t.coefficient,2.0);
        let Expr::Term(t) = (var(1) * 2.0) * Expr::Constant(1.5) else { panic!("expected term") };
        assert_eq!(t.coefficient,3.0);

        let Expr::Sum(s) = Expr::Constant(-2.0) * (var(0) + 2.0 * var(1) + 3.0) else { panic!("expected sum") };
        assert_eq!(s.coefficient(0),Some(-2.0));
        assert_eq!(s.coefficient(1),Some(-4.0));
        assert_eq!(s.constant(),-6.0);

        assert!(matches!(var(0).try_mul(var(1)),Err(ModelError::NonlinearExpression(_))));
        assert!(matches!((var(0)+1.0).try_mul(var(1)*2.0),Err(ModelError::NonlinearExpression(_))));
    }

    #[test]
    fn quotients() {
        assert_eq!(Expr::Constant(1.0) / Expr::Constant(4.0),Expr::Constant(0.25));
        let Expr::Term(t) = var(0) / 4.0 else { panic!("expected term") };
        assert_eq!(t.coefficient,0.25);
        assert!(matches!(var(0).try_div(var(1)),Err(ModelError::NonlinearExpression(_))));
        assert!(matches!(Expr::Constant(1.0).try_div(var(1)),Err(ModelError::NonlinearExpression(_))));
        assert!(matches!(var(0).try_div(Expr::Constant(0.0)),Err(ModelError::Unsupported(_))));
    }

    #[test]
    #[should_panic]
    fn nonlinear_operator_panics() {
        let _ = var(0) * var(1);
    }
}
