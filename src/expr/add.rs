//! Addition and subtraction of expressions.

use super::{Expr,Sum};

impl Sum {
    /// Add `e` into this sum in place. Repeated variables accumulate their coefficients.
    pub fn add(&mut self, e : &Expr) {
        match e {
            Expr::Constant(v) => self.constant += v,
            Expr::Variable(v) => self.add_term(*v,1.0),
            Expr::Term(t)     => self.add_term(t.variable,t.coefficient),
            Expr::Sum(s)      => {
                s.terms().for_each(|t| self.add_term(t.variable,t.coefficient));
                self.constant += s.constant;
            }
        }
    }

    /// Subtract `e` from this sum in place.
    pub fn subtract(&mut self, e : &Expr) {
        match e {
            Expr::Constant(v) => self.constant -= v,
            Expr::Variable(v) => self.add_term(*v,-1.0),
            Expr::Term(t)     => self.add_term(t.variable,-t.coefficient),
            Expr::Sum(s)      => {
                s.terms().for_each(|t| self.add_term(t.variable,-t.coefficient));
                self.constant -= s.constant;
            }
        }
    }
}

impl std::ops::Add<Expr> for Expr {
    type Output = Expr;
    fn add(self, rhs : Expr) -> Expr {
        match (self,rhs) {
            (Expr::Constant(a),Expr::Constant(b)) => Expr::Constant(a+b),
            (Expr::Sum(mut s),rhs) => { s.add(&rhs); Expr::Sum(s) },
            (lhs,Expr::Sum(mut s)) => { s.add(&lhs); Expr::Sum(s) },
            (lhs,rhs) => { let mut s = lhs.into_sum(); s.add(&rhs); Expr::Sum(s) }
        }
    }
}

impl std::ops::Sub<Expr> for Expr {
    type Output = Expr;
    fn sub(self, rhs : Expr) -> Expr {
        match (self,rhs) {
            (Expr::Constant(a),Expr::Constant(b)) => Expr::Constant(a-b),
            (lhs,rhs) => { let mut s = lhs.into_sum(); s.subtract(&rhs); Expr::Sum(s) }
        }
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr { self.scale(-1.0) }
}

impl std::ops::Add<f64> for Expr {
    type Output = Expr;
    fn add(self, rhs : f64) -> Expr { self + Expr::Constant(rhs) }
}

impl std::ops::Add<Expr> for f64 {
    type Output = Expr;
    fn add(self, rhs : Expr) -> Expr { Expr::Constant(self) + rhs }
}

impl std::ops::Sub<f64> for Expr {
    type Output = Expr;
    fn sub(self, rhs : f64) -> Expr { self - Expr::Constant(rhs) }
}

impl std::ops::Sub<Expr> for f64 {
    type Output = Expr;
    fn sub(self, rhs : Expr) -> Expr { Expr::Constant(self) - rhs }
}

impl std::ops::AddAssign<Expr> for Expr {
    fn add_assign(&mut self, rhs : Expr) {
        let lhs = std::mem::replace(self,Expr::zero());
        *self = lhs + rhs;
    }
}

impl std::ops::SubAssign<Expr> for Expr {
    fn sub_assign(&mut self, rhs : Expr) {
        let lhs = std::mem::replace(self,Expr::zero());
        *self = lhs - rhs;
    }
}

impl std::iter::Sum<Expr> for Expr {
    fn sum<I : Iterator<Item=Expr>>(iter : I) -> Expr {
        let mut s = Sum::new();
        iter.for_each(|e| s.add(&e));
        Expr::Sum(s)
    }
}
