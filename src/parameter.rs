//! Indexed numeric input data.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::Domain;
use crate::error::{ModelError,Result};
use crate::expr::Expr;
use crate::index::{CompoundIndex,IndexRegistry,IndexTuple,LabelTuple};
use crate::utils::indexed_name;

struct ParameterData {
    name    : String,
    default : f64,
    values  : Vec<f64>,
}

/// A named table of numbers indexed by `I`, populated while the model is open and read while
/// building expressions.
///
/// Storage is allocated on the first [Parameter::add], sized to the Cartesian product of the
/// index sets at that time. Elements never added read as the default value, and a parameter that
/// has no data at all reads as the default everywhere.
///
/// The handle is cheap to clone; clones share the same data.
pub struct Parameter<I : IndexTuple> {
    data    : Rc<RefCell<ParameterData>>,
    domain  : Rc<Domain<I>>,
    indices : Rc<RefCell<IndexRegistry>>,
}

impl<I : IndexTuple> Clone for Parameter<I> {
    fn clone(&self) -> Self { Parameter{ data : self.data.clone(), domain : self.domain.clone(), indices : self.indices.clone() } }
}

impl<I : IndexTuple> Parameter<I> {
    pub(crate) fn new(name : String, domain : Domain<I>, indices : Rc<RefCell<IndexRegistry>>) -> Parameter<I> {
        Parameter{
            data : Rc::new(RefCell::new(ParameterData{ name, default : 0.0, values : Vec::new() })),
            domain : Rc::new(domain),
            indices
        }
    }

    pub fn name(&self) -> String { self.data.borrow().name.clone() }
    pub fn domain(&self) -> &Domain<I> { &self.domain }
    pub fn default_value(&self) -> f64 { self.data.borrow().default }
    pub fn is_populated(&self) -> bool { !self.data.borrow().values.is_empty() }

    /// Set the value read for elements that were never added. Set it before adding data: slots
    /// allocated by an earlier `add` keep the previous default.
    pub fn set_default(&mut self, value : f64) { self.data.borrow_mut().default = value; }

    pub fn with_default(mut self, value : f64) -> Parameter<I> { self.set_default(value); self }

    fn store(&self, raw : &I::Raw, value : f64) -> Result<()> {
        let reg = self.indices.borrow();
        if reg.is_sealed() {
            return Err(ModelError::Sealed(format!("cannot add data to parameter `{}`",self.name())));
        }
        let ci = CompoundIndex::new(I::sizes(&reg)?);
        let size = ci.size();
        let mut data = self.data.borrow_mut();
        if data.values.is_empty() {
            data.values = vec![data.default; size];
        }
        else if data.values.len() != size {
            return Err(ModelError::ShapeMismatch{ name : data.name.clone(), expected : data.values.len(), actual : size });
        }
        let k = ci.checked_offset(raw.as_ref())
            .ok_or_else(|| ModelError::InvalidIndex(format!("{:?} is outside the index space of `{}`",raw,data.name)))?;
        data.values[k] = value;
        Ok(())
    }

    /// Store `value` at the element named by `labels`.
    ///
    /// # Arguments
    /// - `labels` - one label per dimension, `()` for a scalar, a single label for one dimension
    ///   and a tuple otherwise.
    /// - `value` - the value.
    pub fn try_add<L>(&mut self, labels : L, value : f64) -> Result<()> where L : LabelTuple<I> {
        let raw = labels.resolve(&self.indices.borrow())?;
        self.store(&raw,value)
    }

    pub fn add<L>(&mut self, labels : L, value : f64) where L : LabelTuple<I> {
        self.try_add(labels,value).unwrap_or_else(|e| panic!("{}",e))
    }

    /// Store `value` at the element `index`.
    pub fn try_set(&mut self, index : I, value : f64) -> Result<()> { self.store(&index.to_raw(),value) }
    pub fn set(&mut self, index : I, value : f64) { self.try_set(index,value).unwrap_or_else(|e| panic!("{}",e)) }

    /// Read the value at `index`.
    pub fn try_value(&self, index : I) -> Result<f64> {
        let data = self.data.borrow();
        if data.values.is_empty() {
            return Ok(data.default);
        }
        let reg = self.indices.borrow();
        let size = I::size(&reg)?;
        if size != data.values.len() {
            return Err(ModelError::ShapeMismatch{ name : data.name.clone(), expected : data.values.len(), actual : size });
        }
        Ok(data.values[index.offset(&reg)?])
    }

    pub fn value(&self, index : I) -> f64 { self.try_value(index).unwrap_or_else(|e| panic!("{}",e)) }

    /// The value at `index` as a constant expression.
    pub fn at(&self, index : I) -> Expr { Expr::Constant(self.value(index)) }

    /// Validate every value against the declared domain. Values are not checked when added.
    ///
    /// # Returns
    /// [ModelError::DomainViolation] for the first value outside the domain.
    pub fn check(&self) -> Result<()> {
        let all = I::all(&self.indices.borrow())?;
        for (k,i) in all.into_iter().enumerate() {
            let v = self.try_value(i)?;
            let violated = |op : &str, b : f64| {
                let labels = I::labels(&i.to_raw(),&self.indices.borrow()).unwrap_or_default();
                ModelError::DomainViolation(format!("{} = {} but must be {} {}",indexed_name(&self.name(),labels.as_slice()),v,op,b))
            };
            let lower = &self.domain.lower();
            if let Some(b) = lower.eval(i) {
                if lower.is_strict() && v <= b { return Err(violated(">",b)) }
                if v < b { return Err(violated(">=",b)) }
            }
            let upper = &self.domain.upper();
            if let Some(b) = upper.eval(i) {
                if upper.is_strict() && v >= b { return Err(violated("<",b)) }
                if v > b { return Err(violated("<=",b)) }
            }
            if self.domain.is_integer() && v.fract() != 0.0 {
                return Err(ModelError::DomainViolation(format!("element {} of `{}` = {} is not integer",k,self.name(),v)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    index_set!(FOOD);
    index_set!(NUTR);

    fn model() -> Model {
        let mut m = Model::new(None);
        for f in ["BEEF","CHK","FISH"] { m.add_label::<FOOD>(f).unwrap(); }
        for n in ["A","C"] { m.add_label::<NUTR>(n).unwrap(); }
        m
    }

    #[test]
    fn add_and_read() {
        let mut m = model();
        let mut cost = m.parameter::<Index<FOOD>,_>(Some("cost"),greater_than(0.0));
        assert!(!cost.is_populated());
        assert_eq!(cost.value(Index::new(1)),0.0);
        cost.add("CHK",2.59);
        assert_eq!(cost.value(m.index_of::<FOOD>("CHK").unwrap()),2.59);
        assert_eq!(cost.value(Index::new(0)),0.0);
        assert_eq!(cost.at(Index::new(1)),Expr::Constant(2.59));
        assert!(matches!(cost.try_add("SPG",1.0),Err(ModelError::InvalidIndex(_))));

        let mut amt = m.parameter::<(Index<NUTR>,Index<FOOD>),_>(Some("amt"),unbounded()).with_default(-1.0);
        amt.add(("C","FISH"),10.0);
        assert_eq!(amt.value((Index::new(1),Index::new(2))),10.0);
        assert_eq!(amt.value((Index::new(0),Index::new(2))),-1.0);
        assert!(amt.try_value((Index::new(2),Index::new(0))).is_err());

        // growing a set after allocation
        m.add_label::<FOOD>("HAM").unwrap();
        assert!(matches!(amt.try_value((Index::new(0),Index::new(0))),Err(ModelError::ShapeMismatch{..})));
    }

    #[test]
    fn scalars_and_sealing() {
        let mut m = model();
        let mut total = m.parameter::<(),_>(Some("total"),unbounded()).with_default(5.0);
        assert_eq!(total.value(()),5.0);
        total.add((),7.0);
        assert_eq!(total.value(()),7.0);
        m.seal_data().unwrap();
        assert!(matches!(total.try_add((),1.0),Err(ModelError::Sealed(_))));
    }

    #[test]
    fn domain_check() {
        let mut m = model();
        let mut f_min = m.parameter::<Index<FOOD>,_>(Some("f_min"),greater_equal(0.0));
        let mut f_max = m.parameter::<Index<FOOD>,_>(Some("f_max"),greater_equal(&f_min));
        for (f,lo,hi) in [("BEEF",0.0,10.0),("CHK",2.0,1.0),("FISH",-1.0,3.0)] {
            f_min.add(f,lo);
            f_max.add(f,hi);
        }
        assert!(matches!(f_min.check(),Err(ModelError::DomainViolation(_))));
        assert!(matches!(f_max.check(),Err(ModelError::DomainViolation(_))));
        f_min.add("FISH",0.0);
        f_max.add("CHK",2.0);
        assert_eq!(f_min.check(),Ok(()));
        assert_eq!(f_max.check(),Ok(()));

        let mut n = m.parameter::<(),_>(Some("n"),greater_than(0).integer());
        n.add((),0.0);
        assert!(n.check().is_err());
        n.add((),1.5);
        assert!(n.check().is_err());
        n.add((),2.0);
        assert!(n.check().is_ok());
    }
}
