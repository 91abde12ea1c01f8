//! Module for VariableSet object and related implementations

use std::cell::{OnceCell,RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::domain::Domain;
use crate::error::{ModelError,Result};
use crate::expr::{Expr,VariableRef};
use crate::index::{IndexRegistry,IndexTuple,LabelTuple};

/// Capabilities of a variable family that do not depend on its index type. This is what the model
/// and the solver adapters see.
pub trait VariableFamily {
    fn name(&self) -> &str;
    /// Number of variables in the family.
    fn size(&self) -> Result<usize>;
    /// Column of the first variable. `None` until the model is sealed.
    fn start_index(&self) -> Option<usize>;
    /// Comma separated labels of the variable in column `absolute`.
    fn element_name(&self, absolute : usize) -> Result<String>;
    fn lower_bound(&self, absolute : usize) -> Result<Option<f64>>;
    fn upper_bound(&self, absolute : usize) -> Result<Option<f64>>;
    fn is_integer(&self) -> bool;

    /// Assign the start column. Called once by [Model::seal_data](crate::Model::seal_data); a
    /// second call fails.
    #[doc(hidden)]
    fn assign_start(&self, start : usize) -> Result<()>;
}

pub(crate) struct VariableSetData<I : IndexTuple> {
    name    : String,
    domain  : Domain<I>,
    start   : OnceCell<usize>,
    indices : Rc<RefCell<IndexRegistry>>,
}

impl<I : IndexTuple> VariableSetData<I> {
    fn local_index(&self, absolute : usize) -> Result<I> {
        let start = self.start.get().copied()
            .ok_or_else(|| ModelError::NotSealed(format!("variable set `{}` has no columns yet",self.name)))?;
        let local = absolute.checked_sub(start)
            .ok_or_else(|| ModelError::InvalidIndex(format!("column {} is not in variable set `{}`",absolute,self.name)))?;
        I::from_offset(local,&self.indices.borrow())
            .map_err(|_| ModelError::InvalidIndex(format!("column {} is not in variable set `{}`",absolute,self.name)))
    }
}

impl<I : IndexTuple> VariableFamily for VariableSetData<I> {
    fn name(&self) -> &str { self.name.as_str() }
    fn size(&self) -> Result<usize> { I::size(&self.indices.borrow()) }
    fn start_index(&self) -> Option<usize> { self.start.get().copied() }

    fn element_name(&self, absolute : usize) -> Result<String> {
        let i = self.local_index(absolute)?;
        Ok(I::labels(&i.to_raw(),&self.indices.borrow())?.join(","))
    }

    fn lower_bound(&self, absolute : usize) -> Result<Option<f64>> {
        let i = self.local_index(absolute)?;
        Ok(self.domain.lower().eval(i))
    }

    fn upper_bound(&self, absolute : usize) -> Result<Option<f64>> {
        let i = self.local_index(absolute)?;
        Ok(self.domain.upper().eval(i))
    }

    fn is_integer(&self) -> bool { self.domain.is_integer() }

    fn assign_start(&self, start : usize) -> Result<()> {
        self.start.set(start)
            .map_err(|_| ModelError::Sealed(format!("variable set `{}` already has columns",self.name)))
    }
}

/// A family of decision variables indexed by `I`.
///
/// Created by [Model::variable](crate::Model::variable), which registers it with the model. The
/// variables get their columns when the model is sealed; only then can the family be indexed to
/// produce expressions.
///
/// ```
/// use milpmodel::*;
/// index_set!(FOOD);
///
/// let mut m = Model::new(None);
/// m.add_labels::<FOOD,_>(["BEEF","CHK"]).unwrap();
/// let buy : VariableSet<Index<FOOD>> = m.variable(Some("Buy"), greater_equal(0.0));
/// assert!(buy.try_at(Index::first()).is_err());
/// m.seal_data().unwrap();
/// assert_eq!(buy.at(Index::new(1)), Expr::Variable(VariableRef::new(0,1)));
/// ```
pub struct VariableSet<I : IndexTuple> {
    inner : Rc<VariableSetData<I>>
}

impl<I : IndexTuple> Clone for VariableSet<I> {
    fn clone(&self) -> Self { VariableSet{ inner : self.inner.clone() } }
}

impl<I : IndexTuple> Debug for VariableSet<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableSet")
            .field("name",&self.inner.name)
            .field("start",&self.inner.start.get())
            .field("domain",&self.inner.domain)
            .finish()
    }
}

impl<I : IndexTuple> VariableSet<I> {
    pub(crate) fn new(name : String, domain : Domain<I>, indices : Rc<RefCell<IndexRegistry>>) -> VariableSet<I> {
        VariableSet{ inner : Rc::new(VariableSetData{ name, domain, start : OnceCell::new(), indices }) }
    }

    pub(crate) fn family(&self) -> Rc<dyn VariableFamily> { self.inner.clone() }

    /// Reference to the variable at `index`.
    ///
    /// # Returns
    /// A [Expr::Variable], [ModelError::NotSealed] before the model is sealed, or
    /// [ModelError::InvalidIndex] if `index` is outside the index sets.
    pub fn try_at(&self, index : I) -> Result<Expr> {
        let start = self.inner.start.get().copied()
            .ok_or_else(|| ModelError::NotSealed(format!("variable set `{}` used before seal_data()",self.inner.name)))?;
        let offset = index.offset(&self.inner.indices.borrow())?;
        Ok(Expr::Variable(VariableRef::new(start,offset)))
    }

    pub fn at(&self, index : I) -> Expr { self.try_at(index).unwrap_or_else(|e| panic!("{}",e)) }

    /// Reference to the variable named by `labels`.
    pub fn try_at_labels<L>(&self, labels : L) -> Result<Expr> where L : LabelTuple<I> {
        let raw = labels.resolve(&self.inner.indices.borrow())?;
        self.try_at(I::from_raw(&raw))
    }

    pub fn at_labels<L>(&self, labels : L) -> Expr where L : LabelTuple<I> {
        self.try_at_labels(labels).unwrap_or_else(|e| panic!("{}",e))
    }

    /// All index tuples of the family, in column order.
    pub fn indices(&self) -> Result<Vec<I>> { I::all(&self.inner.indices.borrow()) }

    pub fn domain(&self) -> &Domain<I> { &self.inner.domain }
}

impl<I : IndexTuple> VariableFamily for VariableSet<I> {
    fn name(&self) -> &str { self.inner.name() }
    fn size(&self) -> Result<usize> { self.inner.size() }
    fn start_index(&self) -> Option<usize> { self.inner.start_index() }
    fn element_name(&self, absolute : usize) -> Result<String> { self.inner.element_name(absolute) }
    fn lower_bound(&self, absolute : usize) -> Result<Option<f64>> { self.inner.lower_bound(absolute) }
    fn upper_bound(&self, absolute : usize) -> Result<Option<f64>> { self.inner.upper_bound(absolute) }
    fn is_integer(&self) -> bool { self.inner.is_integer() }
    fn assign_start(&self, start : usize) -> Result<()> { self.inner.assign_start(start) }
}
