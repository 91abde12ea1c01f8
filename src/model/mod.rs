//! The model: index data, variable families, objective and constraints.
//!
//! A model goes through two phases.
//! 1. *Open*: index sets are populated, parameters are declared and filled, variable families are
//!    declared.
//! 2. *Sealed*, after [Model::seal_data]: every variable family has a contiguous range of columns
//!    assigned in declaration order, the index data is frozen, and the objective and constraints
//!    can be built.
//!
//! The sealed model exposes a flattened view (columns, rows, objective) that a solver adapter
//! implementing [SolverBackend] turns into solver calls.

use std::cell::RefCell;
use std::iter::once;
use std::rc::Rc;

use log::{debug,trace};

use crate::constraint::Constraint;
use crate::domain::Domain;
use crate::error::{ModelError,Result};
use crate::expr::{Expr,Sum};
use crate::index::{Index,IndexRegistry,IndexTag,IndexTuple,RangeBound,RangeTag};
use crate::parameter::Parameter;
use crate::solver::{BoundKind,Column,ObjectiveRow,Row,Solution,SolverBackend};
use crate::utils::{indexed_name,Cummulate};
use crate::variable::{VariableFamily,VariableSet};

/// Objective sense
#[derive(Clone,Copy,Debug,PartialEq,Eq,Default)]
pub enum Sense {
    Maximize,
    #[default]
    Minimize
}

struct Objective {
    name  : String,
    sense : Sense,
    expr  : Expr,
}

/// A constraint with its row name.
#[derive(Debug,Clone)]
pub struct NamedConstraint {
    pub name       : String,
    pub constraint : Constraint,
}

/// A linear or mixed integer linear model.
///
/// # Example
/// ```
/// use milpmodel::*;
/// index_set!(ITEM);
///
/// let mut m = Model::new(Some("knapsack"));
/// m.add_labels::<ITEM,_>(["a","b","c"]).unwrap();
/// let mut weight = m.parameter::<Index<ITEM>,_>(Some("weight"), greater_than(0.0));
/// for (l,w) in [("a",2.0),("b",3.0),("c",4.0)] { weight.add(l,w); }
///
/// let take : VariableSet<Index<ITEM>> = m.variable(Some("take"), binary());
/// m.seal_data().unwrap();
///
/// m.maximize(Some("value"), m.sum(|i : Index<ITEM>| take.at(i)));
/// m.constraint(Some("capacity"), m.sum(|i| weight.at(i) * take.at(i)).leq(6.0));
///
/// assert_eq!(m.variable_count(), 3);
/// assert_eq!(m.rows().unwrap()[0].entries, vec![(0,2.0),(1,3.0),(2,4.0)]);
/// ```
pub struct Model {
    name             : Option<String>,
    indices          : Rc<RefCell<IndexRegistry>>,
    variable_sets    : Vec<Rc<dyn VariableFamily>>,
    cumulative_sizes : Vec<usize>,
    sealed           : bool,
    objective        : RefCell<Objective>,
    constraints      : RefCell<Vec<NamedConstraint>>,
}

impl Model {
    /// Create a new empty model.
    ///
    /// # Arguments
    /// - `name` Optional model name, used when writing the problem.
    pub fn new(name : Option<&str>) -> Model {
        Model{
            name             : name.map(|s| s.to_string()),
            indices          : Rc::new(RefCell::new(IndexRegistry::new())),
            variable_sets    : Vec::new(),
            cumulative_sizes : Vec::new(),
            sealed           : false,
            objective        : RefCell::new(Objective{ name : "obj".to_string(), sense : Sense::Minimize, expr : Expr::zero() }),
            constraints      : RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
    pub fn is_sealed(&self) -> bool { self.sealed }

    //======================================================
    // Index data
    //======================================================

    /// Append a label to the labelled dimension `T`.
    pub fn add_label<T : IndexTag>(&mut self, label : &str) -> Result<Index<T>> {
        self.indices.borrow_mut().add_label::<T>(label)
    }

    /// Append several labels to the labelled dimension `T`.
    pub fn add_labels<T : IndexTag,L : AsRef<str>>(&mut self, labels : impl IntoIterator<Item=L>) -> Result<Vec<Index<T>>> {
        let mut reg = self.indices.borrow_mut();
        labels.into_iter().map(|l| reg.add_label::<T>(l.as_ref())).collect()
    }

    /// Set the value of the range bound `B`.
    pub fn set_value<B : RangeBound>(&mut self, value : i64) -> Result<()> {
        self.indices.borrow_mut().set_value::<B>(value)
    }

    pub fn index_of<T : IndexTag>(&self, label : &str) -> Result<Index<T>> {
        self.indices.borrow().index_of::<T>(label).map(Index::new)
    }

    pub fn label<T : IndexTag>(&self, index : Index<T>) -> Result<String> {
        self.indices.borrow().label::<T>(index.raw())
    }

    pub fn set_size<T : IndexTag>(&self) -> Result<usize> {
        self.indices.borrow().size::<T>()
    }

    /// The element of the range `T` with value `value`, checked against both ends of the range.
    pub fn range_index<T : RangeTag>(&self, value : i64) -> Result<Index<T>> {
        let i = Index::<T>::from_value(value)?;
        let size = self.set_size::<T>()?;
        if i.raw() < size { Ok(i) }
        else { Err(ModelError::InvalidIndex(format!("{} is beyond the last element of `{}`",value,T::NAME))) }
    }

    /// All elements of the index space `I` in row-major order.
    pub fn indices<I : IndexTuple>(&self) -> Result<Vec<I>> {
        I::all(&self.indices.borrow())
    }

    //======================================================
    // Parameters and variables
    //======================================================

    /// Declare a parameter indexed by `I`.
    ///
    /// # Arguments
    /// - `name` Optional name, used in error messages.
    /// - `dom` Declared domain, checked only by [Parameter::check].
    pub fn parameter<I,D>(&mut self, name : Option<&str>, dom : D) -> Parameter<I>
        where I : IndexTuple, D : Into<Domain<I>>
    {
        let name = name.map(|s| s.to_string()).unwrap_or_else(|| "param".to_string());
        Parameter::new(name,dom.into(),self.indices.clone())
    }

    /// Declare a variable family indexed by `I`.
    ///
    /// # Arguments
    /// - `name` Optional name. Unnamed families are called `x0`, `x1`, ... after their position.
    /// - `dom` The domain, for example `greater_equal(0.0)` or `in_range(0.0,&cap).integer()`.
    ///
    /// # Returns
    /// The variable family, or an error if the model is sealed or the name is taken.
    pub fn try_variable<I,D>(&mut self, name : Option<&str>, dom : D) -> Result<VariableSet<I>>
        where I : IndexTuple, D : Into<Domain<I>>
    {
        if self.sealed {
            return Err(ModelError::Sealed(format!("cannot add variable set `{}`",name.unwrap_or(""))));
        }
        let name = name.map(|s| s.to_string()).unwrap_or_else(|| format!("x{}",self.variable_sets.len()));
        if self.variable_sets.iter().any(|v| v.name() == name) {
            return Err(ModelError::Unsupported(format!("duplicate variable set name `{}`",name)));
        }
        let v = VariableSet::new(name,dom.into(),self.indices.clone());
        self.variable_sets.push(v.family());
        Ok(v)
    }

    pub fn variable<I,D>(&mut self, name : Option<&str>, dom : D) -> VariableSet<I>
        where I : IndexTuple, D : Into<Domain<I>>
    {
        self.try_variable(name,dom).unwrap_or_else(|e| panic!("{}",e))
    }

    //======================================================
    // Sealing and column layout
    //======================================================

    /// Fix the column layout and freeze the index data.
    ///
    /// Variable families get contiguous column ranges in declaration order.
    pub fn seal_data(&mut self) -> Result<()> {
        if self.sealed {
            return Err(ModelError::Sealed("seal_data() called twice".to_string()));
        }
        let sizes = self.variable_sets.iter().map(|v| v.size()).collect::<Result<Vec<usize>>>()?;
        let mut cumulative = sizes.clone();
        cumulative.cummulate();

        for ((v,start),size) in self.variable_sets.iter().zip(once(0).chain(cumulative.iter().copied())).zip(sizes.iter()) {
            v.assign_start(start)?;
            trace!("variable set {} : columns {}..{}",v.name(),start,start+size);
        }
        self.cumulative_sizes = cumulative;
        self.indices.borrow_mut().seal();
        self.sealed = true;
        debug!("sealed model {} : {} variable sets, {} columns",
               self.name.as_deref().unwrap_or("<unnamed>"),
               self.variable_sets.len(),
               self.variable_count());
        Ok(())
    }

    fn check_sealed(&self, what : &str) -> Result<()> {
        if self.sealed { Ok(()) } else { Err(ModelError::NotSealed(what.to_string())) }
    }

    /// Total number of columns. Zero before sealing.
    pub fn variable_count(&self) -> usize { self.cumulative_sizes.last().copied().unwrap_or(0) }

    /// The variable family owning column `index`.
    pub fn variable_set_from_absolute_index(&self, index : usize) -> Result<&dyn VariableFamily> {
        self.check_sealed("column lookup")?;
        let k = self.cumulative_sizes.partition_point(|&c| c <= index);
        self.variable_sets.get(k)
            .map(|v| v.as_ref())
            .ok_or_else(|| ModelError::InvalidIndex(format!("column {} is outside the model ({} columns)",index,self.variable_count())))
    }

    /// Display name of column `index`, `family[labels]`.
    pub fn variable_name(&self, index : usize) -> Result<String> {
        let v = self.variable_set_from_absolute_index(index)?;
        let labels = v.element_name(index)?;
        if labels.is_empty() { Ok(v.name().to_string()) }
        else { Ok(indexed_name(v.name(),&[labels])) }
    }

    /// Flattened description of column `index`.
    pub fn column(&self, index : usize) -> Result<Column> {
        let v = self.variable_set_from_absolute_index(index)?;
        Ok(Column{
            name       : self.variable_name(index)?,
            bounds     : BoundKind::from_bounds(v.lower_bound(index)?,v.upper_bound(index)?),
            is_integer : v.is_integer()
        })
    }

    pub fn variable_sets(&self) -> impl Iterator<Item=&dyn VariableFamily> { self.variable_sets.iter().map(|v| v.as_ref()) }

    //======================================================
    // Aggregation
    //======================================================

    /// Sum `f(i)` over all `i` in the index space `I`, in row-major order.
    ///
    /// # Arguments
    /// - `f` Function returning the term for one index, or an error that aborts the sum.
    pub fn try_sum<I,F>(&self, mut f : F) -> Result<Expr>
        where I : IndexTuple, F : FnMut(I) -> Result<Expr>
    {
        let all = I::all(&self.indices.borrow())?;
        let mut s = Sum::new();
        for i in all {
            s.add(&f(i)?);
        }
        Ok(Expr::Sum(s))
    }

    /// Sum `f(i)` over all `i` in the index space `I`.
    ///
    /// ```
    /// use milpmodel::*;
    /// index_set!(FOOD);
    /// let mut m = Model::new(None);
    /// m.add_labels::<FOOD,_>(["BEEF","CHK","FISH"]).unwrap();
    /// let buy : VariableSet<Index<FOOD>> = m.variable(Some("Buy"), greater_equal(0.0));
    /// m.seal_data().unwrap();
    /// let Expr::Sum(s) = m.sum(|j| 2.0 * buy.at(j)) else { panic!() };
    /// assert_eq!(s.len(), 3);
    /// ```
    pub fn sum<I,F>(&self, mut f : F) -> Expr
        where I : IndexTuple, F : FnMut(I) -> Expr
    {
        self.try_sum(|i| Ok(f(i))).unwrap_or_else(|e| panic!("{}",e))
    }

    /// Add one constraint `f(i)` for every `i` in the index space `I`. Row `i` is named
    /// `name[labels of i]`.
    pub fn try_subject_to<I,F>(&self, name : Option<&str>, mut f : F) -> Result<()>
        where I : IndexTuple, F : FnMut(I) -> Result<Constraint>
    {
        let all = I::all(&self.indices.borrow())?;
        let base = name.map(|s| s.to_string()).unwrap_or_else(|| format!("c{}",self.constraints.borrow().len()));
        let mut rows = Vec::with_capacity(all.len());
        for i in all {
            let constraint = f(i)?;
            let labels = I::labels(&i.to_raw(),&self.indices.borrow())?;
            rows.push(NamedConstraint{ name : indexed_name(&base,labels.as_slice()), constraint });
        }
        self.constraints.borrow_mut().extend(rows);
        Ok(())
    }

    pub fn subject_to<I,F>(&self, name : Option<&str>, mut f : F)
        where I : IndexTuple, F : FnMut(I) -> Constraint
    {
        self.try_subject_to(name,|i| Ok(f(i))).unwrap_or_else(|e| panic!("{}",e))
    }

    /// Add a single constraint.
    pub fn constraint(&self, name : Option<&str>, c : Constraint) {
        let mut cons = self.constraints.borrow_mut();
        let name = name.map(|s| s.to_string()).unwrap_or_else(|| format!("c{}",cons.len()));
        cons.push(NamedConstraint{ name, constraint : c });
    }

    pub fn constraint_count(&self) -> usize { self.constraints.borrow().len() }

    /// Copy of the constraints in declaration order.
    pub fn constraints(&self) -> Vec<NamedConstraint> { self.constraints.borrow().clone() }

    //======================================================
    // Objective
    //======================================================

    /// Replace the objective and its sense.
    pub fn objective(&self, name : Option<&str>, sense : Sense, expr : Expr) {
        let mut obj = self.objective.borrow_mut();
        if let Some(name) = name { obj.name = name.to_string(); }
        obj.sense = sense;
        obj.expr  = expr;
    }

    pub fn minimize(&self, name : Option<&str>, expr : Expr) { self.objective(name,Sense::Minimize,expr) }
    pub fn maximize(&self, name : Option<&str>, expr : Expr) { self.objective(name,Sense::Maximize,expr) }

    /// Replace the objective expression, keeping the sense.
    pub fn set_objective(&self, expr : Expr) { self.objective.borrow_mut().expr = expr; }
    pub fn set_minimize(&self) { self.objective.borrow_mut().sense = Sense::Minimize; }
    pub fn set_maximize(&self) { self.objective.borrow_mut().sense = Sense::Maximize; }
    pub fn sense(&self) -> Sense { self.objective.borrow().sense }
    pub fn objective_expr(&self) -> Expr { self.objective.borrow().expr.clone() }

    //======================================================
    // Flattened view
    //======================================================

    fn check_columns(&self, entries : &[(usize,f64)], what : &str) -> Result<()> {
        let n = self.variable_count();
        match entries.iter().find(|(j,_)| *j >= n) {
            Some((j,_)) => Err(ModelError::InvalidIndex(format!("{} references column {} but the model has {} columns",what,j,n))),
            None => Ok(())
        }
    }

    /// All columns in order.
    pub fn columns(&self) -> Result<Vec<Column>> {
        self.check_sealed("columns()")?;
        (0..self.variable_count()).map(|j| self.column(j)).collect()
    }

    /// All rows in declaration order. The constant part of each constraint expression is moved
    /// into the row bounds.
    pub fn rows(&self) -> Result<Vec<Row>> {
        self.check_sealed("rows()")?;
        let rows = self.constraints.borrow().iter().map(|nc| {
            let (entries,constant) = nc.constraint.expr().linear_parts();
            self.check_columns(&entries,&format!("constraint `{}`",nc.name))?;
            Ok(Row{
                name    : nc.name.clone(),
                bounds  : BoundKind::from_bounds(nc.constraint.lower().map(|l| l-constant),
                                                 nc.constraint.upper().map(|u| u-constant)),
                entries
            })
        }).collect::<Result<Vec<Row>>>()?;
        debug!("flattened {} rows over {} columns",rows.len(),self.variable_count());
        Ok(rows)
    }

    /// The objective as sparse entries plus a constant.
    pub fn objective_row(&self) -> Result<ObjectiveRow> {
        self.check_sealed("objective_row()")?;
        let obj = self.objective.borrow();
        let (entries,constant) = obj.expr.linear_parts();
        self.check_columns(&entries,"objective")?;
        Ok(ObjectiveRow{ name : obj.name.clone(), sense : obj.sense, entries, constant })
    }

    //======================================================
    // Solve
    //======================================================

    /// Solve the model with a solver backend.
    pub fn solve<S : SolverBackend>(&self, solver : &mut S) -> Result<Solution> {
        self.check_sealed("solve()")?;
        solver.solve(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    index_set!(A);
    index_set!(B);
    range_bound!(N);
    range_set!(K = 1 ..= N);

    #[test]
    fn seal_layout() {
        let mut m = Model::new(Some("layout"));
        m.add_labels::<A,_>(["a1","a2"]).unwrap();
        m.add_labels::<B,_>(["b1","b2","b3"]).unwrap();
        m.set_value::<N>(4).unwrap();

        let x : VariableSet<(Index<A>,Index<B>)> = m.variable(Some("x"),greater_equal(0.0));
        let y : VariableSet<()> = m.variable(None,unbounded());
        let z : VariableSet<(Index<B>,Index<K>)> = m.variable(Some("z"),in_range(-1.0,1.0).integer());

        assert!(matches!(x.try_at((Index::new(0),Index::new(0))),Err(ModelError::NotSealed(_))));
        assert!(m.columns().is_err());

        m.seal_data().unwrap();
        assert!(matches!(m.seal_data(),Err(ModelError::Sealed(_))));
        assert!(matches!(m.add_label::<A>("a3"),Err(ModelError::Sealed(_))));
        assert!(m.try_variable::<(),_>(Some("w"),unbounded()).is_err());

        assert_eq!(x.start_index(),Some(0));
        assert_eq!(y.start_index(),Some(6));
        assert_eq!(z.start_index(),Some(7));
        assert_eq!(m.variable_count(),19);

        assert_eq!(m.variable_set_from_absolute_index(0).unwrap().name(),"x");
        assert_eq!(m.variable_set_from_absolute_index(5).unwrap().name(),"x");
        assert_eq!(m.variable_set_from_absolute_index(6).unwrap().name(),"x1");
        assert_eq!(m.variable_set_from_absolute_index(7).unwrap().name(),"z");
        assert_eq!(m.variable_set_from_absolute_index(18).unwrap().name(),"z");
        assert!(m.variable_set_from_absolute_index(19).is_err());

        assert_eq!(m.variable_name(4).unwrap(),"x[a2,b2]");
        assert_eq!(m.variable_name(6).unwrap(),"x1");
        assert_eq!(m.variable_name(18).unwrap(),"z[b3,4]");

        let c = m.column(10).unwrap();
        assert_eq!(c.bounds,BoundKind::Double(-1.0,1.0));
        assert!(c.is_integer);
        assert_eq!(m.column(6).unwrap().bounds,BoundKind::Free);
        assert_eq!(m.column(0).unwrap().bounds,BoundKind::Lower(0.0));
        assert_eq!(x.at((Index::new(1),Index::new(2))),Expr::Variable(VariableRef::new(0,5)));
    }

    #[test]
    fn constraints_and_objective() {
        let mut m = Model::new(None);
        m.add_labels::<A,_>(["a1","a2"]).unwrap();
        let x : VariableSet<Index<A>> = m.variable(Some("x"),greater_equal(0.0));
        m.seal_data().unwrap();

        m.subject_to(Some("lim"),|i : Index<A>| (x.at(i) + 3.0).leq(10.0));
        m.constraint(None,m.sum(|i| x.at(i)).equals(1.0));
        m.constraint(Some("rng"),Expr::constant(-1.0).leq(x.at(Index::new(0)) - x.at(Index::new(1))).leq(1.0));

        let rows = m.rows().unwrap();
        assert_eq!(rows.len(),4);
        assert_eq!(rows[0].name,"lim[a1]");
        assert_eq!(rows[0].bounds,BoundKind::Upper(7.0));
        assert_eq!(rows[0].entries,vec![(0,1.0)]);
        assert_eq!(rows[2].name,"c2");
        assert_eq!(rows[2].bounds,BoundKind::Fixed(1.0));
        assert_eq!(rows[3].bounds,BoundKind::Double(-1.0,1.0));
        assert_eq!(rows[3].entries,vec![(0,1.0),(1,-1.0)]);

        m.minimize(Some("first"),m.sum(|i| x.at(i)) + 2.0);
        m.maximize(Some("cost"),3.0 * x.at(Index::new(1)));
        let obj = m.objective_row().unwrap();
        assert_eq!(obj.sense,Sense::Maximize);
        assert_eq!(obj.name,"cost");
        assert_eq!(obj.entries,vec![(1,3.0)]);
        assert_eq!(obj.constant,0.0);
    }

    #[test]
    fn errors_propagate() {
        let mut m = Model::new(None);
        m.add_labels::<A,_>(["a1","a2"]).unwrap();
        let x : VariableSet<Index<A>> = m.variable(Some("x"),unbounded());
        m.seal_data().unwrap();

        let r = m.try_sum(|i : Index<A>| x.at(i).try_mul(x.at(i)));
        assert!(matches!(r,Err(ModelError::NonlinearExpression(_))));
        let r = m.try_subject_to(Some("bad"),|i : Index<A>| Expr::constant(1.0).try_leq(i.ord() as f64));
        assert!(matches!(r,Err(ModelError::Unsupported(_))));
        assert_eq!(m.constraint_count(),0);

        let r = m.try_sum(|_ : Index<K>| Ok(Expr::zero()));
        assert!(matches!(r,Err(ModelError::IncompleteData(_))));

        m.constraint(None,x.at(Index::new(0)).leq(1.0));
        assert!(m.rows().is_ok());
        // a column that does not exist in this model
        m.constraint(None,(x.at(Index::new(0)) * 2.0 + Expr::Variable(VariableRef::new(5,0))).leq(1.0));
        assert!(matches!(m.rows(),Err(ModelError::InvalidIndex(_))));
    }
}
