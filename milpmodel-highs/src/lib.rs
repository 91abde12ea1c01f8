//! This module implements the HiGHS backend for [milpmodel]. It passes the flattened model
//! (columns, rows and objective) of a sealed [Model] to HiGHS and returns a [Solution].
//!
//! Simple mixed integer example:
//! ```
//! use milpmodel::*;
//! use milpmodel_highs::Highs;
//!
//! index_set!(J);
//!
//! let mut m = Model::new(Some("milo1"));
//! m.add_labels::<J,_>(["x1","x2"]).unwrap();
//! let x : VariableSet<Index<J>> = m.variable(Some("x"), greater_equal(0.0).integer());
//! m.seal_data().unwrap();
//!
//! let (x1,x2) = (x.at_labels("x1"),x.at_labels("x2"));
//! m.maximize(None, x1.clone() + 0.64 * x2.clone());
//! m.constraint(Some("c1"), (50.0 * x1.clone() + 31.0 * x2.clone()).leq(250.0));
//! m.constraint(Some("c2"), (3.0 * x1 - 2.0 * x2).geq(-4.0));
//!
//! let sol = m.solve(&mut Highs::new()).unwrap();
//! assert_eq!(sol.status(), SolutionStatus::Optimal);
//! assert!((sol.objective_value() - 5.0).abs() < 1e-6);
//! ```

use highs::{HighsModelStatus,RowProblem};
use itertools::izip;
use log::{debug,info,warn};

use milpmodel::{Model,ModelError,Sense,Solution,SolutionStatus,SolverBackend};

/// A value of a HiGHS option.
#[derive(Clone,Debug,PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Types that can be passed to [Highs::set_option].
pub trait SolverParameterValue {
    fn into_option_value(self) -> OptionValue;
}

impl SolverParameterValue for bool { fn into_option_value(self) -> OptionValue { OptionValue::Bool(self) } }
impl SolverParameterValue for i32  { fn into_option_value(self) -> OptionValue { OptionValue::Int(self) } }
impl SolverParameterValue for f64  { fn into_option_value(self) -> OptionValue { OptionValue::Float(self) } }
impl SolverParameterValue for &str { fn into_option_value(self) -> OptionValue { OptionValue::Str(self.to_string()) } }

/// HiGHS solver adapter.
///
/// Options are kept by the adapter and applied to each solve, in the order they were set.
/// Solver output is off unless [Highs::verbose] is set.
#[derive(Clone,Debug,Default)]
pub struct Highs {
    options : Vec<(String,OptionValue)>,
    verbose : bool,
}

impl Highs {
    pub fn new() -> Highs { Default::default() }

    /// Set a HiGHS option, for example `time_limit` or `mip_rel_gap`. Setting the same option
    /// again replaces the value.
    ///
    /// # Arguments
    /// - `name` HiGHS option name.
    /// - `value` A `bool`, `i32`, `f64` or `&str`, matching the type of the option.
    ///
    /// Options are passed to HiGHS by [SolverBackend::solve]. An unknown name or a value of the
    /// wrong type makes `solve` return [ModelError::Solver].
    pub fn set_option<V>(&mut self, name : &str, value : V) -> &mut Highs where V : SolverParameterValue {
        let value = value.into_option_value();
        match self.options.iter_mut().find(|(k,_)| k == name) {
            Some((_,v)) => *v = value,
            None => self.options.push((name.to_string(),value)),
        }
        self
    }

    pub fn options(&self) -> &[(String,OptionValue)] { self.options.as_slice() }

    /// Enable or disable solver output.
    pub fn verbose(&mut self, verbose : bool) -> &mut Highs { self.verbose = verbose; self }

    fn build(&self, model : &Model) -> Result<(RowProblem,Vec<f64>),ModelError> {
        let columns = model.columns()?;
        let rows = model.rows()?;
        let obj = model.objective_row()?;

        let mut cost = vec![0.0; columns.len()];
        obj.entries.iter().for_each(|&(j,c)| cost[j] = c);

        let mut pb = RowProblem::default();
        let cols : Vec<highs::Col> = izip!(columns.iter(),cost.iter()).map(|(c,&cj)| {
            let bounds = c.bounds.lower()..=c.bounds.upper();
            if c.is_integer { pb.add_integer_column(cj,bounds) }
            else            { pb.add_column(cj,bounds) }
        }).collect();

        for r in rows.iter() {
            pb.add_row(r.bounds.lower()..=r.bounds.upper(),
                       r.entries.iter().map(|&(j,c)| (cols[j],c)));
        }
        debug!("HiGHS problem: {} columns, {} rows, {} integer",
               columns.len(),
               rows.len(),
               columns.iter().filter(|c| c.is_integer).count());
        Ok((pb,cost))
    }
}

/// `highs::Model::set_option` panics when HiGHS rejects an option. The panic is caught here and
/// reported as [ModelError::Solver].
fn apply_option(hm : &mut highs::Model, name : &str, value : &OptionValue) -> Result<(),ModelError> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| match value {
        OptionValue::Bool(v)  => { hm.set_option(name,*v); },
        OptionValue::Int(v)   => { hm.set_option(name,*v); },
        OptionValue::Float(v) => { hm.set_option(name,*v); },
        OptionValue::Str(v)   => { hm.set_option(name,v.as_str()); },
    }))
    .map_err(|_| ModelError::Solver(format!("HiGHS rejected option `{}` = {:?}",name,value)))
}

fn solution_status(status : HighsModelStatus, has_values : bool) -> SolutionStatus {
    match status {
        HighsModelStatus::Optimal => SolutionStatus::Optimal,
        HighsModelStatus::Infeasible => SolutionStatus::Infeasible,
        HighsModelStatus::Unbounded => SolutionStatus::Unbounded,
        HighsModelStatus::ObjectiveBound |
        HighsModelStatus::ObjectiveTarget |
        HighsModelStatus::ReachedTimeLimit |
        HighsModelStatus::ReachedIterationLimit if has_values => SolutionStatus::Feasible,
        _ => SolutionStatus::Unknown
    }
}

impl SolverBackend for Highs {
    fn solve(&mut self, model : &Model) -> Result<Solution,ModelError> {
        let obj = model.objective_row()?;
        if model.variable_count() == 0 {
            // nothing for HiGHS to do, every row is constant
            let feasible = model.rows()?.iter().all(|r| r.bounds.lower() <= 0.0 && 0.0 <= r.bounds.upper());
            let status = if feasible { SolutionStatus::Optimal } else { SolutionStatus::Infeasible };
            return Ok(Solution::new(status,Vec::new(),obj.constant));
        }

        let (pb,cost) = self.build(model)?;
        let mut hm = pb.optimise(match obj.sense { Sense::Minimize => highs::Sense::Minimise, Sense::Maximize => highs::Sense::Maximise });
        hm.set_option("output_flag",self.verbose);
        hm.set_option("log_to_console",self.verbose);
        for (name,value) in self.options.iter() {
            apply_option(&mut hm,name,value)?;
            debug!("HiGHS option {} = {:?}",name,value);
        }

        let solved = hm.try_solve()
            .map_err(|e| ModelError::Solver(format!("HiGHS failed on `{}`: {:?}",model.name().unwrap_or("model"),e)))?;
        let hstatus = solved.status();
        let primal : Vec<f64> = solved.get_solution().columns().to_vec();
        let has_values = primal.len() == cost.len();
        let status = solution_status(hstatus,has_values);

        let primal = if has_values { primal } else { vec![0.0; cost.len()] };
        let objective = obj.constant + cost.iter().zip(primal.iter()).map(|(c,x)| c*x).sum::<f64>();

        match status {
            SolutionStatus::Optimal | SolutionStatus::Feasible =>
                info!("HiGHS: {:?}, objective {}",hstatus,objective),
            _ => warn!("HiGHS: model `{}` finished with status {:?}",model.name().unwrap_or("model"),hstatus),
        }
        Ok(Solution::new(status,primal,objective))
    }
}
