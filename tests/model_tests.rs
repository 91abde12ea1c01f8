use milpmodel::*;

index_set!(ORIG);
index_set!(DEST);
index_set!(PROD);
range_bound!(T);
range_set!(WEEK  = 1 ..= T);
range_set!(WEEK0 = 0 ..= T);

struct Transp {
    m     : Model,
    trans : VariableSet<(Index<ORIG>,Index<DEST>)>,
}

fn transp() -> Transp {
    let mut m = Model::new(Some("transp"));
    m.add_labels::<ORIG,_>(["GARY","CLEV","PITT"]).unwrap();
    m.add_labels::<DEST,_>(["FRA","DET","LAN"]).unwrap();

    let mut supply = m.parameter::<Index<ORIG>,_>(Some("supply"),greater_equal(0.0));
    let mut demand = m.parameter::<Index<DEST>,_>(Some("demand"),greater_equal(0.0));
    let mut cost   = m.parameter::<(Index<ORIG>,Index<DEST>),_>(Some("cost"),greater_equal(0.0));
    for (o,s) in [("GARY",1400.0),("CLEV",2600.0),("PITT",2900.0)] { supply.add(o,s); }
    for (d,v) in [("FRA",900.0),("DET",1200.0),("LAN",600.0)] { demand.add(d,v); }
    for (o,row) in [("GARY",[39.0,14.0,11.0]),("CLEV",[27.0,9.0,12.0]),("PITT",[24.0,14.0,17.0])] {
        for (d,c) in ["FRA","DET","LAN"].into_iter().zip(row) {
            cost.add((o,d),c);
        }
    }

    let trans : VariableSet<(Index<ORIG>,Index<DEST>)> = m.variable(Some("Trans"),greater_equal(0.0));
    m.seal_data().unwrap();

    m.minimize(Some("Total_Cost"),m.sum(|(i,j)| cost.at((i,j)) * trans.at((i,j))));
    m.subject_to(Some("Supply"),|i : Index<ORIG>| m.sum(|j : Index<DEST>| trans.at((i,j))).leq(supply.at(i)));
    m.subject_to(Some("Demand"),|j : Index<DEST>| m.sum(|i : Index<ORIG>| trans.at((i,j))).equals(demand.at(j)));
    Transp{ m, trans }
}

/// Returns a fixed primal vector, so the value lookups can be checked without a solver.
struct FixedSolution(Vec<f64>);

impl SolverBackend for FixedSolution {
    fn solve(&mut self, model : &Model) -> Result<Solution,ModelError> {
        let obj = model.objective_row()?;
        let value = obj.constant + obj.entries.iter().map(|&(j,c)| c * self.0[j]).sum::<f64>();
        Ok(Solution::new(SolutionStatus::Optimal,self.0.clone(),value))
    }
}

#[test]
fn transp_rows() {
    let t = transp();
    let rows = t.m.rows().unwrap();
    assert_eq!(rows.len(),6);
    assert_eq!(rows[0].name,"Supply[GARY]");
    assert_eq!(rows[0].bounds,BoundKind::Upper(1400.0));
    assert_eq!(rows[0].entries,vec![(0,1.0),(1,1.0),(2,1.0)]);
    assert_eq!(rows[4].name,"Demand[DET]");
    assert_eq!(rows[4].bounds,BoundKind::Fixed(1200.0));
    assert_eq!(rows[4].entries,vec![(1,1.0),(4,1.0),(7,1.0)]);

    let obj = t.m.objective_row().unwrap();
    assert_eq!(obj.sense,Sense::Minimize);
    assert_eq!(obj.entries.len(),9);
    assert_eq!(obj.entries[3],(3,27.0));

    let cols = t.m.columns().unwrap();
    assert_eq!(cols.len(),9);
    assert_eq!(cols[5].name,"Trans[CLEV,LAN]");
    assert!(cols.iter().all(|c| c.bounds == BoundKind::Lower(0.0) && !c.is_integer));
}

#[test]
fn solution_lookup() {
    let t = transp();
    let primal : Vec<f64> = (0..9).map(|k| k as f64).collect();
    let sol = t.m.solve(&mut FixedSolution(primal)).unwrap();
    assert_eq!(sol.status(),SolutionStatus::Optimal);

    let gary = t.m.index_of::<ORIG>("GARY").unwrap();
    let lan  = t.m.index_of::<DEST>("LAN").unwrap();
    assert_eq!(sol.value(&t.trans,(gary,lan)).unwrap(),2.0);

    let values = sol.values(&t.trans).unwrap();
    assert_eq!(values.len(),9);
    assert_eq!(values[7].1,7.0);
    assert_eq!(t.m.label(values[7].0.0).unwrap(),"PITT");
    assert_eq!(t.m.label(values[7].0.1).unwrap(),"DET");

    // 39*0 + 14*1 + 11*2 + 27*3 + 9*4 + 12*5 + 24*6 + 14*7 + 17*8
    assert_eq!(sol.objective_value(),591.0);
    let supply_gary = t.m.sum(|j : Index<DEST>| t.trans.at((gary,j)));
    assert_eq!(sol.evaluate(&supply_gary).unwrap(),3.0);

    let mut total = 0.0;
    sol.for_each_value(&t.trans,|_,v| total += v).unwrap();
    assert_eq!(total,36.0);
}

#[test]
fn lp_writer() {
    let t = transp();
    let mut out : Vec<u8> = Vec::new();
    t.m.write_problem(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("\\ Problem: transp\nMinimize\n Total_Cost: 39 Trans(GARY,FRA) + 14 Trans(GARY,DET)"));
    assert!(text.contains(" Supply(GARY): 1 Trans(GARY,FRA) + 1 Trans(GARY,DET) + 1 Trans(GARY,LAN) <= 1400\n"));
    assert!(text.contains(" Demand(LAN): 1 Trans(GARY,LAN) + 1 Trans(CLEV,LAN) + 1 Trans(PITT,LAN) = 600\n"));
    assert!(text.contains("Bounds\n Trans(GARY,FRA) >= 0\n"));
    assert!(!text.contains("General"));
    assert!(text.ends_with("End\n"));
}

#[test]
fn lp_writer_ranges_and_integers() {
    let mut m = Model::new(None);
    let x : VariableSet<()> = m.variable(Some("x"),in_range(0.0,10.0).integer());
    let y : VariableSet<()> = m.variable(Some("y"),unbounded());
    m.seal_data().unwrap();
    m.maximize(None,x.at(()) - y.at(()) + 1.0);
    m.constraint(Some("r"),Expr::constant(-1.0).leq(x.at(()) - y.at(())).leq(4.0));

    let mut out : Vec<u8> = Vec::new();
    m.write_problem(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Maximize\n obj: 1 x - 1 y + 1\n"));
    assert!(text.contains(" r.lo: 1 x - 1 y >= -1\n r.hi: 1 x - 1 y <= 4\n"));
    assert!(text.contains(" 0 <= x <= 10\n y free\n"));
    assert!(text.contains("General\n x\n"));
}

#[test]
fn steel_ranges() {
    let mut m = Model::new(Some("steelT"));
    m.add_labels::<PROD,_>(["bands","coils"]).unwrap();
    m.set_value::<T>(4).unwrap();

    let mut inv0 = m.parameter::<Index<PROD>,_>(Some("inv0"),greater_equal(0.0));
    inv0.add("bands",10.0);
    let mut avail = m.parameter::<Index<WEEK>,_>(Some("avail"),greater_equal(0.0));
    for (t,a) in [(1,40.0),(2,40.0),(3,32.0),(4,40.0)] { avail.add(t,a); }
    assert_eq!(avail.value(m.range_index::<WEEK>(3).unwrap()),32.0);

    let make : VariableSet<(Index<PROD>,Index<WEEK>)>  = m.variable(Some("Make"),greater_equal(0.0));
    let inv  : VariableSet<(Index<PROD>,Index<WEEK0>)> = m.variable(Some("Inv"),greater_equal(0.0));
    let sell : VariableSet<(Index<PROD>,Index<WEEK>)>  = m.variable(Some("Sell"),greater_equal(0.0));
    m.seal_data().unwrap();
    assert_eq!(m.variable_count(),8+10+8);

    m.subject_to(Some("Init_Inv"),|p : Index<PROD>| inv.at((p,Index::first())).equals(inv0.at(p)));
    m.subject_to(Some("Balance"),|(p,t) : (Index<PROD>,Index<WEEK>)| {
        let t0 = t.convert::<WEEK0>().unwrap();
        (make.at((p,t)) + inv.at((p,t0.prev().unwrap()))).equals(sell.at((p,t)) + inv.at((p,t0)))
    });

    let rows = m.rows().unwrap();
    assert_eq!(rows.len(),2+8);
    assert_eq!(rows[0].name,"Init_Inv[bands]");
    assert_eq!(rows[0].bounds,BoundKind::Fixed(10.0));
    assert_eq!(rows[1].bounds,BoundKind::Fixed(0.0));
    assert_eq!(rows[2].name,"Balance[bands,1]");
    // Make[bands,1] + Inv[bands,0] - Sell[bands,1] - Inv[bands,1] = 0
    assert_eq!(rows[2].entries,vec![(0,1.0),(8,1.0),(9,-1.0),(18,-1.0)]);
    assert_eq!(m.variable_name(13).unwrap(),"Inv[coils,0]");
    assert!(m.range_index::<WEEK>(5).is_err());
    assert!(m.range_index::<WEEK>(0).is_err());
}

#[test]
fn parameter_defaults_and_check() {
    let mut m = Model::new(None);
    m.add_labels::<ORIG,_>(["GARY","CLEV"]).unwrap();
    let mut p = m.parameter::<Index<ORIG>,_>(Some("p"),greater_than(0.0)).with_default(1.0);
    assert_eq!(p.value(Index::first()),1.0);
    assert!(p.check().is_ok());
    p.add("CLEV",0.0);
    assert!(matches!(p.check(),Err(ModelError::DomainViolation(_))));
    assert_eq!(p.value(Index::new(0)),1.0);
    assert!(matches!(p.try_add("PITT",2.0),Err(ModelError::InvalidIndex(_))));
}

#[test]
fn cancelled_terms_dropped() {
    let mut m = Model::new(None);
    let x : VariableSet<()> = m.variable(Some("x"),greater_equal(0.0));
    let y : VariableSet<()> = m.variable(Some("y"),greater_equal(0.0));
    m.seal_data().unwrap();
    m.minimize(None,x.at(()) + y.at(()) - x.at(()));
    m.constraint(Some("r"),(x.at(()) - x.at(()) + 2.0 * y.at(())).leq(4.0));

    let rows = m.rows().unwrap();
    assert_eq!(rows[0].entries,vec![(1,2.0)]);
    assert_eq!(m.objective_row().unwrap().entries,vec![(1,1.0)]);

    let mut out : Vec<u8> = Vec::new();
    m.write_problem(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(" obj: 1 y\n"));
    assert!(text.contains(" r: 2 y <= 4\n"));
    assert!(!text.contains(" 0 x"));
}
