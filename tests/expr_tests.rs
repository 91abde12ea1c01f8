use milpmodel::*;
use rand::Rng;

index_set!(NUTR);
index_set!(FOOD);

fn diet_model() -> (Model,VariableSet<Index<FOOD>>) {
    let mut m = Model::new(Some("M"));
    m.add_labels::<NUTR,_>(["A","B1","B2","C"]).unwrap();
    m.add_labels::<FOOD,_>(["BEEF","CHK","FISH","HAM","MCH","MTL","SPG","TUR"]).unwrap();
    let x : VariableSet<Index<FOOD>> = m.variable(Some("x"), greater_equal(0.0));
    let _ : VariableSet<(Index<NUTR>,Index<FOOD>)> = m.variable(Some("y"), unbounded());
    m.seal_data().unwrap();
    (m,x)
}

#[test]
fn sum_test() {
    let (m,x) = diet_model();

    let e = m.sum(|j : Index<FOOD>| (j.ord() as f64) * x.at(j));
    let Expr::Sum(s) = e else { panic!("expected a sum") };
    assert_eq!(s.len(),8);
    for (k,t) in s.terms().enumerate() {
        assert_eq!(t.variable.absolute_index(),k);
        assert_eq!(t.coefficient,(k+1) as f64);
    }

    // nested sum over a product space visits every element once, last index fastest
    let y = m.variable_set_from_absolute_index(8).unwrap();
    assert_eq!(y.name(),"y");
    let e = m.sum(|(i,j) : (Index<NUTR>,Index<FOOD>)| Expr::constant((i.raw()*8+j.raw()) as f64) * x.at(j));
    let Expr::Sum(s) = e else { panic!("expected a sum") };
    // sum over i of (8 i + j) = 4 j + 8*(0+1+2+3)
    for j in 0..8 {
        assert_eq!(s.coefficient(j),Some((4*j + 48) as f64));
    }
}

#[test]
fn accumulate_random() {
    let (m,x) = diet_model();
    let mut rng = rand::thread_rng();

    let picks : Vec<(usize,f64)> = (0..200).map(|_| (rng.gen_range(0..8),rng.gen_range(-10.0..10.0))).collect();
    let mut expected = [0.0f64;8];
    picks.iter().for_each(|&(j,c)| expected[j] += c);

    let mut e = Expr::zero();
    for &(j,c) in picks.iter() {
        e = e + c * x.at(Index::new(j));
    }
    let Expr::Sum(s) = e else { panic!("expected a sum") };
    assert!(s.len() <= 8);
    for (j,v) in expected.iter().enumerate() {
        let c = s.coefficient(j).unwrap_or(0.0);
        assert!((c - v).abs() < 1e-9, "column {}: {} != {}",j,c,v);
    }

    // the same through the aggregator
    let e2 = m.sum(|_ : ()| picks.iter().map(|&(j,c)| c * x.at(Index::new(j))).sum::<Expr>());
    let Expr::Sum(s2) = e2 else { panic!("expected a sum") };
    for j in 0..8 {
        assert!((s2.coefficient(j).unwrap_or(0.0) - s.coefficient(j).unwrap_or(0.0)).abs() < 1e-9);
    }
}

#[test]
fn scaling_test() {
    let (_m,x) = diet_model();
    let e = x.at(Index::new(0)) + 2.0 * x.at(Index::new(1)) + 3.0;
    let Expr::Sum(s) = Expr::constant(-2.0).try_mul(e.clone()).unwrap() else { panic!("expected a sum") };
    assert_eq!(s.coefficient(0),Some(-2.0));
    assert_eq!(s.coefficient(1),Some(-4.0));
    assert_eq!(s.constant(),-6.0);

    let Expr::Sum(s) = e.clone() / 2.0 else { panic!("expected a sum") };
    assert_eq!(s.coefficient(1),Some(1.0));
    assert_eq!(s.constant(),1.5);

    assert!(matches!(e.clone().try_mul(x.at(Index::new(2))),Err(ModelError::NonlinearExpression(_))));
    assert!(matches!(Expr::constant(1.0).try_div(e),Err(ModelError::NonlinearExpression(_))));
}

#[test]
fn index_errors() {
    let (m,x) = diet_model();
    assert!(matches!(m.index_of::<FOOD>("PORK"),Err(ModelError::InvalidIndex(_))));
    assert!(matches!(x.try_at(Index::new(8)),Err(ModelError::InvalidIndex(_))));
    assert!(matches!(x.try_at_labels("PORK"),Err(ModelError::InvalidIndex(_))));
    assert_eq!(x.at_labels("FISH"),x.at(Index::new(2)));
    assert_eq!(m.label(Index::<NUTR>::new(1)).unwrap(),"B1");
    assert!(matches!(Index::<FOOD>::first().prev(),Err(ModelError::InvalidIndex(_))));
}
