use std::cell::RefCell;

use approx::assert_relative_eq;
use optiviz_core::{Bracket, Objective, Probe};
use optiviz_expr::{Function, ParseError};
use optiviz_solvers::{
    Action, Choice, Error, Event, Method, Request, Status, dichotomy, golden_section, newton,
    passive, run, run_method, secant,
};

fn bracket(low: f64, high: f64) -> Bracket {
    Bracket::new(low, high).expect("valid bracket")
}

#[test]
fn every_method_finds_the_minimum_of_a_convex_objective() {
    let f = Function::parse("(x - 1.5)^2 + 0.5").unwrap();
    let tolerance = 1e-6;

    for method in Method::ALL {
        let result = if method == Method::Passive {
            // Passive search is only as fine as its grid.
            let request = Request::new(bracket(-2.0, 4.0))
                .with_choice(method)
                .with_samples(601);
            run(&f, &request, ()).unwrap()
        } else {
            run_method(method, &f, [-2.0, 4.0], tolerance).unwrap()
        };

        assert_eq!(result.method, method);
        assert!(
            (result.value - 0.5).abs() <= tolerance,
            "{method}: f(x*) = {}",
            result.value
        );
        assert_relative_eq!(f.value(result.x).unwrap(), result.value);
    }
}

#[test]
fn golden_section_reuses_one_interior_point_per_iteration() {
    let f = Function::parse("exp(x) - 2*x").unwrap();

    let result =
        golden_section::minimize_unobserved(&f, bracket(-1.0, 3.0), &Default::default()).unwrap();

    assert_eq!(result.evaluations, result.iters + 2);

    // Consecutive records share exactly one interior point.
    for pair in result.trace.records().windows(2) {
        let (Probe::Pair(a0, b0), Probe::Pair(a1, b1)) = (pair[0].probe, pair[1].probe) else {
            panic!("golden section records carry two probes");
        };
        let shared = [a1, b1].iter().filter(|p| **p == a0 || **p == b0).count();
        assert_eq!(shared, 1);
    }
}

#[test]
fn dichotomy_shrinks_around_a_known_optimum() {
    let f = Function::parse("(x - 0.7)^2").unwrap();
    let config = dichotomy::Config::new(1e-4, 1000).unwrap();

    let result = dichotomy::minimize_unobserved(&f, bracket(-5.0, 5.0), &config).unwrap();

    let mut previous = 10.0;
    for record in &result.trace {
        let [a, b] = record.bracket.unwrap();
        assert!(b - a < previous);
        assert!(a <= 0.7 && 0.7 <= b);
        previous = b - a;
    }
    assert_eq!(result.status, Status::Converged);
}

#[test]
fn newton_on_a_parabola_converges_quickly() {
    let f = Function::parse("(x-2)^2").unwrap();
    let config = newton::Config::new(1e-6, 100).unwrap();

    let result = newton::minimize_unobserved(&f, bracket(0.0, 4.0), Some(2.1), &config).unwrap();

    assert_eq!(result.status, Status::Converged);
    assert!(result.iters <= 5);
    assert_relative_eq!(result.x, 2.0, epsilon = 1e-6);
}

#[test]
fn passive_search_returns_the_best_grid_sample() {
    let f = Function::parse("(x - 7)^2").unwrap();
    let config = passive::Config::new(5).unwrap();

    let result = passive::minimize_unobserved(&f, bracket(0.0, 10.0), &config).unwrap();

    let xs: Vec<f64> = result
        .trace
        .iter()
        .flat_map(|r| r.probe.points())
        .map(|p| p.x)
        .collect();
    assert_eq!(xs, [0.0, 2.5, 5.0, 7.5, 10.0]);
    assert_eq!(result.x, 7.5);
    assert_eq!(result.value, 0.25);
}

#[test]
fn secant_on_a_cubic_away_from_its_inflection_point() {
    let f = Function::parse("x^3 - x").unwrap();

    let result = secant::minimize_unobserved(
        &f,
        bracket(0.1, 1.5),
        secant::Starts::default(),
        &secant::Config::default(),
    );

    let result = result.expect("should not diverge");
    assert_relative_eq!(result.x, 1.0 / 3.0_f64.sqrt(), epsilon = 1e-5);
}

#[test]
fn parse_errors_leave_the_current_objective_alone() {
    let mut current = Function::parse("x^2").unwrap();

    match Function::parse("x^2 +") {
        Ok(f) => current = f,
        Err(err) => assert!(matches!(err, ParseError::MissingOperand { .. })),
    }

    assert_eq!(current.source(), "x^2");
}

#[test]
fn observers_see_records_in_order_and_can_stop() {
    let f = Function::parse("cosh(x - 1)").unwrap();
    let seen = RefCell::new(Vec::new());
    let observer = |event: &Event<'_>| {
        seen.borrow_mut().push((event.method, event.record.iter));
        (event.record.iter == 3).then_some(Action::StopEarly)
    };
    let request = Request::new(bracket(-4.0, 4.0)).with_choice(Choice::Method(Method::Dichotomy));

    let result = run(&f, &request, observer).unwrap();

    assert_eq!(result.status, Status::StoppedByObserver);
    assert_eq!(
        seen.into_inner(),
        [
            (Method::Dichotomy, 1),
            (Method::Dichotomy, 2),
            (Method::Dichotomy, 3)
        ]
    );
    assert_eq!(result.trace.len(), 3);
}

#[test]
fn domain_errors_surface_with_their_point() {
    let f = Function::parse("ln(x)").unwrap();

    let result = run_method(Method::Passive, &f, [-1.0, 1.0], 1e-3);

    assert!(matches!(result, Err(Error::Evaluation { x, .. }) if x == -1.0));
}
