use std::cell::Cell;

use approx::assert_relative_eq;
use optiviz_core::{Bracket, FnObjective, Objective};
use thiserror::Error;

use super::{Config, maximize_unobserved, minimize, minimize_unobserved};
use crate::{Action, Error, Event, Status};

fn bracket(low: f64, high: f64) -> Bracket {
    Bracket::new(low, high).expect("valid bracket")
}

#[test]
fn minimizes_polynomial() {
    // Local minimum of x³ - 4x at 2/√3.
    let f = FnObjective(|x: f64| x.powi(3) - 4.0 * x);
    let config = Config::new(1e-7, 200).unwrap();

    let result = minimize_unobserved(&f, bracket(0.0, 2.0), &config).unwrap();

    assert_eq!(result.status, Status::Converged);
    assert_relative_eq!(result.x, 2.0 / 3.0_f64.sqrt(), epsilon = 1e-6);
}

#[test]
fn maximizes_polynomial() {
    // Local maximum of x³ - 4x at -2/√3.
    let f = FnObjective(|x: f64| x.powi(3) - 4.0 * x);
    let config = Config::new(1e-7, 200).unwrap();

    let result = maximize_unobserved(&f, bracket(-2.0, 0.0), &config).unwrap();

    assert_eq!(result.status, Status::Converged);
    assert_relative_eq!(result.x, -2.0 / 3.0_f64.sqrt(), epsilon = 1e-6);
}

/// Counts every evaluation so the reuse of interior points is observable.
struct Counting<'a> {
    calls: &'a Cell<usize>,
}

impl Objective for Counting<'_> {
    type Error = std::convert::Infallible;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        Ok((x - 1.5).powi(2))
    }
}

#[test]
fn one_new_evaluation_per_iteration() {
    let calls = Cell::new(0);
    let f = Counting { calls: &calls };

    let result = minimize_unobserved(&f, bracket(-5.0, 5.0), &Config::default()).unwrap();

    assert!(result.iters > 0);
    assert_eq!(result.evaluations, result.iters + 2);
    assert_eq!(calls.get(), result.evaluations);
}

#[test]
fn width_shrinks_by_the_golden_ratio() {
    let f = FnObjective(|x: f64| (x - 0.7).powi(2));

    let result = minimize_unobserved(&f, bracket(0.0, 1.0), &Config::new(1e-4, 100).unwrap())
        .unwrap();

    let widths: Vec<f64> = result.trace.iter().filter_map(|r| r.width()).collect();
    for pair in widths.windows(2) {
        assert_relative_eq!(pair[1] / pair[0], super::bracket::INV_PHI, epsilon = 1e-9);
    }
    assert!(result.trace.iter().all(|r| {
        let [a, b] = r.bracket.unwrap();
        a <= 0.7 && 0.7 <= b
    }));
}

#[test]
fn observer_can_stop_early() {
    let f = FnObjective(|x: f64| x * x);
    let observer = |event: &Event<'_>| (event.record.iter == 2).then_some(Action::StopEarly);

    let result = minimize(&f, bracket(-1.0, 3.0), &Config::default(), observer).unwrap();

    assert_eq!(result.status, Status::StoppedByObserver);
    assert_eq!(result.iters, 2);
    assert_eq!(result.trace.len(), 2);
    assert_eq!(result.x, result.trace.last().unwrap().best.x);
}

#[test]
fn iteration_cap_reports_warning() {
    let f = FnObjective(|x: f64| x * x);

    let result =
        minimize_unobserved(&f, bracket(-1.0, 3.0), &Config::new(1e-12, 5).unwrap()).unwrap();

    assert_eq!(result.status, Status::MaxIters);
    assert_eq!(result.iters, 5);
    assert!(result.warning().is_some());
}

#[derive(Debug, Error)]
#[error("undefined above {0}")]
struct Undefined(f64);

struct FailsAbove(f64);

impl Objective for FailsAbove {
    type Error = Undefined;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        if x > self.0 { Err(Undefined(self.0)) } else { Ok(x) }
    }
}

#[test]
fn objective_errors_carry_the_point() {
    let result = minimize_unobserved(&FailsAbove(5.0), bracket(0.0, 10.0), &Config::default());

    let Err(Error::Evaluation { x, source }) = result else {
        panic!("expected an evaluation error");
    };
    assert!(x > 5.0);
    assert_eq!(source.to_string(), "undefined above 5");
}
