//! Passive (uniform grid) search.
//!
//! Evaluates the objective at `N` evenly spaced points across the bracket and
//! keeps the best one. No point depends on an earlier evaluation, which makes
//! it a useful baseline when comparing against the sequential methods.
//!
//! Each sample produces one record; its `error` is the grid spacing. The run
//! always ends with [`Status::Exhausted`] unless an observer stops it.

use log::debug;
use optiviz_core::{Bracket, IterationRecord, Objective, Observer, Point, Probe, Trace};

use crate::{
    Action, ConfigError, Error, Event, Method, MethodResult, Status,
    evaluate::Evaluator,
    event::record_and_observe,
};

/// Configuration for passive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { samples: 50 }
    }
}

impl Config {
    /// Creates a config with the given number of samples.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Samples`] if `samples < 2`.
    pub fn new(samples: usize) -> Result<Self, ConfigError> {
        if samples < 2 {
            return Err(ConfigError::Samples(samples));
        }
        Ok(Self { samples })
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// Returns the `i`-th of `n` grid points, with the last one exactly `high`.
fn grid_point(bracket: &Bracket, i: usize, n: usize) -> f64 {
    if i + 1 == n {
        bracket.high()
    } else {
        bracket.low() + i as f64 * bracket.width() / (n - 1) as f64
    }
}

/// Finds the smallest sampled value.
///
/// Ties go to the first sample that reached the value.
///
/// # Errors
///
/// Returns an error if the objective fails at any sample.
pub fn minimize<O, Obs>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
    observer: Obs,
) -> Result<MethodResult, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(objective, bracket, config, observer, |v| v)
}

/// Finds the smallest sampled value without observer support.
///
/// # Errors
///
/// Returns an error if the objective fails at any sample.
pub fn minimize_unobserved<O: Objective>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
) -> Result<MethodResult, Error> {
    minimize(objective, bracket, config, ())
}

/// Finds the largest sampled value.
///
/// # Errors
///
/// Returns an error if the objective fails at any sample.
pub fn maximize<O, Obs>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
    observer: Obs,
) -> Result<MethodResult, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(objective, bracket, config, observer, |v| -v)
}

/// Finds the largest sampled value without observer support.
///
/// # Errors
///
/// Returns an error if the objective fails at any sample.
pub fn maximize_unobserved<O: Objective>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
) -> Result<MethodResult, Error> {
    maximize(objective, bracket, config, ())
}

fn search<O, Obs, F>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
    mut observer: Obs,
    transform: F,
) -> Result<MethodResult, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
    F: Fn(f64) -> f64,
{
    let n = config.samples();
    let spacing = bracket.width() / (n - 1) as f64;
    let mut eval = Evaluator::new(objective);
    let mut trace = Vec::new();
    let mut best = Point::new(bracket.low(), f64::NAN);

    for i in 0..n {
        let point = eval.point(grid_point(&bracket, i, n))?;
        if i == 0 || transform(point.value) < transform(best.value) {
            best = point;
        }

        let record = IterationRecord {
            iter: i + 1,
            probe: Probe::Single(point),
            bracket: None,
            best,
            slope: None,
            curvature: None,
            error: spacing,
        };
        if let Some(Action::StopEarly) =
            record_and_observe(Method::Passive, &mut trace, record, &mut observer)
        {
            return Ok(finish(best, Status::StoppedByObserver, i + 1, &eval, spacing, trace));
        }
    }

    debug!("passive: best of {n} samples at x = {}", best.x);
    Ok(finish(best, Status::Exhausted, n, &eval, spacing, trace))
}

fn finish<O: Objective>(
    best: Point,
    status: Status,
    iters: usize,
    eval: &Evaluator<'_, O>,
    spacing: f64,
    trace: Vec<IterationRecord>,
) -> MethodResult {
    MethodResult {
        method: Method::Passive,
        status,
        x: best.x,
        value: best.value,
        iters,
        evaluations: eval.evaluations(),
        tolerance: spacing,
        trace: Trace::from(trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use optiviz_core::FnObjective;

    fn bracket(low: f64, high: f64) -> Bracket {
        Bracket::new(low, high).expect("valid bracket")
    }

    #[test]
    fn samples_evenly_including_both_ends() {
        let f = FnObjective(|x: f64| (x - 5.0).powi(2));
        let result =
            minimize_unobserved(&f, bracket(0.0, 10.0), &Config::new(5).unwrap()).unwrap();

        let xs: Vec<f64> = result
            .trace
            .iter()
            .flat_map(|r| r.probe.points())
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, [0.0, 2.5, 5.0, 7.5, 10.0]);

        assert_eq!(result.status, Status::Exhausted);
        assert_eq!(result.x, 5.0);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.evaluations, 5);
        assert_relative_eq!(result.tolerance, 2.5);
    }

    #[test]
    fn last_sample_is_exactly_high() {
        let f = FnObjective(|x: f64| x);
        let result =
            maximize_unobserved(&f, bracket(0.1, 0.7), &Config::new(7).unwrap()).unwrap();

        assert_eq!(result.x, 0.7);
    }

    #[test]
    fn first_sample_wins_ties() {
        let f = FnObjective(|x: f64| (x.abs() - 1.0).powi(2));
        let result =
            minimize_unobserved(&f, bracket(-2.0, 2.0), &Config::new(5).unwrap()).unwrap();

        assert_eq!(result.x, -1.0);
    }

    #[test]
    fn best_is_monotone_over_the_trace() {
        let f = FnObjective(f64::sin);
        let result = minimize_unobserved(&f, bracket(0.0, 6.0), &Config::default()).unwrap();

        assert_eq!(result.trace.len(), 50);
        for pair in result.trace.records().windows(2) {
            assert!(pair[1].best.value <= pair[0].best.value);
        }
        assert_relative_eq!(result.value, -1.0, epsilon = 1e-2);
    }

    #[test]
    fn observer_can_stop_early() {
        let f = FnObjective(|x: f64| -x);
        let observer = |event: &Event<'_>| (event.record.iter == 3).then_some(Action::StopEarly);

        let result = minimize(&f, bracket(0.0, 4.0), &Config::new(5).unwrap(), observer).unwrap();

        assert_eq!(result.status, Status::StoppedByObserver);
        assert_eq!(result.iters, 3);
        assert_eq!(result.x, 2.0);
    }

    #[test]
    fn rejects_too_few_samples() {
        assert_eq!(Config::new(1), Err(ConfigError::Samples(1)));
        assert_eq!(Config::default().samples(), 50);
    }
}
