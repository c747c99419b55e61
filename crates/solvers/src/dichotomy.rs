//! Dichotomy search.
//!
//! Each iteration evaluates two probes `m - δ` and `m + δ` around the midpoint
//! `m` of the current interval and keeps the half (plus `δ`) that contains the
//! better probe. The new width is `w / 2 + δ`, so with `δ < tol / 2` the width
//! strictly decreases and eventually drops to the tolerance.
//!
//! The final estimate is the midpoint of the last interval, which costs one
//! extra evaluation: `evaluations == 2 * iters + 1` for a run that completes.

use log::{debug, warn};
use optiviz_core::{Bracket, IterationRecord, Objective, Observer, Point, Probe, Trace};

use crate::{
    Action, ConfigError, Error, Event, Method, MethodResult, Status,
    evaluate::Evaluator,
    event::record_and_observe,
};

/// Configuration for dichotomy search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    delta: f64,
    max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            delta: 1e-5 / 4.0,
            max_iters: 10_000,
        }
    }
}

impl Config {
    /// Creates a config with `δ = tolerance / 4`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive or if
    /// `max_iters` is zero.
    pub fn new(tolerance: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance(tolerance));
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(Self {
            tolerance,
            delta: tolerance / 4.0,
            max_iters,
        })
    }

    /// Replaces the probe offset `δ`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Delta`] unless `0 < delta < tolerance / 2`.
    pub fn with_delta(self, delta: f64) -> Result<Self, ConfigError> {
        if !(delta > 0.0 && delta < self.tolerance / 2.0) {
            return Err(ConfigError::Delta {
                delta,
                tolerance: self.tolerance,
            });
        }
        Ok(Self { delta, ..self })
    }

    /// Returns the interval width at which the search stops.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the probe offset from the midpoint.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Finds a minimum of a unimodal objective.
///
/// # Errors
///
/// Returns an error if the objective fails at any probe.
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

/// Finds a minimum of a unimodal objective without observer support.
///
/// # Errors
///
/// Returns an error if the objective fails at any probe.
pub fn minimize_unobserved<O: Objective>(
    objective: &O,
    bracket: Bracket,
    config: &Config,
) -> Result<MethodResult, Error> {
    minimize(objective, bracket, config, ())
}

/// Finds a maximum of a unimodal objective.
///
/// # Errors
///
/// Returns an error if the objective fails at any probe.
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

/// Finds a maximum of a unimodal objective without observer support.
///
/// # Errors
///
/// Returns an error if the objective fails at any probe.
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
    let (mut a, mut b) = (bracket.low(), bracket.high());
    let delta = config.delta();
    let mut eval = Evaluator::new(objective);
    let mut trace = Vec::new();
    let mut best: Option<Point> = None;
    let mut iters = 0;
    let mut status = Status::Converged;

    while b - a > config.tolerance() {
        if iters == config.max_iters() {
            warn!(
                "dichotomy: width {:.3e} still above tolerance after {iters} iterations",
                b - a
            );
            status = Status::MaxIters;
            break;
        }
        iters += 1;

        let mid = 0.5 * (a + b);
        let left = eval.point(mid - delta)?;
        let right = eval.point(mid + delta)?;

        let better = if transform(left.value) < transform(right.value) {
            b = right.x;
            left
        } else {
            a = left.x;
            right
        };
        let current = match best {
            Some(p) if transform(p.value) <= transform(better.value) => p,
            _ => better,
        };
        best = Some(current);

        let record = IterationRecord {
            iter: iters,
            probe: Probe::Pair(left, right),
            bracket: Some([a, b]),
            best: current,
            slope: None,
            curvature: None,
            error: b - a,
        };
        if let Some(Action::StopEarly) =
            record_and_observe(Method::Dichotomy, &mut trace, record, &mut observer)
        {
            return Ok(MethodResult {
                method: Method::Dichotomy,
                status: Status::StoppedByObserver,
                x: current.x,
                value: current.value,
                iters,
                evaluations: eval.evaluations(),
                tolerance: config.tolerance(),
                trace: Trace::from(trace),
            });
        }
    }

    let estimate = eval.point(0.5 * (a + b))?;
    debug!("dichotomy: {status:?} after {iters} iterations at x = {}", estimate.x);

    Ok(MethodResult {
        method: Method::Dichotomy,
        status,
        x: estimate.x,
        value: estimate.value,
        iters,
        evaluations: eval.evaluations(),
        tolerance: config.tolerance(),
        trace: Trace::from(trace),
    })
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
    fn minimizes_shifted_parabola() {
        let f = FnObjective(|x: f64| (x - 2.0).powi(2) + 3.0);
        let config = Config::new(1e-6, 200).unwrap();

        let result = minimize_unobserved(&f, bracket(-5.0, 5.0), &config).unwrap();

        assert_eq!(result.status, Status::Converged);
        assert_relative_eq!(result.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.value, 3.0, epsilon = 1e-9);
        assert_eq!(result.evaluations, 2 * result.iters + 1);
    }

    #[test]
    fn maximizes_concave_function() {
        let f = FnObjective(|x: f64| -(x + 1.0).powi(2));
        let config = Config::new(1e-4, 200).unwrap();

        let result = maximize_unobserved(&f, bracket(-3.0, 3.0), &config).unwrap();

        assert_relative_eq!(result.x, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn width_strictly_decreases() {
        let f = FnObjective(|x: f64| (x - 0.3).abs());
        let config = Config::new(1e-3, 100).unwrap();

        let result = minimize_unobserved(&f, bracket(0.0, 1.0), &config).unwrap();

        let widths: Vec<f64> = result.trace.iter().filter_map(|r| r.width()).collect();
        assert!(widths.windows(2).all(|w| w[1] < w[0]));
        assert!(result.trace.iter().all(|r| {
            let [a, b] = r.bracket.unwrap();
            a <= 0.3 && 0.3 <= b
        }));
        assert!(*widths.last().unwrap() <= 1e-3);
    }

    #[test]
    fn narrow_bracket_needs_no_iterations() {
        let f = FnObjective(|x: f64| x * x);
        let config = Config::new(0.5, 10).unwrap();

        let result = minimize_unobserved(&f, bracket(0.0, 0.25), &config).unwrap();

        assert_eq!(result.status, Status::Converged);
        assert_eq!(result.iters, 0);
        assert!(result.trace.is_empty());
        assert_relative_eq!(result.x, 0.125);
    }

    #[test]
    fn iteration_cap_is_a_warning() {
        let f = FnObjective(|x: f64| x * x);
        let config = Config::new(1e-9, 3).unwrap();

        let result = minimize_unobserved(&f, bracket(-1.0, 2.0), &config).unwrap();

        assert_eq!(result.status, Status::MaxIters);
        assert_eq!(result.iters, 3);
        let warning = result.warning().expect("should warn");
        assert_relative_eq!(warning.error, result.trace.last().unwrap().width().unwrap());
    }

    #[test]
    fn validates_delta() {
        let config = Config::new(1e-2, 10).unwrap();
        assert_relative_eq!(config.delta(), 2.5e-3);
        assert!(config.with_delta(1e-3).is_ok());
        assert!(matches!(
            config.with_delta(5e-3),
            Err(ConfigError::Delta { .. })
        ));
        assert!(matches!(
            config.with_delta(0.0),
            Err(ConfigError::Delta { .. })
        ));
        assert_eq!(Config::new(-1.0, 10), Err(ConfigError::Tolerance(-1.0)));
        assert_eq!(Config::new(1.0, 0), Err(ConfigError::MaxIters));
    }
}
