//! Golden section search.
//!
//! # Algorithm
//!
//! Maintains an interval `[a, b]` and two interior points at
//! `a + (1 - φ⁻¹)·w` and `a + φ⁻¹·w`. Comparing their values tells which end
//! of the interval cannot hold the optimum (for a unimodal objective). After
//! discarding it, one of the old interior points sits exactly where the new
//! interval needs an interior point, so each iteration costs a single new
//! evaluation and shrinks the width by φ⁻¹ ≈ 0.618.
//!
//! A completed run therefore performs `iters + 2` evaluations.
//!
//! # Observer Events
//!
//! One [`Event`] per iteration, after the record is appended. The two initial
//! evaluations do not produce a record. Observers can return
//! [`Action::StopEarly`] to halt with the best point found so far.

mod bracket;
mod state;

#[cfg(test)]
mod tests;

use log::{debug, warn};
use optiviz_core::{Bracket, IterationRecord, Objective, Observer, Probe, Trace};

use crate::{
    Action, ConfigError, Error, Event, Method, MethodResult, Status,
    evaluate::Evaluator,
    event::record_and_observe,
};

use bracket::GoldenBracket;
use state::{Shrink, State};

/// Configuration for golden section search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iters: 500,
        }
    }
}

impl Config {
    /// Creates a new config.
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
            max_iters,
        })
    }

    /// Returns the interval width at which the search stops.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of shrink iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Finds a minimum of a unimodal objective using golden section search.
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

/// Finds a minimum without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
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

/// Finds a maximum of a unimodal objective using golden section search.
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

/// Finds a maximum without observer support.
///
/// This is a convenience wrapper around [`maximize`] that uses a no-op observer.
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

/// Core loop shared by [`minimize`] and [`maximize`].
///
/// `transform` is applied to values before comparison: identity to minimize,
/// negation to maximize.
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
    let golden = GoldenBracket::new(&bracket);
    let mut eval = Evaluator::new(objective);
    let left = eval.point(golden.x1)?;
    let right = eval.point(golden.x2)?;
    let mut state = State::new(golden, left, right, &transform);

    let mut trace = Vec::new();
    let mut iters = 0;
    let mut status = Status::Converged;

    while state.bracket().width() > config.tolerance() {
        if iters == config.max_iters() {
            warn!(
                "golden section: width {:.3e} still above tolerance after {iters} iterations",
                state.bracket().width()
            );
            status = Status::MaxIters;
            break;
        }
        iters += 1;

        let shrink = state.next_shrink(&transform);
        let x = match shrink {
            Shrink::Left(x) | Shrink::Right(x) => x,
        };
        let point = eval.point(x)?;
        state.apply(shrink, point, &transform);

        let (left, right) = state.interior();
        let record = IterationRecord {
            iter: iters,
            probe: Probe::Pair(left, right),
            bracket: Some(state.bracket().as_array()),
            best: state.best(),
            slope: None,
            curvature: None,
            error: state.bracket().width(),
        };
        if let Some(Action::StopEarly) =
            record_and_observe(Method::GoldenSection, &mut trace, record, &mut observer)
        {
            status = Status::StoppedByObserver;
            break;
        }
    }

    let best = state.best();
    debug!("golden section: {status:?} after {iters} iterations at x = {}", best.x);

    Ok(MethodResult {
        method: Method::GoldenSection,
        status,
        x: best.x,
        value: best.value,
        iters,
        evaluations: eval.evaluations(),
        tolerance: config.tolerance(),
        trace: Trace::from(trace),
    })
}
