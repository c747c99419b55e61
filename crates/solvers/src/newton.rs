//! Newton's tangent method applied to the first derivative.
//!
//! Iterates `x ← x - f'(x) / f''(x)` from a start point, which defaults to
//! the bracket midpoint. The method looks for a stationary point, so it only
//! minimizes; the run stops when `|f'(x)|` or the step length drops below the
//! tolerance.
//!
//! Divergence is fatal: a nearly flat second derivative, an iterate outside
//! the bracket widened by the configured margin, or a non-finite iterate each
//! end the run with a [`DivergenceError`](crate::DivergenceError).

use log::{debug, warn};
use optiviz_core::{Bracket, Differentiable, IterationRecord, Observer, Point, Probe, Trace};

use crate::{
    Action, ConfigError, DivergenceError, Error, Event, Method, MethodResult, Status,
    evaluate::Evaluator,
    event::record_and_observe,
    iterate::{check_iterate, validate_margin, validate_start, validate_threshold, validate_tolerance},
};

/// Configuration for Newton's method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    curvature_threshold: f64,
    margin: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iters: 100,
            curvature_threshold: 1e-12,
            margin: 1.0,
        }
    }
}

impl Config {
    /// Creates a config with the default curvature threshold and margin.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive or if
    /// `max_iters` is zero.
    pub fn new(tolerance: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(Self {
            tolerance: validate_tolerance(tolerance)?,
            max_iters,
            ..Self::default()
        })
    }

    /// Sets the `|f''|` below which a step is refused.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Threshold`] unless the threshold is finite and positive.
    pub fn with_curvature_threshold(self, threshold: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            curvature_threshold: validate_threshold(threshold)?,
            ..self
        })
    }

    /// Sets how far, in bracket widths, iterates may stray outside the bracket.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Margin`] unless the margin is finite and non-negative.
    pub fn with_margin(self, margin: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            margin: validate_margin(margin)?,
            ..self
        })
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn curvature_threshold(&self) -> f64 {
        self.curvature_threshold
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }
}

/// Finds a stationary point of the objective, starting from `start` or the
/// bracket midpoint.
///
/// # Errors
///
/// Returns an error if the start point is not finite, if the objective or its
/// derivatives fail, or if the iteration diverges.
pub fn minimize<O, Obs>(
    objective: &O,
    bracket: Bracket,
    start: Option<f64>,
    config: &Config,
    mut observer: Obs,
) -> Result<MethodResult, Error>
where
    O: Differentiable,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let start = validate_start(start.unwrap_or_else(|| bracket.midpoint()))?;
    let mut x = check_iterate(start, start, &bracket, config.margin())?;
    let mut eval = Evaluator::new(objective);
    let mut trace = Vec::new();

    let finish = |point: Point,
                  status,
                  iters,
                  eval: &Evaluator<'_, O>,
                  trace: Vec<IterationRecord>| MethodResult {
        method: Method::Newton,
        status,
        x: point.x,
        value: point.value,
        iters,
        evaluations: eval.evaluations(),
        tolerance: config.tolerance(),
        trace: Trace::from(trace),
    };

    for iter in 1..=config.max_iters() {
        let point = eval.point(x)?;
        let slope = eval.slope(x)?;
        let curvature = eval.curvature(x)?;

        let mut record = IterationRecord {
            iter,
            probe: Probe::Single(point),
            bracket: None,
            best: point,
            slope: Some(slope),
            curvature: Some(curvature),
            error: slope.abs(),
        };

        if slope.abs() < config.tolerance() {
            record_and_observe(Method::Newton, &mut trace, record, &mut observer);
            debug!("newton: |f'| below tolerance after {iter} iterations at x = {x}");
            return Ok(finish(point, Status::Converged, iter, &eval, trace));
        }

        if curvature.abs() < config.curvature_threshold() {
            return Err(DivergenceError::FlatCurvature { x, curvature }.into());
        }
        let next = check_iterate(x, x - slope / curvature, &bracket, config.margin())?;
        let step = (next - x).abs();

        // A step shorter than the tolerance is the last one.
        if step < config.tolerance() {
            let point = eval.point(next)?;
            record.best = point;
            record_and_observe(Method::Newton, &mut trace, record, &mut observer);
            debug!("newton: step below tolerance after {iter} iterations at x = {next}");
            return Ok(finish(point, Status::Converged, iter, &eval, trace));
        }

        if let Some(Action::StopEarly) =
            record_and_observe(Method::Newton, &mut trace, record, &mut observer)
        {
            return Ok(finish(point, Status::StoppedByObserver, iter, &eval, trace));
        }
        x = next;
    }

    warn!(
        "newton: |f'| still above tolerance after {} iterations",
        config.max_iters()
    );
    let point = eval.point(x)?;
    Ok(finish(point, Status::MaxIters, config.max_iters(), &eval, trace))
}

/// Finds a stationary point without observer support.
///
/// # Errors
///
/// Returns an error if the start point is not finite, if the objective or its
/// derivatives fail, or if the iteration diverges.
pub fn minimize_unobserved<O: Differentiable>(
    objective: &O,
    bracket: Bracket,
    start: Option<f64>,
    config: &Config,
) -> Result<MethodResult, Error> {
    minimize(objective, bracket, start, config, ())
}
