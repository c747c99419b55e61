//! Secant method applied to the first derivative.
//!
//! Replaces the second derivative in Newton's step with the slope of the
//! secant through the last two derivative values:
//!
//! ```text
//! x_{k+1} = x_k - g_k (x_k - x_{k-1}) / (g_k - g_{k-1}),   g = f'
//! ```
//!
//! Starts from the bracket endpoints unless start points are given. Like
//! Newton's method it looks for a stationary point and only minimizes.

use log::{debug, warn};
use optiviz_core::{Bracket, Differentiable, IterationRecord, Observer, Point, Probe, Trace};

use crate::{
    Action, ConfigError, DivergenceError, Error, Event, Method, MethodResult, Status,
    evaluate::Evaluator,
    event::record_and_observe,
    iterate::{check_iterate, validate_margin, validate_start, validate_threshold, validate_tolerance},
};

/// Configuration for the secant method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    slope_threshold: f64,
    margin: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iters: 100,
            slope_threshold: 1e-14,
            margin: 1.0,
        }
    }
}

impl Config {
    /// Creates a config with the default slope threshold and margin.
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

    /// Sets the smallest `|g_k - g_{k-1}|` a secant step may divide by.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Threshold`] unless the threshold is finite and positive.
    pub fn with_slope_threshold(self, threshold: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            slope_threshold: validate_threshold(threshold)?,
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
    pub fn slope_threshold(&self) -> f64 {
        self.slope_threshold
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }
}

/// The two points a secant run starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Starts {
    /// The older point; defaults to the bracket's low end.
    pub x0: Option<f64>,

    /// The newer point; defaults to the bracket's high end.
    pub x1: Option<f64>,
}

/// Finds a stationary point of the objective.
///
/// # Errors
///
/// Returns an error if a start point is not finite, if the objective or its
/// derivative fails, or if the iteration diverges.
pub fn minimize<O, Obs>(
    objective: &O,
    bracket: Bracket,
    starts: Starts,
    config: &Config,
    mut observer: Obs,
) -> Result<MethodResult, Error>
where
    O: Differentiable,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let x0 = validate_start(starts.x0.unwrap_or(bracket.low()))?;
    let x1 = validate_start(starts.x1.unwrap_or(bracket.high()))?;
    let mut previous = check_iterate(x0, x0, &bracket, config.margin())?;
    let mut x = check_iterate(x1, x1, &bracket, config.margin())?;

    let mut eval = Evaluator::new(objective);
    let mut trace = Vec::new();
    let mut previous_slope = eval.slope(previous)?;

    let finish = |point: Point,
                  status,
                  iters,
                  eval: &Evaluator<'_, O>,
                  trace: Vec<IterationRecord>| MethodResult {
        method: Method::Secant,
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

        let mut record = IterationRecord {
            iter,
            probe: Probe::Single(point),
            bracket: None,
            best: point,
            slope: Some(slope),
            curvature: None,
            error: slope.abs(),
        };

        if slope.abs() < config.tolerance() {
            record_and_observe(Method::Secant, &mut trace, record, &mut observer);
            debug!("secant: |f'| below tolerance after {iter} iterations at x = {x}");
            return Ok(finish(point, Status::Converged, iter, &eval, trace));
        }

        let change = slope - previous_slope;
        if change.abs() < config.slope_threshold() {
            return Err(DivergenceError::FlatSlope {
                x,
                previous,
                change,
            }
            .into());
        }
        let next = check_iterate(
            x,
            x - slope * (x - previous) / change,
            &bracket,
            config.margin(),
        )?;

        if (next - x).abs() < config.tolerance() {
            let point = eval.point(next)?;
            record.best = point;
            record_and_observe(Method::Secant, &mut trace, record, &mut observer);
            debug!("secant: step below tolerance after {iter} iterations at x = {next}");
            return Ok(finish(point, Status::Converged, iter, &eval, trace));
        }

        if let Some(Action::StopEarly) =
            record_and_observe(Method::Secant, &mut trace, record, &mut observer)
        {
            return Ok(finish(point, Status::StoppedByObserver, iter, &eval, trace));
        }

        previous = x;
        previous_slope = slope;
        x = next;
    }

    warn!(
        "secant: |f'| still above tolerance after {} iterations",
        config.max_iters()
    );
    let point = eval.point(x)?;
    Ok(finish(point, Status::MaxIters, config.max_iters(), &eval, trace))
}

/// Finds a stationary point without observer support.
///
/// # Errors
///
/// Returns an error if a start point is not finite, if the objective or its
/// derivative fails, or if the iteration diverges.
pub fn minimize_unobserved<O: Differentiable>(
    objective: &O,
    bracket: Bracket,
    starts: Starts,
    config: &Config,
) -> Result<MethodResult, Error> {
    minimize(objective, bracket, starts, config, ())
}
