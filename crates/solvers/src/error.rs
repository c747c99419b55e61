use optiviz_core::BracketError;
use thiserror::Error;

use crate::Method;

/// Errors that can occur when validating a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("passive search needs at least 2 samples, got {0}")]
    Samples(usize),

    #[error("delta must satisfy 0 < delta < tolerance / 2, got {delta} for tolerance {tolerance}")]
    Delta { delta: f64, tolerance: f64 },

    #[error("bracket margin must be finite and non-negative, got {0}")]
    Margin(f64),

    #[error("threshold must be finite and positive, got {0}")]
    Threshold(f64),

    #[error("start point must be finite, got {0}")]
    Start(f64),
}

/// A derivative method moved somewhere it cannot recover from.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DivergenceError {
    /// `|f''(x)|` fell below the curvature threshold.
    #[error("second derivative {curvature:e} at x = {x} is too flat for a Newton step")]
    FlatCurvature { x: f64, curvature: f64 },

    /// `|f'(x_k) - f'(x_{k-1})|` fell below the slope threshold.
    #[error("derivative changed by only {change:e} between x = {previous} and x = {x}")]
    FlatSlope { x: f64, previous: f64, change: f64 },

    /// An iterate left the bracket widened by the configured margin.
    #[error("iterate x = {x} left the search region [{low}, {high}]")]
    LeftBracket { x: f64, low: f64, high: f64 },

    /// The step from `x` produced a NaN or infinite iterate.
    #[error("step from x = {x} produced a non-finite iterate")]
    NonFinite { x: f64 },
}

/// The iteration cap was reached before the tolerance was met.
///
/// This is a warning, not a failure: the result still carries the best
/// estimate found. See [`MethodResult::warning`](crate::MethodResult::warning).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error(
    "{method} reached {iters} iterations without meeting tolerance {tolerance:e} (error estimate {error:e})"
)]
pub struct ConvergenceError {
    pub method: Method,
    pub iters: usize,
    pub tolerance: f64,
    pub error: f64,
}

/// Errors that can stop a method run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("method diverged: {0}")]
    Divergence(#[from] DivergenceError),

    /// The objective (or one of its derivatives) failed to evaluate.
    #[error("evaluation failed at x = {x}: {source}")]
    Evaluation {
        x: f64,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("objective returned non-finite value {value} at x = {x}")]
    NonFiniteValue { x: f64, value: f64 },

    /// The method only searches for minima.
    #[error("{method} only supports minimization")]
    UnsupportedGoal { method: Method },
}

impl Error {
    pub(crate) fn evaluation<E>(x: f64, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Evaluation {
            x,
            source: Box::new(source),
        }
    }
}
