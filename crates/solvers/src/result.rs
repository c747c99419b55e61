use optiviz_core::Trace;

use crate::{ConvergenceError, Method};

/// How a method run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Passive search evaluated every sample.
    Exhausted,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// Whether a run searches for the smallest or the largest value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Goal {
    #[default]
    Minimize,
    Maximize,
}

/// The outcome of a single method run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodResult {
    /// The method that produced this result.
    pub method: Method,

    /// Final solver status.
    pub status: Status,

    /// Best estimate of the optimum x.
    pub x: f64,

    /// Objective value at the reported x.
    pub value: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// Number of objective evaluations, excluding derivative evaluations.
    pub evaluations: usize,

    /// The tolerance the run was asked to meet.
    ///
    /// For passive search this is the grid spacing.
    pub tolerance: f64,

    /// Every iteration record, in execution order.
    pub trace: Trace,
}

impl MethodResult {
    /// Returns a warning if the run stopped at its iteration cap.
    #[must_use]
    pub fn warning(&self) -> Option<ConvergenceError> {
        (self.status == Status::MaxIters).then(|| ConvergenceError {
            method: self.method,
            iters: self.iters,
            tolerance: self.tolerance,
            error: self.trace.last().map_or(f64::NAN, |record| record.error),
        })
    }
}
