use crate::{DerivativeSource, Differentiable, Objective};

/// Step used for the central first derivative.
const FIRST_STEP: f64 = 1e-6;

/// Step used for the central second derivative.
///
/// Larger than [`FIRST_STEP`] because the second difference divides by `h²`.
const SECOND_STEP: f64 = 1e-4;

/// Numeric fallback that makes any [`Objective`] [`Differentiable`].
///
/// Derivatives use symmetric differences with fixed steps:
///
/// - `f'(x)  ≈ (f(x + h) - f(x - h)) / 2h`
/// - `f''(x) ≈ (f(x + k) - 2 f(x) + f(x - k)) / k²`
#[derive(Debug, Clone, Copy)]
pub struct FiniteDifference<O> {
    objective: O,
    first_step: f64,
    second_step: f64,
}

impl<O: Objective> FiniteDifference<O> {
    /// Wraps an objective using the default steps.
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            first_step: FIRST_STEP,
            second_step: SECOND_STEP,
        }
    }

    /// Returns the wrapped objective.
    pub fn inner(&self) -> &O {
        &self.objective
    }
}

impl<O: Objective> Objective for FiniteDifference<O> {
    type Error = O::Error;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        self.objective.value(x)
    }
}

impl<O: Objective> Differentiable for FiniteDifference<O> {
    fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
        let h = self.first_step;
        let forward = self.objective.value(x + h)?;
        let backward = self.objective.value(x - h)?;
        Ok((forward - backward) / (2.0 * h))
    }

    fn second_derivative(&self, x: f64) -> Result<f64, Self::Error> {
        let k = self.second_step;
        let forward = self.objective.value(x + k)?;
        let center = self.objective.value(x)?;
        let backward = self.objective.value(x - k)?;
        Ok((forward - 2.0 * center + backward) / (k * k))
    }

    fn derivative_source(&self) -> DerivativeSource {
        DerivativeSource::Numeric
    }
}
