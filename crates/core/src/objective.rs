use std::convert::Infallible;

/// A scalar function of one real variable.
///
/// Objectives must be deterministic: evaluating the same `x` twice yields the
/// same result. Solvers rely on this to reuse evaluations between iterations.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when `x` lies outside the function's domain.
    fn value(&self, x: f64) -> Result<f64, Self::Error>;
}

/// Where the derivatives of a [`Differentiable`] objective come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DerivativeSource {
    /// Closed-form derivatives (symbolic or supplied by the caller).
    Analytic,

    /// Finite-difference approximations of the objective.
    Numeric,
}

/// An objective that can report its first and second derivatives.
///
/// Implement this directly when closed-form derivatives are known. Any other
/// objective can be made differentiable by wrapping it in
/// [`FiniteDifference`](crate::FiniteDifference).
pub trait Differentiable: Objective {
    /// Evaluates `f'(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`Objective::Error`] when `x` lies outside the derivative's domain.
    fn derivative(&self, x: f64) -> Result<f64, Self::Error>;

    /// Evaluates `f''(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`Objective::Error`] when `x` lies outside the derivative's domain.
    fn second_derivative(&self, x: f64) -> Result<f64, Self::Error>;

    /// Reports whether the derivatives are analytic or approximated.
    fn derivative_source(&self) -> DerivativeSource {
        DerivativeSource::Analytic
    }
}

/// Adapter that turns a plain closure into an [`Objective`].
///
/// ```
/// use optiviz_core::{FnObjective, Objective};
///
/// let f = FnObjective(|x: f64| (x - 2.0).powi(2));
/// assert_eq!(f.value(3.0), Ok(1.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnObjective<F>(pub F);

impl<F> Objective for FnObjective<F>
where
    F: Fn(f64) -> f64,
{
    type Error = Infallible;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        Ok((self.0)(x))
    }
}

impl<O: Objective + ?Sized> Objective for &O {
    type Error = O::Error;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).value(x)
    }
}

impl<O: Differentiable + ?Sized> Differentiable for &O {
    fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).derivative(x)
    }

    fn second_derivative(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).second_derivative(x)
    }

    fn derivative_source(&self) -> DerivativeSource {
        (**self).derivative_source()
    }
}
