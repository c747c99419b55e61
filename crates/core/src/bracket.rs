use thiserror::Error;

/// Errors that can occur when creating a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("bracket endpoints must be finite, got [{low}, {high}]")]
    NonFinite { low: f64, high: f64 },

    /// The lower endpoint is not strictly below the upper endpoint.
    #[error("bracket requires low < high, got [{low}, {high}]")]
    Empty { low: f64, high: f64 },
}

/// A finite search interval with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bracket {
    low: f64,
    high: f64,
}

impl Bracket {
    /// Creates a validated bracket.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NonFinite`] if either endpoint is NaN or
    /// infinite, and [`BracketError::Empty`] if `low >= high`.
    pub fn new(low: f64, high: f64) -> Result<Self, BracketError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(BracketError::NonFinite { low, high });
        }
        if low >= high {
            return Err(BracketError::Empty { low, high });
        }
        Ok(Self { low, high })
    }

    /// Returns the lower endpoint.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Returns the upper endpoint.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Returns the endpoints as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.low, self.high]
    }

    /// Returns the interval width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the interval midpoint.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    /// Returns true if `x` lies in the closed interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    /// Returns true if `x` lies within the interval extended by
    /// `margin * width` on both sides.
    #[must_use]
    pub fn contains_with_margin(&self, x: f64, margin: f64) -> bool {
        let pad = margin * self.width();
        self.low - pad <= x && x <= self.high + pad
    }
}

impl TryFrom<[f64; 2]> for Bracket {
    type Error = BracketError;

    fn try_from([low, high]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}
