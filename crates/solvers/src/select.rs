use optiviz_core::{Bracket, DerivativeSource};

use crate::{Goal, Method};

/// Widest bracket for which Newton's method is recommended.
pub const NEWTON_MAX_WIDTH: f64 = 10.0;

/// Tolerances at or above `width / COARSE_DIVISOR` count as coarse.
pub const COARSE_DIVISOR: f64 = 8.0;

/// Which derivatives of the objective are available in closed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Derivatives {
    None,
    First,
    Second,
}

impl From<DerivativeSource> for Derivatives {
    /// Analytic objectives provide both derivatives; numeric ones count as none.
    fn from(source: DerivativeSource) -> Self {
        match source {
            DerivativeSource::Analytic => Self::Second,
            DerivativeSource::Numeric => Self::None,
        }
    }
}

/// What the selector knows about a problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub derivatives: Derivatives,
    pub width: f64,
    pub tolerance: f64,

    /// Derivative methods only minimize, so a maximizing profile never gets one.
    pub goal: Goal,

    /// True when the caller explicitly asked for a sample count.
    pub samples_requested: bool,
}

impl Profile {
    /// Creates a minimizing profile with no derivatives and no requested samples.
    #[must_use]
    pub fn new(bracket: &Bracket, tolerance: f64) -> Self {
        Self {
            derivatives: Derivatives::None,
            width: bracket.width(),
            tolerance,
            goal: Goal::Minimize,
            samples_requested: false,
        }
    }

    #[must_use]
    pub fn with_goal(self, goal: Goal) -> Self {
        Self { goal, ..self }
    }

    #[must_use]
    pub fn with_derivatives(self, derivatives: Derivatives) -> Self {
        Self {
            derivatives,
            ..self
        }
    }

    #[must_use]
    pub fn with_samples_requested(self, samples_requested: bool) -> Self {
        Self {
            samples_requested,
            ..self
        }
    }
}

/// Recommends a method for the profile. The first matching rule wins:
///
/// 1. samples requested: [`Method::Passive`]
/// 2. minimizing, second derivative and `width <= 10`: [`Method::Newton`]
/// 3. minimizing and first derivative: [`Method::Secant`]
/// 4. `tolerance >= width / 8`: [`Method::Dichotomy`]
/// 5. otherwise: [`Method::GoldenSection`]
#[must_use]
pub fn select(profile: &Profile) -> Method {
    let derivatives = match profile.goal {
        Goal::Minimize => profile.derivatives,
        Goal::Maximize => Derivatives::None,
    };

    if profile.samples_requested {
        Method::Passive
    } else if derivatives >= Derivatives::Second && profile.width <= NEWTON_MAX_WIDTH {
        Method::Newton
    } else if derivatives >= Derivatives::First {
        Method::Secant
    } else if profile.tolerance >= profile.width / COARSE_DIVISOR {
        Method::Dichotomy
    } else {
        Method::GoldenSection
    }
}
