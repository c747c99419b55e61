use std::{fmt, str::FromStr};

use thiserror::Error;

/// Identifies one of the available optimization methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    /// Uniform sampling over the bracket.
    Passive,

    /// Interval halving with a pair of probes around the midpoint.
    Dichotomy,

    /// Golden section search.
    #[cfg_attr(feature = "serde", serde(rename = "golden"))]
    GoldenSection,

    /// Newton's tangent method on the first derivative.
    Newton,

    /// Secant method on the first derivative.
    Secant,
}

impl Method {
    /// All methods, in the order they are usually presented.
    pub const ALL: [Method; 5] = [
        Self::Passive,
        Self::Dichotomy,
        Self::GoldenSection,
        Self::Newton,
        Self::Secant,
    ];

    /// Returns the short identifier accepted by [`FromStr`].
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::Dichotomy => "dichotomy",
            Self::GoldenSection => "golden",
            Self::Newton => "newton",
            Self::Secant => "secant",
        }
    }

    /// Returns true for methods that shrink a bracket around the optimum.
    #[must_use]
    pub fn is_bracketing(self) -> bool {
        matches!(self, Self::Dichotomy | Self::GoldenSection)
    }

    /// Returns true for methods that need the objective's derivatives.
    #[must_use]
    pub fn uses_derivatives(self) -> bool {
        matches!(self, Self::Newton | Self::Secant)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passive => "Passive search",
            Self::Dichotomy => "Dichotomy",
            Self::GoldenSection => "Golden section",
            Self::Newton => "Newton's tangent method",
            Self::Secant => "Secant method",
        })
    }
}

/// Error returned when a method name is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown method '{0}', expected one of: passive, dichotomy, golden, newton, secant, auto")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passive" => Ok(Self::Passive),
            "dichotomy" => Ok(Self::Dichotomy),
            "golden" | "golden_section" | "golden-section" => Ok(Self::GoldenSection),
            "newton" => Ok(Self::Newton),
            "secant" => Ok(Self::Secant),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// A method choice: either a specific method or automatic selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Choice {
    /// Let [`select`](crate::select) pick a method from the problem profile.
    #[default]
    Auto,

    /// Use the given method.
    Method(Method),
}

impl From<Method> for Choice {
    fn from(method: Method) -> Self {
        Self::Method(method)
    }
}

impl FromStr for Choice {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Method)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.id().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_aliases() {
        assert_eq!("Golden-Section".parse::<Method>(), Ok(Method::GoldenSection));
        assert_eq!(" NEWTON ".parse::<Method>(), Ok(Method::Newton));
    }

    #[test]
    fn choice_accepts_auto() {
        assert_eq!("auto".parse::<Choice>(), Ok(Choice::Auto));
        assert_eq!("secant".parse::<Choice>(), Ok(Choice::Method(Method::Secant)));
        assert!(matches!("bisection".parse::<Choice>(), Err(UnknownMethod(name)) if name == "bisection"));
    }

    #[test]
    fn classification() {
        assert!(Method::GoldenSection.is_bracketing());
        assert!(!Method::Passive.is_bracketing());
        assert!(Method::Secant.uses_derivatives());
        assert!(!Method::Dichotomy.uses_derivatives());
    }
}
