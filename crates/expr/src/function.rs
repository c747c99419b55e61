use std::{fmt, str::FromStr};

use optiviz_core::{DerivativeSource, Differentiable, Objective};

use crate::{EvaluationError, Expr, ParseError, parse};

/// A parsed objective with its first and second derivative expressions.
///
/// # Example
///
/// ```
/// use optiviz_core::{Differentiable, Objective};
/// use optiviz_expr::Function;
///
/// let f = Function::parse("x^3 - 2*x").unwrap();
/// assert_eq!(f.value(2.0), Ok(4.0));
/// assert_eq!(f.derivative(2.0), Ok(10.0));
/// assert_eq!(f.second_derivative(2.0), Ok(12.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    source: String,
    expr: Expr,
    first: Expr,
    second: Expr,
}

impl Function {
    /// Parses `text` and differentiates it symbolically.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `text` is not a valid expression.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::with_derivatives(text, None, None)
    }

    /// Parses `text` using caller-supplied derivative expressions where given.
    ///
    /// A missing `first` is derived from the objective; a missing `second` is
    /// derived from the first derivative, whichever way that was obtained.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] among the three expressions.
    pub fn with_derivatives(
        text: &str,
        first: Option<&str>,
        second: Option<&str>,
    ) -> Result<Self, ParseError> {
        let expr = parse(text)?;
        let first = match first {
            Some(text) => parse(text)?,
            None => expr.derivative(),
        };
        let second = match second {
            Some(text) => parse(text)?,
            None => first.derivative(),
        };
        Ok(Self {
            source: text.trim().to_owned(),
            expr,
            first,
            second,
        })
    }

    /// Returns the source text, trimmed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed objective expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the first derivative expression.
    #[must_use]
    pub fn first(&self) -> &Expr {
        &self.first
    }

    /// Returns the second derivative expression.
    #[must_use]
    pub fn second(&self) -> &Expr {
        &self.second
    }
}

impl FromStr for Function {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Objective for Function {
    type Error = EvaluationError;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        self.expr.eval(x)
    }
}

impl Differentiable for Function {
    fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
        self.first.eval(x)
    }

    fn second_derivative(&self, x: f64) -> Result<f64, Self::Error> {
        self.second.eval(x)
    }

    fn derivative_source(&self) -> DerivativeSource {
        DerivativeSource::Analytic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use optiviz_core::FiniteDifference;

    #[test]
    fn derives_both_derivatives() {
        let f: Function = "sin(x) + x^2".parse().unwrap();

        assert_relative_eq!(f.derivative(0.0).unwrap(), 1.0);
        assert_relative_eq!(f.second_derivative(0.0).unwrap(), 2.0);
        assert_eq!(f.derivative_source(), DerivativeSource::Analytic);
    }

    #[test]
    fn supplied_derivatives_take_precedence() {
        // Deliberately wrong first derivative to show which one is used.
        let f = Function::with_derivatives("x^2", Some("3*x"), None).unwrap();

        assert_relative_eq!(f.derivative(2.0).unwrap(), 6.0);
        assert_relative_eq!(f.second_derivative(2.0).unwrap(), 3.0);

        let g = Function::with_derivatives("x^2", None, Some("7")).unwrap();
        assert_relative_eq!(g.derivative(2.0).unwrap(), 4.0);
        assert_relative_eq!(g.second_derivative(2.0).unwrap(), 7.0);
    }

    #[test]
    fn bad_derivative_text_is_rejected() {
        assert!(matches!(
            Function::with_derivatives("x^2", Some("2*"), None),
            Err(ParseError::MissingOperand { .. })
        ));
    }

    #[test]
    fn failed_parse_keeps_previous_function() {
        let mut f = Function::parse("(x - 2)^2 + 3").unwrap();
        if let Ok(replacement) = Function::parse("(x - 2") {
            f = replacement;
        }

        assert_eq!(f.source(), "(x - 2)^2 + 3");
        assert_relative_eq!(f.value(2.0).unwrap(), 3.0);
    }

    #[test]
    fn agrees_with_finite_differences() {
        let f = Function::parse("exp(-x) * cos(3*x)").unwrap();
        let numeric = FiniteDifference::new(&f);

        for x in [-0.5, 0.1, 1.3] {
            assert_relative_eq!(
                f.derivative(x).unwrap(),
                numeric.derivative(x).unwrap(),
                epsilon = 1e-6
            );
            assert_relative_eq!(
                f.second_derivative(x).unwrap(),
                numeric.second_derivative(x).unwrap(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn evaluation_errors_surface_through_objective() {
        let f = Function::parse("ln(x)").unwrap();
        assert!(matches!(
            f.value(-1.0),
            Err(EvaluationError::Domain { function: "ln", .. })
        ));
        assert_eq!(f.to_string(), "ln(x)");
    }
}
