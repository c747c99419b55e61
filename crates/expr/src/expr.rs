use std::fmt;

use crate::EvaluationError;

/// An elementary function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
}

impl Func {
    /// Looks up a function by name. `log` is the natural logarithm.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    /// Returns the canonical name used when printing.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    /// Applies the function, or returns `None` if `arg` is outside its domain.
    #[must_use]
    pub fn apply(self, arg: f64) -> Option<f64> {
        let value = match self {
            Self::Sin => arg.sin(),
            Self::Cos => arg.cos(),
            Self::Tan => arg.tan(),
            Self::Asin if arg.abs() <= 1.0 => arg.asin(),
            Self::Acos if arg.abs() <= 1.0 => arg.acos(),
            Self::Atan => arg.atan(),
            Self::Sinh => arg.sinh(),
            Self::Cosh => arg.cosh(),
            Self::Tanh => arg.tanh(),
            Self::Exp => arg.exp(),
            Self::Ln if arg > 0.0 => arg.ln(),
            Self::Log10 if arg > 0.0 => arg.log10(),
            Self::Sqrt if arg >= 0.0 => arg.sqrt(),
            Self::Abs => arg.abs(),
            Self::Asin | Self::Acos | Self::Ln | Self::Log10 | Self::Sqrt => return None,
        };
        Some(value)
    }
}

/// A parsed expression in the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Returns true if the expression does not depend on `x`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Const(_) => true,
            Self::Var => false,
            Self::Neg(u) | Self::Call(_, u) => u.is_constant(),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => a.is_constant() && b.is_constant(),
        }
    }

    /// Evaluates the expression at `x`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] on division by zero, on a function
    /// argument outside its domain, or when an intermediate value overflows.
    pub fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Const(c) => *c,
            Self::Var => x,
            Self::Neg(u) => -u.eval(x)?,
            Self::Add(a, b) => a.eval(x)? + b.eval(x)?,
            Self::Sub(a, b) => a.eval(x)? - b.eval(x)?,
            Self::Mul(a, b) => a.eval(x)? * b.eval(x)?,
            Self::Div(a, b) => {
                let numerator = a.eval(x)?;
                let denominator = b.eval(x)?;
                if denominator == 0.0 {
                    return Err(EvaluationError::DivisionByZero { x });
                }
                numerator / denominator
            }
            Self::Pow(a, b) => {
                let base = a.eval(x)?;
                let exponent = b.eval(x)?;
                if base == 0.0 && exponent < 0.0 {
                    return Err(EvaluationError::DivisionByZero { x });
                }
                if base < 0.0 && exponent.fract() != 0.0 {
                    return Err(EvaluationError::Domain {
                        function: "pow",
                        x,
                        argument: base,
                    });
                }
                base.powf(exponent)
            }
            Self::Call(func, u) => {
                let argument = u.eval(x)?;
                func.apply(argument).ok_or(EvaluationError::Domain {
                    function: func.name(),
                    x,
                    argument,
                })?
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NonFinite { x })
        }
    }

    /// Binding strength used to decide where parentheses are needed.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Const(c) if *c < 0.0 => 3,
            Self::Pow(..) => 4,
            Self::Const(_) | Self::Var | Self::Call(..) => 5,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{c}"),
            Self::Var => f.write_str("x"),
            Self::Neg(u) => {
                f.write_str("-")?;
                u.fmt_child(f, 4)
            }
            Self::Add(a, b) => {
                a.fmt_child(f, 1)?;
                f.write_str(" + ")?;
                b.fmt_child(f, 2)
            }
            Self::Sub(a, b) => {
                a.fmt_child(f, 1)?;
                f.write_str(" - ")?;
                b.fmt_child(f, 2)
            }
            Self::Mul(a, b) => {
                a.fmt_child(f, 2)?;
                f.write_str(" * ")?;
                b.fmt_child(f, 3)
            }
            Self::Div(a, b) => {
                a.fmt_child(f, 2)?;
                f.write_str(" / ")?;
                b.fmt_child(f, 3)
            }
            Self::Pow(a, b) => {
                a.fmt_child(f, 5)?;
                f.write_str("^")?;
                b.fmt_child(f, 4)
            }
            Self::Call(func, u) => write!(f, "{}({u})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::parse;

    fn eval(text: &str, x: f64) -> Result<f64, EvaluationError> {
        parse(text).expect("should parse").eval(x)
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_relative_eq!(eval("(x-2)^2 + 3", 5.0).unwrap(), 12.0);
        assert_relative_eq!(eval("2^3^2", 0.0).unwrap(), 512.0);
        assert_relative_eq!(eval("-x^2", 3.0).unwrap(), -9.0);
        assert_relative_eq!(eval("2^-1", 0.0).unwrap(), 0.5);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0).unwrap(), 3.0);
        assert_relative_eq!(eval("12 / 3 / 2", 0.0).unwrap(), 2.0);
    }

    #[test]
    fn evaluates_functions_and_constants() {
        assert_relative_eq!(eval("sin(pi/2) + ln(e)", 0.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(abs(x))", -16.0).unwrap(), 4.0);
        assert_relative_eq!(eval("log10(x)", 1000.0).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(
            eval("1 / x", 0.0),
            Err(EvaluationError::DivisionByZero { x: 0.0 })
        );
        assert_eq!(
            eval("x^-1", 0.0),
            Err(EvaluationError::DivisionByZero { x: 0.0 })
        );
    }

    #[test]
    fn domain_violations_name_the_function() {
        assert!(matches!(
            eval("ln(x)", -1.0),
            Err(EvaluationError::Domain { function: "ln", .. })
        ));
        assert!(matches!(
            eval("sqrt(x - 1)", 0.0),
            Err(EvaluationError::Domain { function: "sqrt", argument, .. }) if argument == -1.0
        ));
        assert!(matches!(
            eval("x^0.5", -4.0),
            Err(EvaluationError::Domain { function: "pow", .. })
        ));
    }

    #[test]
    fn overflow_is_non_finite() {
        assert_eq!(
            eval("exp(x)", 1000.0),
            Err(EvaluationError::NonFinite { x: 1000.0 })
        );
    }

    #[test]
    fn negative_base_with_integer_exponent_is_fine() {
        assert_relative_eq!(eval("x^3", -2.0).unwrap(), -8.0);
    }

    #[test]
    fn display_uses_minimal_parentheses() {
        let cases = [
            ("(x-2)^2 + 3", "(x - 2)^2 + 3"),
            ("x - (1 - x)", "x - (1 - x)"),
            ("(x - 1) - x", "x - 1 - x"),
            ("2^3^2", "2^3^2"),
            ("(2^3)^2", "(2^3)^2"),
            ("-(x + 1)", "-(x + 1)"),
            ("x / (2 * x)", "x / (2 * x)"),
            ("sin(x)^2", "sin(x)^2"),
        ];
        for (input, shown) in cases {
            assert_eq!(parse(input).unwrap().to_string(), shown, "input: {input}");
        }
    }
}
