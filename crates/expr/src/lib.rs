//! Expression parsing, evaluation and symbolic differentiation.
//!
//! Expressions are written in the single variable `x`:
//!
//! ```
//! use optiviz_core::Objective;
//! use optiviz_expr::Function;
//!
//! let f: Function = "(x - 2)**2 + 3".parse().unwrap();
//! assert_eq!(f.value(2.0), Ok(3.0));
//! assert_eq!(f.first().to_string(), "2 * (x - 2)");
//! ```

mod derive;
mod error;
mod expr;
mod function;
mod lexer;
mod parser;

pub use error::{EvaluationError, ParseError};
pub use expr::{Expr, Func};
pub use function::Function;
pub use parser::parse;
