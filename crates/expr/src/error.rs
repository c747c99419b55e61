use thiserror::Error;

/// Errors produced while parsing an expression.
///
/// Positions are zero-based character offsets into the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { position: usize, found: char },

    #[error("invalid number '{literal}' at position {position}")]
    InvalidNumber { position: usize, literal: String },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { position: usize, name: String },

    /// A function name was not followed by a parenthesized argument.
    #[error("function '{name}' at position {position} must be followed by '('")]
    MissingArgument { position: usize, name: String },

    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParen { position: usize },

    #[error("missing operand at position {position}")]
    MissingOperand { position: usize },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { position: usize, token: String },
}

/// Errors produced while evaluating an expression at a point.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvaluationError {
    #[error("division by zero at x = {x}")]
    DivisionByZero { x: f64 },

    /// A function received an argument outside its domain.
    #[error("{function} is undefined for argument {argument} (at x = {x})")]
    Domain {
        function: &'static str,
        x: f64,
        argument: f64,
    },

    #[error("non-finite value at x = {x}")]
    NonFinite { x: f64 },
}
