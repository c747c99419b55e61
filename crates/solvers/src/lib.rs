//! One-dimensional optimization methods for optiviz.
//!
//! # Methods
//!
//! - [`passive`]: uniform sampling, the baseline
//! - [`dichotomy`]: interval halving with two probes around the midpoint
//! - [`golden_section`]: interval shrinking by the golden ratio
//! - [`newton`]: Newton's tangent method on the first derivative
//! - [`secant`]: secant method on the first derivative
//!
//! Every method appends one [`IterationRecord`](optiviz_core::IterationRecord)
//! per iteration to a trace, shows it to an observer as an [`Event`], and
//! returns a [`MethodResult`].
//!
//! [`run`] dispatches a [`Request`] to the chosen method, using [`select`] to
//! pick one when the choice is [`Choice::Auto`].

mod error;
mod evaluate;
mod event;
mod iterate;
mod method;
mod result;
mod run;
mod select;

pub mod dichotomy;
pub mod golden_section;
pub mod newton;
pub mod passive;
pub mod secant;

pub use error::{ConfigError, ConvergenceError, DivergenceError, Error};
pub use event::{Action, Event};
pub use method::{Choice, Method, UnknownMethod};
pub use result::{Goal, MethodResult, Status};
pub use run::{Request, run, run_method};
pub use select::{COARSE_DIVISOR, Derivatives, NEWTON_MAX_WIDTH, Profile, select};
