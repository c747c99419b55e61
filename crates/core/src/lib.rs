//! Core traits and types for optiviz.
//!
//! This crate defines the shared abstractions that the expression evaluator,
//! the solvers, and the trace visualizer build on:
//!
//! - [`Objective`]: a scalar function of one real variable
//! - [`Differentiable`]: an objective that also provides first and second
//!   derivatives, either analytic or through [`FiniteDifference`]
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`Bracket`]: a validated search interval `low < high`
//! - [`Trace`]: the append-only sequence of [`IterationRecord`]s a method emits

mod bracket;
mod finite_difference;
mod objective;
mod observer;
mod trace;

pub use bracket::{Bracket, BracketError};
pub use finite_difference::FiniteDifference;
pub use objective::{DerivativeSource, Differentiable, FnObjective, Objective};
pub use observer::Observer;
pub use trace::{IterationRecord, Point, Probe, Trace};
