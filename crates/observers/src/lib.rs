//! Trace visualization for optiviz.
//!
//! - [`render`] turns a method's trace into plot-ready [`Series`]
//! - [`Rendering`] builds the same series live as a method observer
//! - [`sample_curve`] samples the objective for the background curve
//!
//! # Features
//!
//! - `plot`: enables [`show`], a blocking egui window for a rendered run.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//! - `serde`: serializes [`Series`] and [`Rendering`].

mod curve;
mod render;

#[cfg(feature = "plot")]
mod plot;

pub use curve::sample_curve;
pub use render::{Rendering, Series, render};

#[cfg(feature = "plot")]
pub use plot::{ShowConfig, show};
