//! Blocking egui window for a rendered method run.
//!
//! See [`show`] and [`ShowConfig`].

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::{Rendering, Series};

/// Options for [`show`].
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// show(curve, rendering, ShowConfig::new().title("Golden section").legend())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// Creates a config with no title, no legend and a linear scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Labels each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Plots the best objective value on a log₁₀ scale.
    ///
    /// Non-positive values are skipped. The width series is always
    /// logarithmic.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

/// Opens a window with the objective curve and probes on the left and the
/// convergence series on the right.
///
/// Blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(curve: Series, rendering: Rendering, config: ShowConfig) -> Result<(), eframe::Error> {
    let title = config.title.clone().unwrap_or_else(|| "optiviz".to_owned());
    eframe::run_native(
        &title,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| {
            Ok(Box::new(PlotApp {
                curve,
                rendering,
                config,
            }))
        }),
    )
}

struct PlotApp {
    curve: Series,
    rendering: Rendering,
    config: ShowConfig,
}

impl PlotApp {
    fn objective_plot(&self, ui: &mut egui::Ui) {
        let mut plot = Plot::new("objective");
        if self.config.legend {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, |plot_ui| {
            let curve: PlotPoints = self.curve.points.iter().copied().collect();
            plot_ui.line(Line::new(curve).name(self.curve.name));

            let probes: PlotPoints = self.rendering.probes.points.iter().copied().collect();
            plot_ui.points(Points::new(probes).radius(3.0).name(self.rendering.probes.name));
        });
    }

    fn convergence_plot(&self, ui: &mut egui::Ui) {
        let mut plot = Plot::new("convergence").x_axis_label("iteration");
        if self.config.legend {
            plot = plot.legend(Legend::default());
        }
        let log_y = self.config.log_y;
        plot.show(ui, |plot_ui| {
            for series in self.rendering.convergence() {
                let points: PlotPoints = if log_y && std::ptr::eq(series, &self.rendering.best_value)
                {
                    series
                        .points
                        .iter()
                        .filter(|p| p[1] > 0.0)
                        .map(|p| [p[0], p[1].log10()])
                        .collect()
                } else {
                    series.points.iter().copied().collect()
                };
                plot_ui.line(Line::new(points).name(series.name));
            }
        });
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.objective_plot(&mut columns[0]);
                self.convergence_plot(&mut columns[1]);
            });
        });
    }
}
