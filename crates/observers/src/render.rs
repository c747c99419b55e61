//! Turns a method's iteration records into plot-ready series.
//!
//! See [`render`] for whole traces and [`Rendering`] for building the same
//! series live while a method runs.

use optiviz_core::{IterationRecord, Observer, Trace};
use optiviz_solvers::{Action, Event};

/// A named sequence of `[x, y]` points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            points: Vec::new(),
        }
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The series a trace renders into.
///
/// Iteration-indexed series use the record's `iter` as their x value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rendering {
    /// Iteration vs the best x so far.
    pub best_x: Series,

    /// Iteration vs the best objective value so far.
    pub best_value: Series,

    /// Iteration vs log₁₀ of the interval width.
    ///
    /// Empty unless the records carry an interval. Records whose width is
    /// not positive are skipped.
    pub log_width: Series,

    /// Every probed `(x, f(x))`, in evaluation order.
    pub probes: Series,
}

impl Default for Rendering {
    fn default() -> Self {
        Self::new()
    }
}

impl Rendering {
    /// Creates a rendering with empty series.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best_x: Series::new("best x"),
            best_value: Series::new("best f(x)"),
            log_width: Series::new("log10 width"),
            probes: Series::new("probes"),
        }
    }

    /// Adds one iteration record to every series it contributes to.
    pub fn push(&mut self, record: &IterationRecord) {
        #[allow(clippy::cast_precision_loss)]
        let iter = record.iter as f64;

        self.best_x.points.push([iter, record.best.x]);
        self.best_value.points.push([iter, record.best.value]);

        if let Some(width) = record.width().filter(|w| *w > 0.0) {
            self.log_width.points.push([iter, width.log10()]);
        }

        self.probes.points.extend(
            record
                .probe
                .points()
                .into_iter()
                .map(|point| [point.x, point.value]),
        );
    }

    /// Returns the iteration-indexed series that have points.
    pub fn convergence(&self) -> impl Iterator<Item = &Series> {
        [&self.best_x, &self.best_value, &self.log_width]
            .into_iter()
            .filter(|series| !series.is_empty())
    }
}

/// Renders a whole trace.
#[must_use]
pub fn render(trace: &Trace) -> Rendering {
    let mut rendering = Rendering::new();
    for record in trace {
        rendering.push(record);
    }
    rendering
}

/// Lets a [`Rendering`] follow a method run as its observer.
impl Observer<Event<'_>, Action> for Rendering {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        self.push(event.record);
        None
    }
}

/// Allows `&mut Rendering` to be passed to methods that take an observer by
/// value, so the rendering stays usable after the run.
impl Observer<Event<'_>, Action> for &mut Rendering {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use optiviz_core::{Bracket, Point, Probe};
    use optiviz_expr::Function;
    use optiviz_solvers::{Method, Request, golden_section, newton, run};

    fn bracketing_record(iter: usize, bracket: [f64; 2]) -> IterationRecord {
        let a = Point::new(bracket[0] + 0.25, 1.0);
        let b = Point::new(bracket[1] - 0.25, 2.0);
        IterationRecord {
            iter,
            probe: Probe::Pair(a, b),
            bracket: Some(bracket),
            best: a,
            slope: None,
            curvature: None,
            error: bracket[1] - bracket[0],
        }
    }

    #[test]
    fn empty_trace_renders_empty_series() {
        let rendering = render(&Trace::new());

        assert!(rendering.best_x.is_empty());
        assert!(rendering.probes.is_empty());
        assert_eq!(rendering.convergence().count(), 0);
    }

    #[test]
    fn bracketing_records_render_log_width() {
        let trace = Trace::from(vec![
            bracketing_record(1, [0.0, 10.0]),
            bracketing_record(2, [0.0, 1.0]),
            bracketing_record(3, [0.5, 0.5]),
        ]);

        let rendering = render(&trace);

        assert_eq!(rendering.best_x.points.len(), 3);
        assert_eq!(rendering.best_x.points[0], [1.0, 0.25]);
        assert_eq!(rendering.log_width.points.len(), 2);
        assert_relative_eq!(rendering.log_width.points[0][1], 1.0);
        assert_relative_eq!(rendering.log_width.points[1][1], 0.0);
        assert_eq!(rendering.probes.points.len(), 6);
        assert_eq!(rendering.probes.points[1], [9.75, 2.0]);
    }

    #[test]
    fn derivative_methods_have_no_width_series() {
        let f = Function::parse("(x - 1)^2").unwrap();
        let config = newton::Config::default();

        let result =
            newton::minimize_unobserved(&f, Bracket::new(-2.0, 3.0).unwrap(), None, &config)
                .unwrap();
        let rendering = render(&result.trace);

        assert!(rendering.log_width.is_empty());
        assert_eq!(rendering.best_value.points.len(), result.iters);
        assert_eq!(rendering.convergence().count(), 2);
    }

    #[test]
    fn observing_matches_rendering_afterwards() {
        let f = Function::parse("cos(x)").unwrap();
        let request = Request::new(Bracket::new(2.0, 4.0).unwrap()).with_choice(Method::GoldenSection);
        let mut live = Rendering::new();

        let result = run(&f, &request, &mut live).unwrap();

        assert_eq!(live, render(&result.trace));
        assert_eq!(
            live.probes.points.len(),
            2 * result.trace.len(),
            "golden section records both interior points per iteration"
        );
    }

    #[test]
    fn rendering_never_stops_a_run() {
        let f = Function::parse("x^2").unwrap();
        let config = golden_section::Config::default();

        let result = golden_section::minimize(
            &f,
            Bracket::new(-1.0, 1.0).unwrap(),
            &config,
            Rendering::new(),
        )
        .unwrap();

        assert_ne!(result.status, optiviz_solvers::Status::StoppedByObserver);
    }
}
