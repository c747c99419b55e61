use std::time::Duration;

use optiviz_core::{IterationRecord, Trace};
use optiviz_observers::Rendering;
use optiviz_solvers::MethodResult;
use serde::Serialize;

/// Everything `--json` prints.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub result: &'a MethodResult,
    pub series: &'a Rendering,
    pub elapsed_ms: f64,
}

impl Report<'_> {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Formats the result summary followed by the iteration table.
pub fn summary(result: &MethodResult, elapsed: Duration) -> String {
    let mut out = format!(
        "method:      {}\n\
         status:      {:?}\n\
         x*:          {:.10}\n\
         f(x*):       {:.10}\n\
         iterations:  {}\n\
         evaluations: {}\n\
         elapsed:     {:.3} ms\n",
        result.method,
        result.status,
        result.x,
        result.value,
        result.iters,
        result.evaluations,
        millis(elapsed),
    );
    if let Some(warning) = result.warning() {
        out.push_str(&format!("warning:     {warning}\n"));
    }
    out.push('\n');
    out.push_str(&table(&result.trace));
    out
}

/// Formats one row per iteration record.
///
/// Interval columns are shown for bracketing records and derivative
/// columns for derivative records; absent values print as `-`.
pub fn table(trace: &Trace) -> String {
    let mut out = format!(
        "{:>5} {:>16} {:>16} {:>16} {:>16} {:>12} {:>12} {:>12}\n",
        "iter", "x", "f(x)", "a", "b", "f'(x)", "f''(x)", "error"
    );
    for record in trace {
        out.push_str(&row(record));
        out.push('\n');
    }
    out
}

fn row(record: &IterationRecord) -> String {
    let [a, b] = record.bracket.map_or([None, None], |[a, b]| [Some(a), Some(b)]);
    format!(
        "{:>5} {:>16.10} {:>16.10} {:>16} {:>16} {:>12} {:>12} {:>12.3e}",
        record.iter,
        record.best.x,
        record.best.value,
        cell(a, |v| format!("{v:.10}")),
        cell(b, |v| format!("{v:.10}")),
        cell(record.slope, |v| format!("{v:.3e}")),
        cell(record.curvature, |v| format!("{v:.3e}")),
        record.error,
    )
}

fn cell(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| "-".to_owned(), format)
}

pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use super::*;

    use optiviz_core::Bracket;
    use optiviz_expr::Function;
    use optiviz_observers::render;
    use optiviz_solvers::{Method, Request, run, run_method};

    #[test]
    fn table_has_a_row_per_record() {
        let f = Function::parse("(x - 1)^2").unwrap();
        let result = run_method(Method::Dichotomy, &f, [-2.0, 2.0], 1e-2).unwrap();

        let table = table(&result.trace);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), result.trace.len() + 1);
        assert!(lines[0].contains("f''(x)"));
        assert!(lines[1].trim_start().starts_with("1 "));
        assert!(lines[1].ends_with(&format!("{:.3e}", result.trace.records()[0].error)));
    }

    #[test]
    fn derivative_rows_leave_the_interval_blank() {
        let f = Function::parse("(x - 1)^2").unwrap();
        let result = run_method(Method::Newton, &f, [-2.0, 2.0], 1e-6).unwrap();

        let first = row(&result.trace.records()[0]);

        let columns: Vec<&str> = first.split_whitespace().collect();
        assert_eq!(columns[3], "-");
        assert_eq!(columns[4], "-");
        assert_ne!(columns[5], "-");
    }

    #[test]
    fn summary_mentions_the_warning() {
        let f = Function::parse("x^2").unwrap();
        let request = Request::new(Bracket::new(-3.0, 7.0).unwrap())
            .with_choice(Method::GoldenSection)
            .with_max_iters(2);
        let result = run(&f, &request, ()).unwrap();

        let text = summary(&result, Duration::from_micros(1500));

        assert!(text.starts_with("method:      Golden section\nstatus:      MaxIters\n"));
        assert!(text.contains("\niterations:  2\n"));
        assert!(text.contains("elapsed:     1.500 ms"));
        assert!(text.contains("warning:"));
    }

    #[test]
    fn json_contains_result_and_series() {
        let f = Function::parse("x^2").unwrap();
        let result = run_method(Method::Passive, &f, [-1.0, 1.0], 1e-3).unwrap();
        let series = render(&result.trace);
        let report = Report {
            result: &result,
            series: &series,
            elapsed_ms: 0.5,
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["result"]["method"], "passive");
        assert_eq!(value["result"]["status"], "exhausted");
        assert_eq!(
            value["series"]["probes"]["points"].as_array().unwrap().len(),
            50
        );
    }
}
