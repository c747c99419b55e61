//! `optiviz`: runs a one-dimensional optimization method on a function of x
//! and prints or plots its iteration trace.

mod args;
mod report;

use std::{ffi::OsString, process::ExitCode, time::Instant};

use clap::Parser;
use log::info;
use optiviz_core::{Bracket, BracketError, Differentiable, FiniteDifference};
use optiviz_expr::{Function, ParseError};
use optiviz_observers::Rendering;
use thiserror::Error;

use crate::{args::Args, report::Report};

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("cannot parse expression: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Solve(#[from] optiviz_solvers::Error),

    #[error("cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot open plot window: {0}")]
    Plot(String),
}

fn main() -> ExitCode {
    env_logger::init();

    match try_main(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Args(err)) => err.exit(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the command line, including the program name.
fn try_main<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args)?;

    let function = if args.d1.is_some() || args.d2.is_some() {
        Function::with_derivatives(&args.expr, args.d1.as_deref(), args.d2.as_deref())?
    } else {
        Function::parse(&args.expr)?
    };
    let bracket = Bracket::try_from(args.bracket)?;

    if args.numeric {
        info!("using finite differences for the derivatives of {function}");
        solve(&FiniteDifference::new(function), bracket, &args)
    } else {
        solve(&function, bracket, &args)
    }
}

fn solve<O: Differentiable>(objective: &O, bracket: Bracket, args: &Args) -> Result<(), Error> {
    let request = args.request(bracket);
    let mut rendering = Rendering::new();

    let started = Instant::now();
    let result = optiviz_solvers::run(objective, &request, &mut rendering)?;
    let elapsed = started.elapsed();

    if args.json {
        let report = Report {
            result: &result,
            series: &rendering,
            elapsed_ms: report::millis(elapsed),
        };
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report::summary(&result, elapsed));
    }

    if args.plot {
        plot(objective, bracket, &args.expr, result.method, rendering)?;
    }
    Ok(())
}

#[cfg(feature = "plot")]
fn plot<O: Differentiable>(
    objective: &O,
    bracket: Bracket,
    expr: &str,
    method: optiviz_solvers::Method,
    rendering: Rendering,
) -> Result<(), Error> {
    use optiviz_observers::{ShowConfig, sample_curve, show};

    let curve = sample_curve(objective, &bracket, 400);
    let config = ShowConfig::new()
        .title(format!("{method} on f(x) = {expr}"))
        .legend();
    show(curve, rendering, config).map_err(|err| Error::Plot(err.to_string()))
}

#[cfg(not(feature = "plot"))]
fn plot<O: Differentiable>(
    _objective: &O,
    _bracket: Bracket,
    _expr: &str,
    _method: optiviz_solvers::Method,
    _rendering: Rendering,
) -> Result<(), Error> {
    Err(Error::Plot(
        "optiviz was built without the `plot` feature".to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_line(line: &str) -> Result<(), Error> {
        try_main(std::iter::once("optiviz").chain(line.split_whitespace()))
    }

    #[test]
    fn runs_end_to_end() {
        assert!(try_line("(x-1.5)^2 --bracket 0,4 --method golden").is_ok());
        assert!(try_line("x^4-x --numeric --json").is_ok());
        assert!(try_line("x^2 --d1 2*x --d2 2 --method newton").is_ok());
        assert!(try_line("-(x-1)^2 --maximize").is_ok());
    }

    #[test]
    fn help_is_reported_through_clap() {
        assert!(matches!(
            try_line("--help"),
            Err(Error::Args(err)) if err.kind() == clap::error::ErrorKind::DisplayHelp
        ));
    }

    #[test]
    fn failures_are_errors_not_panics() {
        assert!(matches!(try_line("x^2+"), Err(Error::Parse(_))));
        assert!(matches!(
            try_line("x^2 --bracket 3,1"),
            Err(Error::Bracket(BracketError::Empty { .. }))
        ));
        assert!(matches!(
            try_line("ln(x) --bracket -1,1 --method passive"),
            Err(Error::Solve(optiviz_solvers::Error::Evaluation { .. }))
        ));
        assert!(matches!(
            try_line("-(x^2) --method newton --maximize"),
            Err(Error::Solve(optiviz_solvers::Error::UnsupportedGoal { .. }))
        ));
        assert!(matches!(try_line("x --tol"), Err(Error::Args(_))));
    }
}
