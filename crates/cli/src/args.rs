use clap::Parser;
use optiviz_core::Bracket;
use optiviz_solvers::{Choice, Goal, Request};

/// Minimizes a function of x over a bracket and prints the iteration trace.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "optiviz")]
#[command(version)]
#[command(after_help = "Set RUST_LOG=debug to log every iteration.")]
pub struct Args {
    /// Function of x, for example "(x - 2)^2 + 3"
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    pub expr: String,

    /// Search interval as A,B
    #[arg(
        long,
        value_name = "A,B",
        default_value = "-5,5",
        value_parser = parse_bracket,
        allow_hyphen_values = true
    )]
    pub bracket: [f64; 2],

    /// passive, dichotomy, golden, newton, secant or auto
    #[arg(long = "method", value_name = "METHOD", default_value = "auto")]
    pub choice: Choice,

    /// Tolerance on the final interval or step
    #[arg(long = "tol", value_name = "T", default_value_t = Request::DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Passive search sample count
    #[arg(long, value_name = "N")]
    pub samples: Option<usize>,

    /// Iteration cap
    #[arg(long, value_name = "N")]
    pub max_iters: Option<usize>,

    /// Newton start, or the first secant start
    #[arg(long, value_name = "X", allow_hyphen_values = true)]
    pub x0: Option<f64>,

    /// Second secant start
    #[arg(long, value_name = "X", allow_hyphen_values = true)]
    pub x1: Option<f64>,

    /// First derivative, instead of the symbolic one
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub d1: Option<String>,

    /// Second derivative, instead of the symbolic one
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub d2: Option<String>,

    /// Use finite differences instead of symbolic derivatives
    #[arg(long, conflicts_with_all = ["d1", "d2"])]
    pub numeric: bool,

    /// Search for the maximum (bracketing methods only)
    #[arg(long)]
    pub maximize: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Open a plot window (requires the `plot` feature)
    #[arg(long)]
    pub plot: bool,
}

impl Args {
    /// Builds the solver request for an already validated bracket.
    pub fn request(&self, bracket: Bracket) -> Request {
        let mut request = Request::new(bracket)
            .with_choice(self.choice)
            .with_tolerance(self.tolerance)
            .with_starts(self.x0, self.x1);
        if self.maximize {
            request = request.with_goal(Goal::Maximize);
        }
        if let Some(samples) = self.samples {
            request = request.with_samples(samples);
        }
        if let Some(max_iters) = self.max_iters {
            request = request.with_max_iters(max_iters);
        }
        request
    }
}

/// Parses `A,B` into the two bracket ends. Ordering is checked later by [`Bracket`].
fn parse_bracket(value: &str) -> Result<[f64; 2], String> {
    let invalid = || format!("expected two numbers separated by a comma, got '{value}'");
    let (low, high) = value.split_once(',').ok_or_else(invalid)?;
    let low = low.trim().parse().map_err(|_| invalid())?;
    let high = high.trim().parse().map_err(|_| invalid())?;
    Ok([low, high])
}
