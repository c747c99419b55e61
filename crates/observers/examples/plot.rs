//! Interactive visualizations of the optiviz methods.
//!
//! Each mode runs one method on a textbook objective and opens a plot window
//! showing the probes on the curve next to the convergence history.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- golden
//! cargo run --example plot --features plot -- newton
//! cargo run --example plot --features plot -- passive 12
//! ```
//!
//! # Modes
//!
//! - **passive [n]**: sample `x^4 - 3x^2 + x` on \[-2, 2\] with `n` points
//!   (default 25). Shows how coarse grids miss the true minimum.
//! - **dichotomy**, **golden**: shrink \[0, 4\] around the minimum of
//!   `exp(x) - 3x`. Compare how many probes each method spends.
//! - **newton**, **secant**: the same objective from the same bracket, using
//!   the symbolic first and second derivatives.

use std::error::Error;

use optiviz_core::Bracket;
use optiviz_expr::Function;
use optiviz_observers::{Rendering, ShowConfig, sample_curve, show};
use optiviz_solvers::{Method, Request, run};

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "golden".into());
    let (text, bracket, request) = match mode.as_str() {
        "passive" => {
            let samples = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<usize>)
                .transpose()?
                .unwrap_or(25);
            let bracket = Bracket::new(-2.0, 2.0)?;
            let request = Request::new(bracket)
                .with_choice(Method::Passive)
                .with_samples(samples);
            ("x^4 - 3*x^2 + x", bracket, request)
        }
        other => {
            let method: Method = other.parse()?;
            let bracket = Bracket::new(0.0, 4.0)?;
            let request = Request::new(bracket).with_choice(method).with_tolerance(1e-6);
            ("exp(x) - 3*x", bracket, request)
        }
    };

    let f = Function::parse(text)?;
    let mut rendering = Rendering::new();
    let result = run(&f, &request, &mut rendering)?;
    println!(
        "{}: x* = {:.8}, f(x*) = {:.8} after {} iterations",
        result.method, result.x, result.value, result.iters
    );

    let title = format!("{} on f(x) = {text}", result.method);
    show(
        sample_curve(&f, &bracket, 400),
        rendering,
        ShowConfig::new().title(title).legend(),
    )?;
    Ok(())
}
