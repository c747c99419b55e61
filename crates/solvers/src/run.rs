use log::info;
use optiviz_core::{Bracket, Differentiable, Observer};

use crate::{
    Action, Choice, ConfigError, Error, Event, Goal, Method, MethodResult, dichotomy,
    golden_section, newton, passive, secant,
    select::{Derivatives, Profile, select},
};

/// Everything needed to run a method on an objective.
///
/// Fields left as `None` fall back to the chosen method's defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    pub bracket: Bracket,
    pub choice: Choice,
    pub goal: Goal,
    pub tolerance: f64,
    pub max_iters: Option<usize>,

    /// Passive search sample count. Setting it also steers [`Choice::Auto`]
    /// towards passive search.
    pub samples: Option<usize>,

    /// Start point for Newton, or the older start point for the secant method.
    pub x0: Option<f64>,

    /// The newer start point for the secant method.
    pub x1: Option<f64>,
}

impl Request {
    /// Tolerance used when none is given.
    pub const DEFAULT_TOLERANCE: f64 = 1e-5;

    /// Creates a request for automatic selection with default settings.
    #[must_use]
    pub fn new(bracket: Bracket) -> Self {
        Self {
            bracket,
            choice: Choice::Auto,
            goal: Goal::Minimize,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iters: None,
            samples: None,
            x0: None,
            x1: None,
        }
    }

    #[must_use]
    pub fn with_choice(self, choice: impl Into<Choice>) -> Self {
        Self {
            choice: choice.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_goal(self, goal: Goal) -> Self {
        Self { goal, ..self }
    }

    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self {
            max_iters: Some(max_iters),
            ..self
        }
    }

    #[must_use]
    pub fn with_samples(self, samples: usize) -> Self {
        Self {
            samples: Some(samples),
            ..self
        }
    }

    #[must_use]
    pub fn with_starts(self, x0: Option<f64>, x1: Option<f64>) -> Self {
        Self { x0, x1, ..self }
    }

    /// Returns the method this request will run for `objective`.
    pub fn resolve<O: Differentiable>(&self, objective: &O) -> Method {
        match self.choice {
            Choice::Method(method) => method,
            Choice::Auto => {
                let profile = Profile::new(&self.bracket, self.tolerance)
                    .with_derivatives(Derivatives::from(objective.derivative_source()))
                    .with_goal(self.goal)
                    .with_samples_requested(self.samples.is_some());
                let method = select(&profile);
                info!("auto-selected {method} for {profile:?}");
                method
            }
        }
    }
}

/// Runs the requested method on `objective`, resolving [`Choice::Auto`]
/// through [`select`].
///
/// # Errors
///
/// Returns an error if the request does not form a valid config, if the
/// goal is unsupported by the method, or if the method itself fails.
pub fn run<O, Obs>(objective: &O, request: &Request, observer: Obs) -> Result<MethodResult, Error>
where
    O: Differentiable,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let method = request.resolve(objective);
    let bracket = request.bracket;
    let maximize = request.goal == Goal::Maximize;
    let max_iters = |default: usize| request.max_iters.unwrap_or(default);

    if maximize && method.uses_derivatives() {
        return Err(Error::UnsupportedGoal { method });
    }

    info!(
        "running {method} on [{}, {}] with tolerance {:e}",
        bracket.low(),
        bracket.high(),
        request.tolerance
    );

    match method {
        Method::Passive => {
            let config = match request.samples {
                Some(samples) => passive::Config::new(samples)?,
                None => passive::Config::default(),
            };
            if maximize {
                passive::maximize(objective, bracket, &config, observer)
            } else {
                passive::minimize(objective, bracket, &config, observer)
            }
        }
        Method::Dichotomy => {
            let defaults = dichotomy::Config::default();
            let config = dichotomy::Config::new(request.tolerance, max_iters(defaults.max_iters()))?;
            if maximize {
                dichotomy::maximize(objective, bracket, &config, observer)
            } else {
                dichotomy::minimize(objective, bracket, &config, observer)
            }
        }
        Method::GoldenSection => {
            let defaults = golden_section::Config::default();
            let config =
                golden_section::Config::new(request.tolerance, max_iters(defaults.max_iters()))?;
            if maximize {
                golden_section::maximize(objective, bracket, &config, observer)
            } else {
                golden_section::minimize(objective, bracket, &config, observer)
            }
        }
        Method::Newton => {
            let defaults = newton::Config::default();
            let config = newton::Config::new(request.tolerance, max_iters(defaults.max_iters()))?;
            newton::minimize(objective, bracket, request.x0, &config, observer)
        }
        Method::Secant => {
            let defaults = secant::Config::default();
            let config = secant::Config::new(request.tolerance, max_iters(defaults.max_iters()))?;
            let starts = secant::Starts {
                x0: request.x0,
                x1: request.x1,
            };
            secant::minimize(objective, bracket, starts, &config, observer)
        }
    }
}

/// Runs `method` with default settings and the given tolerance.
///
/// # Errors
///
/// Returns an error if the bracket or tolerance is invalid, or if the method
/// fails.
pub fn run_method<O: Differentiable>(
    method: Method,
    objective: &O,
    bracket: [f64; 2],
    tolerance: f64,
) -> Result<MethodResult, Error> {
    let bracket = Bracket::try_from(bracket)?;
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(ConfigError::Tolerance(tolerance).into());
    }
    let request = Request::new(bracket)
        .with_choice(method)
        .with_tolerance(tolerance);
    run(objective, &request, ())
}
