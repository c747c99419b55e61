//! Symbolic differentiation.
//!
//! Derivatives are assembled through small constructors that fold constants
//! and drop identity terms, so `d/dx (3*x^2)` comes out as `6 * x` rather
//! than a tree full of `0 * ...` and `... * 1` nodes.

use crate::{Expr, Func};

fn constant(c: f64) -> Expr {
    Expr::Const(c)
}

fn as_const(e: &Expr) -> Option<f64> {
    match e {
        Expr::Const(c) => Some(*c),
        _ => None,
    }
}

fn neg(u: Expr) -> Expr {
    match u {
        Expr::Const(c) => constant(-c),
        Expr::Neg(inner) => *inner,
        u => Expr::Neg(Box::new(u)),
    }
}

fn add(a: Expr, b: Expr) -> Expr {
    match (as_const(&a), as_const(&b)) {
        (Some(x), Some(y)) => constant(x + y),
        (Some(z), _) if z == 0.0 => b,
        (_, Some(z)) if z == 0.0 => a,
        _ => match b {
            Expr::Neg(b) => Expr::Sub(Box::new(a), b),
            b => Expr::Add(Box::new(a), Box::new(b)),
        },
    }
}

fn sub(a: Expr, b: Expr) -> Expr {
    match (as_const(&a), as_const(&b)) {
        (Some(x), Some(y)) => constant(x - y),
        (Some(z), _) if z == 0.0 => neg(b),
        (_, Some(z)) if z == 0.0 => a,
        _ => match b {
            Expr::Neg(b) => Expr::Add(Box::new(a), b),
            b => Expr::Sub(Box::new(a), Box::new(b)),
        },
    }
}

fn mul(a: Expr, b: Expr) -> Expr {
    match (as_const(&a), as_const(&b)) {
        (Some(x), Some(y)) => constant(x * y),
        (Some(z), _) | (_, Some(z)) if z == 0.0 => constant(0.0),
        (Some(one), _) if one == 1.0 => b,
        (_, Some(one)) if one == 1.0 => a,
        (Some(m), _) if m == -1.0 => neg(b),
        (_, Some(m)) if m == -1.0 => neg(a),
        // Keep constant factors in front.
        (None, Some(_)) => Expr::Mul(Box::new(b), Box::new(a)),
        _ => match (a, b) {
            (Expr::Neg(a), b) => neg(mul(*a, b)),
            (a, Expr::Neg(b)) => neg(mul(a, *b)),
            (Expr::Const(x), Expr::Mul(l, r)) => match *l {
                Expr::Const(y) => mul(constant(x * y), *r),
                l => Expr::Mul(
                    Box::new(constant(x)),
                    Box::new(Expr::Mul(Box::new(l), r)),
                ),
            },
            (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
        },
    }
}

fn div(a: Expr, b: Expr) -> Expr {
    match (as_const(&a), as_const(&b)) {
        (Some(x), Some(y)) if y != 0.0 => constant(x / y),
        (Some(z), _) if z == 0.0 => constant(0.0),
        (_, Some(one)) if one == 1.0 => a,
        _ => Expr::Div(Box::new(a), Box::new(b)),
    }
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    match (as_const(&base), as_const(&exponent)) {
        (_, Some(z)) if z == 0.0 => constant(1.0),
        (_, Some(one)) if one == 1.0 => base,
        (Some(b), Some(e)) if (b > 0.0 || e.fract() == 0.0) && b.powf(e).is_finite() => {
            constant(b.powf(e))
        }
        _ => Expr::Pow(Box::new(base), Box::new(exponent)),
    }
}

fn call(func: Func, u: Expr) -> Expr {
    match as_const(&u)
        .and_then(|c| func.apply(c))
        .filter(|v| v.is_finite())
    {
        Some(value) => constant(value),
        None => Expr::Call(func, Box::new(u)),
    }
}

/// Derivative of `func` with respect to its argument, evaluated at `u`.
fn outer_derivative(func: Func, u: &Expr) -> Expr {
    let u = || u.clone();
    match func {
        Func::Sin => call(Func::Cos, u()),
        Func::Cos => neg(call(Func::Sin, u())),
        Func::Tan => div(constant(1.0), pow(call(Func::Cos, u()), constant(2.0))),
        Func::Asin => div(
            constant(1.0),
            call(Func::Sqrt, sub(constant(1.0), pow(u(), constant(2.0)))),
        ),
        Func::Acos => neg(div(
            constant(1.0),
            call(Func::Sqrt, sub(constant(1.0), pow(u(), constant(2.0)))),
        )),
        Func::Atan => div(constant(1.0), add(constant(1.0), pow(u(), constant(2.0)))),
        Func::Sinh => call(Func::Cosh, u()),
        Func::Cosh => call(Func::Sinh, u()),
        Func::Tanh => div(constant(1.0), pow(call(Func::Cosh, u()), constant(2.0))),
        Func::Exp => call(Func::Exp, u()),
        Func::Ln => div(constant(1.0), u()),
        Func::Log10 => div(constant(1.0), mul(constant(std::f64::consts::LN_10), u())),
        Func::Sqrt => div(constant(1.0), mul(constant(2.0), call(Func::Sqrt, u()))),
        // Undefined at zero, which evaluation reports as a division by zero.
        Func::Abs => div(u(), call(Func::Abs, u())),
    }
}

impl Expr {
    /// Returns the symbolic derivative with respect to `x`.
    ///
    /// The result is lightly simplified but not canonicalized.
    ///
    /// # Example
    ///
    /// ```
    /// let f = optiviz_expr::parse("(x - 2)^2 + 3").unwrap();
    /// assert_eq!(f.derivative().eval(5.0), Ok(6.0));
    /// ```
    #[must_use]
    pub fn derivative(&self) -> Expr {
        match self {
            Self::Const(_) => constant(0.0),
            Self::Var => constant(1.0),
            Self::Neg(u) => neg(u.derivative()),
            Self::Add(a, b) => add(a.derivative(), b.derivative()),
            Self::Sub(a, b) => sub(a.derivative(), b.derivative()),
            Self::Mul(a, b) => add(
                mul(a.derivative(), (**b).clone()),
                mul((**a).clone(), b.derivative()),
            ),
            Self::Div(a, b) => div(
                sub(
                    mul(a.derivative(), (**b).clone()),
                    mul((**a).clone(), b.derivative()),
                ),
                pow((**b).clone(), constant(2.0)),
            ),
            Self::Pow(base, exponent) => Self::power_derivative(base, exponent),
            Self::Call(func, u) => mul(outer_derivative(*func, u), u.derivative()),
        }
    }

    fn power_derivative(base: &Expr, exponent: &Expr) -> Expr {
        let (b, e) = (base.clone(), exponent.clone());
        if exponent.is_constant() {
            // d/dx u^c = c * u^(c - 1) * u'
            let reduced = sub(e.clone(), constant(1.0));
            return mul(mul(e, pow(b, reduced)), base.derivative());
        }
        if base.is_constant() {
            // d/dx a^v = a^v * ln(a) * v'
            return mul(
                mul(pow(b.clone(), e), call(Func::Ln, b)),
                exponent.derivative(),
            );
        }
        // d/dx u^v = u^v * (v' * ln(u) + v * u' / u)
        mul(
            pow(b.clone(), e.clone()),
            add(
                mul(exponent.derivative(), call(Func::Ln, b.clone())),
                div(mul(e, base.derivative()), b),
            ),
        )
    }
}
