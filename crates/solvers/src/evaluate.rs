use optiviz_core::{Differentiable, Objective, Point};

use crate::Error;

/// Evaluates an objective and counts how often its value was requested.
///
/// Non-finite values are rejected so that solvers only ever compare real
/// numbers.
pub(crate) struct Evaluator<'a, O> {
    objective: &'a O,
    evaluations: usize,
}

impl<'a, O: Objective> Evaluator<'a, O> {
    pub(crate) fn new(objective: &'a O) -> Self {
        Self {
            objective,
            evaluations: 0,
        }
    }

    pub(crate) fn point(&mut self, x: f64) -> Result<Point, Error> {
        self.evaluations += 1;
        let value = self
            .objective
            .value(x)
            .map_err(|e| Error::evaluation(x, e))?;
        finite(x, value).map(|value| Point::new(x, value))
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl<O: Differentiable> Evaluator<'_, O> {
    pub(crate) fn slope(&self, x: f64) -> Result<f64, Error> {
        let slope = self
            .objective
            .derivative(x)
            .map_err(|e| Error::evaluation(x, e))?;
        finite(x, slope)
    }

    pub(crate) fn curvature(&self, x: f64) -> Result<f64, Error> {
        let curvature = self
            .objective
            .second_derivative(x)
            .map_err(|e| Error::evaluation(x, e))?;
        finite(x, curvature)
    }
}

fn finite(x: f64, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue { x, value })
    }
}
