use optiviz_core::{Bracket, Objective};

use crate::Series;

/// Samples `objective` on a uniform grid of `n` points across the bracket.
///
/// The first and last samples are the bracket ends; fewer than two points
/// are treated as two. Points where the objective fails or returns a
/// non-finite value are left out, so the curve may have gaps.
#[must_use]
pub fn sample_curve<O: Objective>(objective: &O, bracket: &Bracket, n: usize) -> Series {
    let n = n.max(2);
    #[allow(clippy::cast_precision_loss)]
    let step = bracket.width() / (n - 1) as f64;

    let points = (0..n)
        .map(|i| {
            if i == n - 1 {
                bracket.high()
            } else {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 * step;
                bracket.low() + offset
            }
        })
        .filter_map(|x| match objective.value(x) {
            Ok(y) if y.is_finite() => Some([x, y]),
            _ => None,
        })
        .collect();

    Series {
        name: "f(x)",
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use optiviz_core::FnObjective;
    use optiviz_expr::Function;

    #[test]
    fn grid_covers_the_bracket() {
        let f = FnObjective(|x: f64| 2.0 * x);
        let bracket = Bracket::new(-1.0, 1.0).unwrap();

        let curve = sample_curve(&f, &bracket, 5);

        assert_eq!(
            curve.points,
            [[-1.0, -2.0], [-0.5, -1.0], [0.0, 0.0], [0.5, 1.0], [1.0, 2.0]]
        );
    }

    #[test]
    fn failed_evaluations_leave_gaps() {
        let f = Function::parse("sqrt(x)").unwrap();
        let bracket = Bracket::new(-1.0, 1.0).unwrap();

        let curve = sample_curve(&f, &bracket, 5);

        let xs: Vec<f64> = curve.points.iter().map(|p| p[0]).collect();
        assert_eq!(xs, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn too_few_samples_still_hits_both_ends() {
        let f = FnObjective(|x: f64| x);
        let bracket = Bracket::new(3.0, 4.0).unwrap();

        assert_eq!(sample_curve(&f, &bracket, 0).points, [[3.0, 3.0], [4.0, 4.0]]);
    }
}
