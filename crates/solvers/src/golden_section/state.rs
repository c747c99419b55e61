use optiviz_core::Point;

use super::bracket::{GoldenBracket, INV_PHI};

/// Which side of the bracket to discard, and where to evaluate next.
#[derive(Debug, Clone, Copy)]
pub(super) enum Shrink {
    /// Drop `[a, x1)`; carries the new `x2`.
    Left(f64),

    /// Drop `(x2, b]`; carries the new `x1`.
    Right(f64),
}

pub(super) struct State {
    bracket: GoldenBracket,
    left: Point,
    right: Point,
    best: Point,
}

impl State {
    /// Builds the initial state from the two evaluated interior points.
    pub(super) fn new<F: Fn(f64) -> f64>(
        bracket: GoldenBracket,
        left: Point,
        right: Point,
        transform: &F,
    ) -> Self {
        let best = if transform(left.value) <= transform(right.value) {
            left
        } else {
            right
        };
        Self {
            bracket,
            left,
            right,
            best,
        }
    }

    pub(super) fn bracket(&self) -> &GoldenBracket {
        &self.bracket
    }

    pub(super) fn interior(&self) -> (Point, Point) {
        (self.left, self.right)
    }

    pub(super) fn best(&self) -> Point {
        self.best
    }

    /// Pure query: which side to discard and where the next probe goes.
    pub(super) fn next_shrink<F: Fn(f64) -> f64>(&self, transform: &F) -> Shrink {
        if transform(self.left.value) <= transform(self.right.value) {
            let new_width = self.bracket.x2 - self.bracket.a;
            Shrink::Right(self.bracket.a + (1.0 - INV_PHI) * new_width)
        } else {
            let new_width = self.bracket.b - self.bracket.x1;
            Shrink::Left(self.bracket.x1 + INV_PHI * new_width)
        }
    }

    /// Applies the shrink and slots the newly evaluated point in.
    pub(super) fn apply<F: Fn(f64) -> f64>(&mut self, shrink: Shrink, point: Point, transform: &F) {
        match shrink {
            Shrink::Right(_) => {
                self.bracket.keep_lower();
                self.right = self.left;
                self.left = point;
            }
            Shrink::Left(_) => {
                self.bracket.keep_upper();
                self.left = self.right;
                self.right = point;
            }
        }
        if transform(point.value) < transform(self.best.value) {
            self.best = point;
        }
    }
}
