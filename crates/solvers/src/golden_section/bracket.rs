use optiviz_core::Bracket;

/// The golden ratio: φ = (1 + √5) / 2
const PHI: f64 = 1.618_033_988_749_895;

/// The inverse golden ratio: 1/φ = φ - 1 ≈ 0.618
pub(super) const INV_PHI: f64 = PHI - 1.0;

/// The interval `[a, b]` and its golden interior points `x1 < x2`.
#[derive(Debug, Clone, Copy)]
pub(super) struct GoldenBracket {
    pub(super) a: f64,
    pub(super) b: f64,

    /// At `a + (1 - φ⁻¹) * width`.
    pub(super) x1: f64,

    /// At `a + φ⁻¹ * width`.
    pub(super) x2: f64,
}

impl GoldenBracket {
    pub(super) fn new(bracket: &Bracket) -> Self {
        let (a, b) = (bracket.low(), bracket.high());
        let width = bracket.width();
        Self {
            a,
            b,
            x1: a + (1.0 - INV_PHI) * width,
            x2: a + INV_PHI * width,
        }
    }

    pub(super) fn width(&self) -> f64 {
        self.b - self.a
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.a, self.b]
    }

    /// Drops `(x2, b]`. The old `x1` becomes the new `x2`.
    pub(super) fn keep_lower(&mut self) {
        self.b = self.x2;
        self.x2 = self.x1;
        self.x1 = self.a + (1.0 - INV_PHI) * self.width();
    }

    /// Drops `[a, x1)`. The old `x2` becomes the new `x1`.
    pub(super) fn keep_upper(&mut self) {
        self.a = self.x1;
        self.x1 = self.x2;
        self.x2 = self.a + INV_PHI * self.width();
    }
}
