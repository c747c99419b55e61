//! Iteration records and the trace a method run leaves behind.

/// An evaluated point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x value.
    pub x: f64,

    /// The objective value at x.
    pub value: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, value: f64) -> Self {
        Self { x, value }
    }
}

/// The candidate point(s) a method evaluated during one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Probe {
    /// A single candidate (passive search, Newton, secant).
    Single(Point),

    /// A pair of interior candidates (dichotomy, golden section).
    Pair(Point, Point),
}

impl Probe {
    /// Returns the probed points in ascending probe order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Self::Single(p) => vec![p],
            Self::Pair(a, b) => vec![a, b],
        }
    }
}

/// One step of a method's execution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    /// Iteration index, starting at 1.
    pub iter: usize,

    /// The candidate point(s) evaluated in this step.
    pub probe: Probe,

    /// The search interval after this step, for bracketing methods.
    pub bracket: Option<[f64; 2]>,

    /// The best point found so far.
    pub best: Point,

    /// `f'(x)` at the probed point, for derivative methods.
    pub slope: Option<f64>,

    /// `f''(x)` at the probed point, for Newton's method.
    pub curvature: Option<f64>,

    /// The method's error estimate after this step.
    ///
    /// Interval width for bracketing methods, `|f'(x)|` for derivative
    /// methods, and the grid spacing for passive search.
    pub error: f64,
}

impl IterationRecord {
    /// Returns the width of the recorded interval, if any.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.bracket.map(|[low, high]| high - low)
    }
}

/// The ordered iteration records of a single method run.
///
/// A trace is built once from the records a method collected, in execution
/// order, and is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    records: Vec<IterationRecord>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all records in execution order.
    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord> {
        self.records.iter()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&IterationRecord> {
        self.records.last()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<IterationRecord>> for Trace {
    fn from(records: Vec<IterationRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<IterationRecord> for Trace {
    fn from_iter<I: IntoIterator<Item = IterationRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a IterationRecord;
    type IntoIter = std::slice::Iter<'a, IterationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
