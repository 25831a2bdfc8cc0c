//! Linear scales mapping data values onto surface coordinates.

/// Maps a data domain linearly onto a coordinate range.
///
/// A degenerate domain (zero, negative or non-finite span) falls back to a
/// span of `1`, so a single value lands on the start of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_span: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let span = domain.1 - domain.0;
        Self {
            domain_start: domain.0,
            domain_span: if span.is_finite() && span > 0.0 { span } else { 1.0 },
            range_start: range.0,
            range_end: range.1,
        }
    }

    /// Position of `value` in the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let ratio = (value - self.domain_start) / self.domain_span;
        self.range_start + ratio * (self.range_end - self.range_start)
    }
}

/// Minimum and maximum of the finite values, if any.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
