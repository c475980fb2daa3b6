//! Minimum/maximum statistics over data with missing values.
//!
//! Missing values are represented as NaN and never take part in a result.
//! When no value is present the statistics are NaN/NaN.

/// Minimum and maximum over the non-missing values of a dataset or group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Smallest non-missing value, NaN if there is none.
    pub minimum: f64,
    /// Largest non-missing value, NaN if there is none.
    pub maximum: f64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Statistics {
    /// Statistics of an empty (or all-missing) value set.
    pub const EMPTY: Statistics = Statistics {
        minimum: f64::NAN,
        maximum: f64::NAN,
    };

    /// Returns `true` when no value contributed.
    pub fn is_empty(&self) -> bool {
        self.minimum.is_nan() || self.maximum.is_nan()
    }

    /// Widen these statistics to include `value`. Missing values are ignored.
    pub fn include(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        if self.is_empty() {
            self.minimum = value;
            self.maximum = value;
        } else {
            self.minimum = self.minimum.min(value);
            self.maximum = self.maximum.max(value);
        }
    }

    /// Combine two statistics, e.g. per-dataset results into a group result.
    pub fn merge(self, other: Statistics) -> Statistics {
        let mut out = self;
        if !other.is_empty() {
            out.include(other.minimum);
            out.include(other.maximum);
        }
        out
    }
}

/// Statistics of one value per element.
pub fn scalar_statistics(values: &[f64]) -> Statistics {
    let mut stats = Statistics::EMPTY;
    for &v in values {
        stats.include(v);
    }
    stats
}

/// Statistics of interleaved `x, y` pairs, taken over each pair's magnitude.
///
/// A pair with either component missing is skipped. A trailing unpaired
/// value is ignored.
pub fn vector_statistics(values: &[f64]) -> Statistics {
    let mut stats = Statistics::EMPTY;
    for pair in values.chunks_exact(2) {
        let (x, y) = (pair[0], pair[1]);
        if x.is_nan() || y.is_nan() {
            continue;
        }
        stats.include(x.hypot(y));
    }
    stats
}
