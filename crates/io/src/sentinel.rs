//! Mapping between the on-disk "no data" value and NaN.
//!
//! FLO-2D files have no missing-value marker of their own: a value of zero
//! stands for "no data". Every value read from or written to a results file
//! goes through [`decode`] or [`encode`] exactly once.

/// The on-disk value meaning "no data".
pub const NO_DATA: f64 = 0.0;

/// Absolute tolerance within which a value is taken to be [`NO_DATA`].
pub const NO_DATA_TOLERANCE: f64 = 1e-8;

/// Map an on-disk value to its in-memory form (NaN when missing).
pub fn decode(value: f64) -> f64 {
    if (value - NO_DATA).abs() < NO_DATA_TOLERANCE {
        f64::NAN
    } else {
        value
    }
}

/// Map an in-memory value to its on-disk form.
pub fn encode(value: f64) -> f64 {
    if value.is_nan() { NO_DATA } else { value }
}
