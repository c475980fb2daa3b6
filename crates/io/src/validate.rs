//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone helpers used by the
//! reader and writer configurations.

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Record an error unless `value` is finite and strictly positive.
pub(crate) fn check_positive(c: &mut ValidationCollector, field: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        c.push(format!("{field} must be finite and > 0, got {value}"));
    }
}

/// Record an error unless `value` is usable as a container object name:
/// non-empty, no `/`, no surrounding whitespace.
pub(crate) fn check_object_name(c: &mut ValidationCollector, field: &str, value: &str) {
    if value.is_empty() {
        c.push(format!("{field} must not be empty"));
        return;
    }
    if value.contains('/') {
        c.push(format!("{field} must not contain '/', got '{value}'"));
    }
    if value.trim() != value {
        c.push(format!(
            "{field} must not start or end with whitespace, got '{value}'"
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ValidationCollector -------------------------------------------------

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        assert!(!c.is_empty());
        assert_eq!(c.len(), 2);

        let err = c.finish().unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("error one"));
                assert!(details.contains("error two"));
                assert!(details.contains("; "));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    // -- check_positive ------------------------------------------------------

    #[test]
    fn positive_values_pass() {
        let mut c = ValidationCollector::new();
        check_positive(&mut c, "resolution", 1000.0);
        check_positive(&mut c, "resolution", 1e-9);
        assert!(c.is_empty());
    }

    #[test]
    fn non_positive_values_fail() {
        let mut c = ValidationCollector::new();
        check_positive(&mut c, "resolution", 0.0);
        check_positive(&mut c, "resolution", -1.0);
        check_positive(&mut c, "resolution", f64::NAN);
        check_positive(&mut c, "resolution", f64::INFINITY);
        assert_eq!(c.len(), 4);
    }

    // -- check_object_name ---------------------------------------------------

    #[test]
    fn object_names() {
        let mut c = ValidationCollector::new();
        check_object_name(&mut c, "group", "TIMDEP NETCDF OUTPUT RESULTS");
        assert!(c.is_empty());

        check_object_name(&mut c, "group", "");
        check_object_name(&mut c, "group", "Depth/Maximums");
        check_object_name(&mut c, "group", " Depth");
        assert_eq!(c.len(), 3);

        let err = c.finish().unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 3);
                assert!(details.contains("group must not be empty"));
                assert!(details.contains("must not contain '/'"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }
}
