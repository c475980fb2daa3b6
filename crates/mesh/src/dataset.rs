//! Datasets and dataset groups.

use flo2d_stats::{Statistics, scalar_statistics, vector_statistics};

use crate::error::MeshError;

/// Mesh elements a group's values are attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataLocation {
    /// One entry per face.
    #[default]
    Faces,
    /// One entry per vertex.
    Vertices,
}

/// Number of components stored per element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    /// One value per element.
    #[default]
    Scalar,
    /// Two values per element, interleaved as `x, y`.
    Vector,
}

impl ValueKind {
    /// Values stored per element.
    pub fn arity(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector => 2,
        }
    }

    pub fn is_scalar(self) -> bool {
        self == Self::Scalar
    }

    /// Statistics of a flat buffer laid out for this kind.
    pub fn statistics(self, values: &[f64]) -> Statistics {
        match self {
            Self::Scalar => scalar_statistics(values),
            Self::Vector => vector_statistics(values),
        }
    }
}

/// One snapshot of a group's values at a single time.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    time: f64,
    values: Vec<f64>,
    statistics: Statistics,
}

impl Dataset {
    /// Creates a dataset and computes its statistics for the given layout.
    pub fn new(time: f64, values: Vec<f64>, kind: ValueKind) -> Self {
        let statistics = kind.statistics(&values);
        Self {
            time,
            values,
            statistics,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// The flat value buffer (interleaved `x, y` for vector data).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Vector value of element `index`.
    pub fn vector(&self, index: usize) -> Option<(f64, f64)> {
        let x = *self.values.get(2 * index)?;
        let y = *self.values.get(2 * index + 1)?;
        Some((x, y))
    }
}

/// A named, time-ordered collection of datasets sharing one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetGroup {
    name: String,
    uri: String,
    location: DataLocation,
    kind: ValueKind,
    element_count: usize,
    datasets: Vec<Dataset>,
    statistics: Statistics,
}

impl DatasetGroup {
    /// Creates an empty group for `element_count` elements on `location`.
    ///
    /// `uri` records where the group's data came from (or is persisted to).
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        location: DataLocation,
        kind: ValueKind,
        element_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            location,
            kind,
            element_count,
            datasets: Vec::new(),
            statistics: Statistics::EMPTY,
        }
    }

    /// Appends a dataset, keeping the group's aggregate statistics current.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ValueCountMismatch`] if the value buffer is not
    /// `arity * element_count` long, or [`MeshError::TimeOrder`] if `dataset`
    /// is earlier than the last dataset in the group.
    pub fn push(&mut self, dataset: Dataset) -> Result<(), MeshError> {
        let expected = self.kind.arity() * self.element_count;
        if dataset.values.len() != expected {
            return Err(MeshError::ValueCountMismatch {
                group: self.name.clone(),
                expected,
                got: dataset.values.len(),
            });
        }
        if let Some(last) = self.datasets.last()
            && dataset.time < last.time
        {
            return Err(MeshError::TimeOrder {
                group: self.name.clone(),
                previous: last.time,
                time: dataset.time,
            });
        }

        self.statistics = self.statistics.merge(dataset.statistics);
        self.datasets.push(dataset);
        Ok(())
    }

    /// Builds a dataset from `values` and appends it.
    ///
    /// # Errors
    ///
    /// See [`push`](Self::push).
    pub fn push_values(&mut self, time: f64, values: Vec<f64>) -> Result<(), MeshError> {
        self.push(Dataset::new(time, values, self.kind))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn location(&self) -> DataLocation {
        self.location
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_scalar(&self) -> bool {
        self.kind.is_scalar()
    }

    /// Number of elements each dataset covers.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Aggregate statistics over all datasets.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn depth_group(n: usize) -> DatasetGroup {
        DatasetGroup::new("Depth", "mem", DataLocation::Faces, ValueKind::Scalar, n)
    }

    #[test]
    fn push_updates_group_statistics() {
        let mut g = depth_group(3);
        g.push_values(0.0, vec![1.0, 2.0, 3.0]).unwrap();
        g.push_values(1.0, vec![4.0, f64::NAN, 6.0]).unwrap();

        assert_eq!(g.len(), 2);
        assert_relative_eq!(g.statistics().minimum, 1.0);
        assert_relative_eq!(g.statistics().maximum, 6.0);
        assert_relative_eq!(g.datasets()[1].statistics().minimum, 4.0);
    }

    #[test]
    fn push_rejects_wrong_length() {
        let mut g = depth_group(3);
        let err = g.push_values(0.0, vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            MeshError::ValueCountMismatch {
                group: "Depth".to_string(),
                expected: 3,
                got: 2,
            }
        );
        assert!(g.is_empty());
    }

    #[test]
    fn vector_group_needs_two_values_per_element() {
        let mut g = DatasetGroup::new(
            "Velocity",
            "mem",
            DataLocation::Faces,
            ValueKind::Vector,
            2,
        );
        assert!(g.push_values(0.0, vec![1.0, 2.0]).is_err());
        g.push_values(0.0, vec![3.0, 4.0, 0.0, 1.0]).unwrap();
        assert_relative_eq!(g.statistics().maximum, 5.0, epsilon = 1e-12);
        assert_eq!(g.datasets()[0].vector(1), Some((0.0, 1.0)));
        assert_eq!(g.datasets()[0].vector(2), None);
    }

    #[test]
    fn push_rejects_time_going_backwards() {
        let mut g = depth_group(1);
        g.push_values(2.0, vec![1.0]).unwrap();
        g.push_values(2.0, vec![1.0]).unwrap();
        let err = g.push_values(1.0, vec![1.0]).unwrap_err();
        assert!(matches!(err, MeshError::TimeOrder { .. }));
    }

    #[test]
    fn arity() {
        assert_eq!(ValueKind::Scalar.arity(), 1);
        assert_eq!(ValueKind::Vector.arity(), 2);
    }
}
