//! Error types for the flo2d-mesh crate.

/// Error type for invariant violations when building a mesh or attaching
/// dataset groups to it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Returned when a face refers to a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Returned when a dataset's value buffer does not match its group's
    /// arity times element count.
    #[error("dataset in group '{group}' has {got} values, expected {expected}")]
    ValueCountMismatch {
        /// Name of the group.
        group: String,
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        got: usize,
    },

    /// Returned when a group is attached to a mesh with a different number
    /// of elements on the group's location.
    #[error("group '{group}' is defined on {got} elements, the mesh has {expected}")]
    ElementCountMismatch {
        /// Name of the group.
        group: String,
        /// Element count of the mesh.
        expected: usize,
        /// Element count of the group.
        got: usize,
    },

    /// Returned when datasets are pushed out of time order.
    #[error("group '{group}': time {time} precedes previous time {previous}")]
    TimeOrder {
        /// Name of the group.
        group: String,
        /// Time of the last dataset already in the group.
        previous: f64,
        /// Time of the rejected dataset.
        time: f64,
    },
}
