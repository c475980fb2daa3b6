//! Error types for flo2d-io.

use std::path::PathBuf;

use flo2d_mesh::MeshError;

/// Error type for all fallible operations in the flo2d-io crate.
///
/// This enum covers missing mandatory files, malformed text records,
/// results that do not fit the reconstructed topology, and failures of the
/// underlying binary container library.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a line does not have the expected number or type of
    /// fields.
    #[error("unknown format in {}:{line}: {reason}", path.display())]
    UnknownFormat {
        /// File containing the offending line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when element counts from a data source disagree with the
    /// mesh, or when the data is on the wrong kind of element.
    #[error("incompatible mesh: {reason}")]
    IncompatibleMesh {
        /// Description of the mismatch.
        reason: String,
    },

    /// Returned when a container is readable but semantically malformed.
    #[error("invalid data: {reason}")]
    InvalidData {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF/HDF5 library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an operating-system I/O failure other than a missing file.
    #[error("i/o error: {reason}")]
    Io {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required group is not present in a container.
    #[error("group '{name}' not found in {}", path.display())]
    MissingGroup {
        /// Name of the missing group.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required variable is not present in a group.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required attribute is absent or not a string.
    #[error("attribute '{name}' missing or unreadable in {}", path.display())]
    MissingAttribute {
        /// Name of the attribute.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when an array has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the array.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<MeshError> for IoError {
    fn from(e: MeshError) -> Self {
        match e {
            MeshError::ElementCountMismatch { .. } | MeshError::ValueCountMismatch { .. } => {
                IoError::IncompatibleMesh {
                    reason: e.to_string(),
                }
            }
            MeshError::FaceIndexOutOfRange { .. } | MeshError::TimeOrder { .. } => {
                IoError::InvalidData {
                    reason: e.to_string(),
                }
            }
        }
    }
}
