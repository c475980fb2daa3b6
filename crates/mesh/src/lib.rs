//! # flo2d-mesh
//!
//! In-memory face-vertex mesh with time-varying dataset groups.
//!
//! A [`Mesh`] owns its vertices, quad faces and the [`DatasetGroup`]s
//! attached to it. Topology is fixed once the mesh is built; groups are
//! appended afterwards and are validated against the element count they
//! live on.
//!
//! Missing values are stored as NaN throughout.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `geometry` | Vertex and bounding extent |
//! | `mesh` | Faces and the mesh container |
//! | `dataset` | Datasets, dataset groups and their layout flags |
//! | `error` | Error types |

mod dataset;
mod error;
mod geometry;
mod mesh;

pub use dataset::{DataLocation, Dataset, DatasetGroup, ValueKind};
pub use error::MeshError;
pub use flo2d_stats::Statistics;
pub use geometry::{Extent, Vertex};
pub use mesh::{Face, Mesh};
