//! # flo2d-io
//!
//! Read FLO-2D simulation output into a [`flo2d_mesh::Mesh`] and write
//! dataset groups back into an HDF5/NetCDF-4 result container.
//!
//! The quad mesh is rebuilt from the cell centre (`CADPTS.DAT`) and
//! connectivity (`FPLAIN.DAT`) files. Results come from `TIMDEP.HDF5` when
//! it is readable, otherwise from the text output files. In every file a
//! value of exactly zero means "no data" and is read as `NaN`.

mod error;
pub mod layout;
mod netcdf_read;
mod netcdf_write;
mod reader;
mod records;
pub mod sentinel;
mod text_read;
pub mod topology;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, can_read_datasets, can_read_mesh, load_mesh, read_datasets};
pub use topology::{CellSizeProbe, Topology};
pub use writer::{WriterConfig, persist_group, write_group};
