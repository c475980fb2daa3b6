//! File names and container object names used by FLO-2D.

use std::path::{Path, PathBuf};

/// Cell centre coordinates (id, x, y).
pub const CADPTS: &str = "CADPTS.DAT";
/// Cell connectivity (id, N, E, S, W, Manning n, bed elevation).
pub const FPLAIN: &str = "FPLAIN.DAT";
/// Binary time-series container.
pub const TIMDEP_HDF5: &str = "TIMDEP.HDF5";
/// Text time series of depth and velocity.
pub const TIMDEP_OUT: &str = "TIMDEP.OUT";
/// Maximum depth per cell.
pub const DEPTH_OUT: &str = "DEPTH.OUT";
/// Maximum floodplain velocity per cell.
pub const VELFP_OUT: &str = "VELFP.OUT";
/// Maximum channel velocity per cell.
pub const VELOC_OUT: &str = "VELOC.OUT";

/// Top-level group holding one child group per result quantity.
pub const RESULTS_GROUP: &str = "TIMDEP NETCDF OUTPUT RESULTS";

pub(crate) const ATTR_GROUPTYPE: &str = "Grouptype";
pub(crate) const ATTR_TIME_UNITS: &str = "TimeUnits";
pub(crate) const ATTR_COMPRESSION: &str = "DatasetCompression";
pub(crate) const ATTR_DATA_TYPE: &str = "Data Type";
pub(crate) const ATTR_FILE_VERSION: &str = "File Version";
pub(crate) const ATTR_FILE_TYPE: &str = "File Type";

pub(crate) const VAR_TIMES: &str = "Times";
pub(crate) const VAR_VALUES: &str = "Values";
pub(crate) const VAR_MINS: &str = "Mins";
pub(crate) const VAR_MAXS: &str = "Maxs";

pub(crate) const GROUPTYPE_GENERIC: &str = "Generic";
pub(crate) const GROUPTYPE_SCALAR: &str = "DATASET SCALAR";
pub(crate) const GROUPTYPE_VECTOR: &str = "DATASET VECTOR";
pub(crate) const FILE_TYPE: &str = "Xmdf";
pub(crate) const FILE_VERSION: f32 = 1.0;

/// Group names produced by the readers.
pub mod groups {
    pub const BED_ELEVATION: &str = "Bed Elevation";
    pub const DEPTH: &str = "Depth";
    pub const VELOCITY: &str = "Velocity";
    pub const WATER_LEVEL: &str = "Water Level";
    pub const DEPTH_MAX: &str = "Depth/Maximums";
    pub const WATER_LEVEL_MAX: &str = "Water Level/Maximums";
    pub const VELOCITY_MAX: &str = "Velocity/Maximums";
}

/// Resolve `name` in the directory containing `path`.
pub fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_in_same_directory() {
        let p = Path::new("/runs/case1/CADPTS.DAT");
        assert_eq!(sibling(p, FPLAIN), PathBuf::from("/runs/case1/FPLAIN.DAT"));
    }

    #[test]
    fn sibling_of_bare_file_name() {
        assert_eq!(
            sibling(Path::new("CADPTS.DAT"), TIMDEP_OUT),
            PathBuf::from("TIMDEP.OUT")
        );
    }
}
