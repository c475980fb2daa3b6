//! High-level result writer configuration and orchestration.

use std::path::Path;

use flo2d_mesh::DatasetGroup;
use tracing::{info, warn};

use crate::error::IoError;
use crate::layout::RESULTS_GROUP;
use crate::netcdf_write;
use crate::validate::{ValidationCollector, check_object_name};

/// Configuration for writing dataset groups into a binary container.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Value of the `TimeUnits` attribute on every written group.
    time_units: String,
    /// Top-level group that receives one child per written group.
    results_group: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            time_units: "Hours".into(),
            results_group: RESULTS_GROUP.into(),
        }
    }
}

impl WriterConfig {
    /// Sets the time units recorded with each group.
    pub fn with_time_units(mut self, units: impl Into<String>) -> Self {
        self.time_units = units.into();
        self
    }

    /// Sets the results group name.
    pub fn with_results_group(mut self, name: impl Into<String>) -> Self {
        self.results_group = name.into();
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `time_units` is empty or
    /// `results_group` is not a usable group name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if self.time_units.trim().is_empty() {
            c.push("time_units must not be empty");
        }
        check_object_name(&mut c, "results_group", &self.results_group);
        c.finish()
    }
}

/// Write `group` into the container at `path` and return the name of the
/// child group it was stored under.
///
/// An existing container is appended to; a missing one is created with the
/// file markers and an empty results group first. If the group's name is
/// already taken a numeric suffix is added.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid,
/// [`IoError::IncompatibleMesh`] for vertex-resident groups or a face count
/// mismatch, [`IoError::InvalidData`] for an empty group, or
/// [`IoError::Netcdf`] if the container cannot be opened or written.
pub fn write_group(
    path: &Path,
    group: &DatasetGroup,
    face_count: usize,
    config: &WriterConfig,
) -> Result<String, IoError> {
    config.validate()?;

    let encoded = netcdf_write::encode_group(group, face_count)?;

    let mut file = if path.exists() {
        netcdf_write::open_container(path, &config.results_group)?
    } else {
        netcdf_write::create_container(path, &config.results_group)?
    };

    let name = netcdf_write::append_group(
        &mut file,
        path,
        &config.results_group,
        group.name(),
        &encoded,
        &config.time_units,
    )?;

    info!(path = %path.display(), group = %name, "persisted dataset group");
    Ok(name)
}

/// Like [`write_group`], but reports failure as `false` after logging the
/// cause instead of returning an error.
pub fn persist_group(
    path: &Path,
    group: &DatasetGroup,
    face_count: usize,
    config: &WriterConfig,
) -> bool {
    match write_group(path, group, face_count, config) {
        Ok(_) => true,
        Err(e) => {
            warn!(
                path = %path.display(),
                group = group.name(),
                error = %e,
                "failed to persist dataset group"
            );
            false
        }
    }
}
