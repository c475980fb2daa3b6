//! High-level FLO-2D loader configuration and orchestration.

use std::path::Path;

use flo2d_mesh::{DatasetGroup, Mesh};
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::layout::{self, RESULTS_GROUP, groups};
use crate::netcdf_read;
use crate::text_read::{self, FaceContext};
use crate::topology::{self, CellSizeProbe, Topology};
use crate::validate::{ValidationCollector, check_object_name, check_positive};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for loading a FLO-2D simulation.
///
/// The [`Default`] implementation reads meshes the way current FLO-2D
/// tooling expects them; use the builder methods (`with_*`) to reproduce
/// older behaviour or to skip parts of the load.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// How the reference cell size is measured.
    cell_size_probe: CellSizeProbe,
    /// Quantisation steps per coordinate unit when merging shared corners.
    vertex_resolution: f64,
    /// Whether to try `TIMDEP.HDF5` before the text result files.
    binary_results: bool,
    /// Whether to publish the bed elevation as its own group.
    bed_elevation_group: bool,
    /// Top-level group of the binary container holding the results.
    results_group: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            cell_size_probe: CellSizeProbe::default(),
            vertex_resolution: 1e6,
            binary_results: true,
            bed_elevation_group: true,
            results_group: RESULTS_GROUP.into(),
        }
    }
}

impl ReaderConfig {
    /// Set how the reference cell size is measured.
    pub fn with_cell_size_probe(mut self, probe: CellSizeProbe) -> Self {
        self.cell_size_probe = probe;
        self
    }

    /// Set the number of quantisation steps per coordinate unit.
    pub fn with_vertex_resolution(mut self, resolution: f64) -> Self {
        self.vertex_resolution = resolution;
        self
    }

    /// Enable or disable reading `TIMDEP.HDF5` before the text files.
    pub fn with_binary_results(mut self, enabled: bool) -> Self {
        self.binary_results = enabled;
        self
    }

    /// Enable or disable the "Bed Elevation" group.
    pub fn with_bed_elevation_group(mut self, enabled: bool) -> Self {
        self.bed_elevation_group = enabled;
        self
    }

    /// Set the name of the results group in the binary container.
    pub fn with_results_group(mut self, name: impl Into<String>) -> Self {
        self.results_group = name.into();
        self
    }

    /// Returns the configured cell size probe.
    pub fn cell_size_probe(&self) -> CellSizeProbe {
        self.cell_size_probe
    }

    /// Returns the configured vertex resolution.
    pub fn vertex_resolution(&self) -> f64 {
        self.vertex_resolution
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        check_positive(&mut c, "vertex_resolution", self.vertex_resolution);
        check_object_name(&mut c, "results_group", &self.results_group);
        c.finish()
    }
}

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

/// Whether both topology files exist next to `path`.
pub fn can_read_mesh(path: &Path) -> bool {
    layout::sibling(path, layout::CADPTS).is_file()
        && layout::sibling(path, layout::FPLAIN).is_file()
}

/// Whether `path` opens as a binary container holding FLO-2D results.
pub fn can_read_datasets(path: &Path) -> bool {
    netcdf_read::has_results(path, RESULTS_GROUP)
}

// ---------------------------------------------------------------------------
// load_mesh
// ---------------------------------------------------------------------------

/// Load the simulation in the directory containing `path`.
///
/// The quad mesh is rebuilt from `CADPTS.DAT` and `FPLAIN.DAT`. Results
/// are then taken from `TIMDEP.HDF5` if it is present and fully readable;
/// otherwise the text files (`TIMDEP.OUT`, `DEPTH.OUT`, `VELFP.OUT`,
/// `VELOC.OUT`) are read instead. Every result file is optional.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if a topology file is missing,
/// [`IoError::UnknownFormat`] for a malformed line, or
/// [`IoError::IncompatibleMesh`] when a text result file disagrees with the
/// mesh. No partially loaded mesh is returned.
pub fn load_mesh(path: &Path, config: &ReaderConfig) -> Result<Mesh, IoError> {
    config.validate()?;

    let uri = path.display().to_string();
    let Topology {
        mut mesh,
        elevations,
    } = topology::reconstruct(
        &layout::sibling(path, layout::CADPTS),
        &layout::sibling(path, layout::FPLAIN),
        &uri,
        config.cell_size_probe,
        config.vertex_resolution,
    )?;

    if config.bed_elevation_group {
        let bed = text_read::static_group(groups::BED_ELEVATION, &uri, elevations.clone())?;
        mesh.add_group(bed)?;
    }

    let results = match binary_results(path, config, mesh.face_count()) {
        Some(results) => results,
        None => {
            let ctx = FaceContext::new(mesh.face_count(), &elevations, &uri)?;
            text_read::read_text_results(path, &ctx)?
        }
    };
    for group in results {
        mesh.add_group(group)?;
    }

    info!(
        path = %path.display(),
        n_vertices = mesh.vertex_count(),
        n_faces = mesh.face_count(),
        n_groups = mesh.groups().len(),
        "loaded FLO-2D mesh"
    );
    Ok(mesh)
}

/// Results from the sibling `TIMDEP.HDF5`, or `None` when the text files
/// should be used instead.
fn binary_results(
    path: &Path,
    config: &ReaderConfig,
    face_count: usize,
) -> Option<Vec<DatasetGroup>> {
    if !config.binary_results {
        return None;
    }
    let container = layout::sibling(path, layout::TIMDEP_HDF5);
    if !container.exists() {
        debug!(path = %container.display(), "no binary results, using text files");
        return None;
    }
    match netcdf_read::read_results(&container, &config.results_group, face_count) {
        Ok(results) => {
            debug!(
                path = %container.display(),
                n_groups = results.len(),
                "read binary results"
            );
            Some(results)
        }
        Err(e) => {
            warn!(
                path = %container.display(),
                error = %e,
                "binary results unreadable, falling back to text files"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// read_datasets
// ---------------------------------------------------------------------------

/// Attach every result group of the binary container at `path` to `mesh`.
///
/// Either every group is attached or none is.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist and
/// [`IoError::InvalidData`] if the container cannot be read or does not fit
/// the mesh.
pub fn read_datasets(path: &Path, mesh: &mut Mesh, config: &ReaderConfig) -> Result<(), IoError> {
    config.validate()?;

    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let results = netcdf_read::read_results(path, &config.results_group, mesh.face_count())
        .map_err(|e| IoError::InvalidData {
            reason: format!("{}: {e}", path.display()),
        })?;

    let n_groups = results.len();
    for group in results {
        mesh.add_group(group)?;
    }
    info!(path = %path.display(), n_groups, "attached result groups");
    Ok(())
}
