//! Writing dataset groups into the binary (HDF5/NetCDF-4) container.
//!
//! The layout mirrors what [`crate::netcdf_read`] expects: one child group
//! per dataset group under the results group, each holding `Times`, `Mins`,
//! `Maxs` and a `Values` array shaped `[nTimes, nFaces]` or
//! `[nTimes, nFaces, nComponents]`.
//!
//! "File Version" and "File Type" are stored as root attributes. Older Xmdf
//! writers store them as root datasets instead, so new containers differ
//! from those files in that respect.

use std::path::Path;

use flo2d_mesh::{DataLocation, DatasetGroup, ValueKind};
use tracing::debug;

use crate::error::IoError;
use crate::layout::{
    ATTR_COMPRESSION, ATTR_DATA_TYPE, ATTR_FILE_TYPE, ATTR_FILE_VERSION, ATTR_GROUPTYPE,
    ATTR_TIME_UNITS, FILE_TYPE, FILE_VERSION, GROUPTYPE_GENERIC, GROUPTYPE_SCALAR,
    GROUPTYPE_VECTOR, VAR_MAXS, VAR_MINS, VAR_TIMES, VAR_VALUES,
};
use crate::sentinel::encode;

const DIM_TIMES: &str = "nTimes";
const DIM_FACES: &str = "nFaces";
const DIM_COMPONENTS: &str = "nComponents";

/// Compression marker stored on every child group (no compression).
const NO_COMPRESSION: i32 = -1;
/// Data type marker stored on every child group.
const DATA_TYPE: i32 = 0;

/// A dataset group flattened into the arrays stored in the container.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EncodedGroup {
    pub(crate) kind: ValueKind,
    pub(crate) face_count: usize,
    pub(crate) times: Vec<f64>,
    pub(crate) mins: Vec<f32>,
    pub(crate) maxs: Vec<f32>,
    /// Row-major `[T, faces]` or `[T, faces, 2]`.
    pub(crate) values: Vec<f32>,
}

impl EncodedGroup {
    pub(crate) fn n_times(&self) -> usize {
        self.times.len()
    }

    fn grouptype(&self) -> &'static str {
        match self.kind {
            ValueKind::Scalar => GROUPTYPE_SCALAR,
            ValueKind::Vector => GROUPTYPE_VECTOR,
        }
    }
}

fn encode_f32(value: f64) -> f32 {
    encode(value) as f32
}

/// Flatten `group` for a mesh with `face_count` faces.
///
/// # Errors
///
/// [`IoError::IncompatibleMesh`] for vertex-resident groups or a face count
/// that differs from the group's, [`IoError::InvalidData`] for a group with
/// no timesteps or a mesh without faces (the container cannot store empty
/// fixed dimensions).
pub(crate) fn encode_group(
    group: &DatasetGroup,
    face_count: usize,
) -> Result<EncodedGroup, IoError> {
    if group.location() == DataLocation::Vertices {
        return Err(IoError::IncompatibleMesh {
            reason: format!(
                "group '{}' is defined on vertices; only face data can be stored",
                group.name()
            ),
        });
    }
    if group.element_count() != face_count {
        return Err(IoError::IncompatibleMesh {
            reason: format!(
                "group '{}' has {} faces, mesh has {face_count}",
                group.name(),
                group.element_count()
            ),
        });
    }
    if face_count == 0 || group.is_empty() {
        return Err(IoError::InvalidData {
            reason: format!(
                "group '{}' is empty ({} timesteps, {face_count} faces)",
                group.name(),
                group.len()
            ),
        });
    }

    let n_times = group.len();
    let mut encoded = EncodedGroup {
        kind: group.kind(),
        face_count,
        times: Vec::with_capacity(n_times),
        mins: Vec::with_capacity(n_times),
        maxs: Vec::with_capacity(n_times),
        values: Vec::with_capacity(n_times * face_count * group.kind().arity()),
    };
    for dataset in group.datasets() {
        let stats = dataset.statistics();
        encoded.times.push(dataset.time());
        encoded.mins.push(encode_f32(stats.minimum));
        encoded.maxs.push(encode_f32(stats.maximum));
        encoded
            .values
            .extend(dataset.values().iter().map(|&v| encode_f32(v)));
    }
    Ok(encoded)
}

/// First name derived from `requested` for which `exists` is false.
///
/// `/` is the container's path separator, so it is replaced by `_`. Taken
/// names get a numeric suffix `_0`, `_1`, ... that advances until free.
pub(crate) fn unique_group_name(requested: &str, exists: impl Fn(&str) -> bool) -> String {
    let base = requested.replace('/', "_");
    if !exists(&base) {
        return base;
    }
    let mut counter = 0usize;
    loop {
        let candidate = format!("{base}_{counter}");
        if !exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Create a new container at `path` with the file markers and an empty
/// results group, replacing any existing file.
pub(crate) fn create_container(
    path: &Path,
    results_group: &str,
) -> Result<netcdf::FileMut, IoError> {
    let mut file = netcdf::create(path)?;
    file.add_attribute(ATTR_FILE_VERSION, FILE_VERSION)?;
    file.add_attribute(ATTR_FILE_TYPE, FILE_TYPE)?;
    let mut results = file.add_group(results_group)?;
    results.add_attribute(ATTR_GROUPTYPE, GROUPTYPE_GENERIC)?;
    debug!(path = %path.display(), results_group, "created result container");
    Ok(file)
}

/// Open an existing container for appending, adding the results group if
/// it is not there yet.
pub(crate) fn open_container(
    path: &Path,
    results_group: &str,
) -> Result<netcdf::FileMut, IoError> {
    let mut file = netcdf::append(path)?;
    if file.group(results_group)?.is_none() {
        let mut results = file.add_group(results_group)?;
        results.add_attribute(ATTR_GROUPTYPE, GROUPTYPE_GENERIC)?;
    }
    Ok(file)
}

/// Write `encoded` as a new child of `results_group` and return the name
/// it was stored under.
pub(crate) fn append_group(
    file: &mut netcdf::FileMut,
    path: &Path,
    results_group: &str,
    requested: &str,
    encoded: &EncodedGroup,
    time_units: &str,
) -> Result<String, IoError> {
    let mut results = file
        .group_mut(results_group)?
        .ok_or_else(|| IoError::MissingGroup {
            name: results_group.to_string(),
            path: path.to_path_buf(),
        })?;

    let taken: Vec<String> = results.groups().map(|g| g.name()).collect();
    let name = unique_group_name(requested, |candidate| {
        taken.iter().any(|t| t == candidate)
    });

    let mut group = results.add_group(&name)?;
    group.add_attribute(ATTR_GROUPTYPE, encoded.grouptype())?;
    group.add_attribute(ATTR_TIME_UNITS, time_units)?;
    group.add_attribute(ATTR_COMPRESSION, NO_COMPRESSION)?;
    group.add_attribute(ATTR_DATA_TYPE, DATA_TYPE)?;

    group.add_dimension(DIM_TIMES, encoded.n_times())?;
    group.add_dimension(DIM_FACES, encoded.face_count)?;

    {
        let mut var = group.add_variable::<f64>(VAR_TIMES, &[DIM_TIMES])?;
        var.put_values(&encoded.times, ..)?;
    }
    {
        let mut var = group.add_variable::<f32>(VAR_MINS, &[DIM_TIMES])?;
        var.put_values(&encoded.mins, ..)?;
    }
    {
        let mut var = group.add_variable::<f32>(VAR_MAXS, &[DIM_TIMES])?;
        var.put_values(&encoded.maxs, ..)?;
    }

    match encoded.kind {
        ValueKind::Scalar => {
            let mut var = group.add_variable::<f32>(VAR_VALUES, &[DIM_TIMES, DIM_FACES])?;
            var.put_values(&encoded.values, ..)?;
        }
        ValueKind::Vector => {
            group.add_dimension(DIM_COMPONENTS, 2)?;
            let mut var = group
                .add_variable::<f32>(VAR_VALUES, &[DIM_TIMES, DIM_FACES, DIM_COMPONENTS])?;
            var.put_values(&encoded.values, ..)?;
        }
    }

    debug!(
        group = %name,
        requested,
        n_timesteps = encoded.n_times(),
        n_faces = encoded.face_count,
        "wrote result group"
    );
    Ok(name)
}
