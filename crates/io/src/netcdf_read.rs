//! Reading result groups from the binary (HDF5/NetCDF-4) container.

use std::path::Path;

use flo2d_mesh::{DataLocation, DatasetGroup, ValueKind};
use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::layout::{ATTR_GROUPTYPE, VAR_TIMES, VAR_VALUES};
use crate::sentinel::decode;

/// Open a container at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Fetch a top-level group by name.
pub(crate) fn top_group<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Group<'f>, IoError> {
    file.group(name)?.ok_or_else(|| IoError::MissingGroup {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a string attribute of a group.
pub(crate) fn read_string_attribute(
    group: &netcdf::Group<'_>,
    name: &str,
    path: &Path,
) -> Result<String, IoError> {
    let missing = || IoError::MissingAttribute {
        name: name.to_string(),
        path: path.to_path_buf(),
    };
    match group.attribute(name).ok_or_else(missing)?.value()? {
        AttributeValue::Str(s) => Ok(s),
        _ => Err(missing()),
    }
}

fn variable<'g>(
    group: &'g netcdf::Group<'_>,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'g>, IoError> {
    group.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: format!("{}/{name}", group.name()),
        path: path.to_path_buf(),
    })
}

/// Whether a `Grouptype` marker denotes vector data.
pub(crate) fn is_vector_marker(marker: &str) -> bool {
    marker.to_ascii_lowercase().contains("vector")
}

/// Read one child of the results group into a dataset group.
///
/// `Values` must hold `face_count * T` entries (twice that for vector
/// groups), where `T` is the length of `Times`.
fn read_child(
    group: &netcdf::Group<'_>,
    face_count: usize,
    path: &Path,
) -> Result<DatasetGroup, IoError> {
    let name = group.name();
    let marker = read_string_attribute(group, ATTR_GROUPTYPE, path)?;
    let kind = if is_vector_marker(&marker) {
        ValueKind::Vector
    } else {
        ValueKind::Scalar
    };

    let times_var = variable(group, VAR_TIMES, path)?;
    let values_var = variable(group, VAR_VALUES, path)?;

    let n_times = times_var.len();
    let row = face_count * kind.arity();
    let expected = row * n_times;
    if values_var.len() != expected {
        return Err(IoError::DimensionMismatch {
            name: format!("{name}/{VAR_VALUES}"),
            expected,
            got: values_var.len(),
        });
    }

    let times = times_var.get_values::<f64, _>(..)?;
    let values = values_var.get_values::<f32, _>(..)?;

    let mut out = DatasetGroup::new(
        name.as_str(),
        path.display().to_string(),
        DataLocation::Faces,
        kind,
        face_count,
    );
    for (ts, &time) in times.iter().enumerate() {
        let decoded: Vec<f64> = values[ts * row..(ts + 1) * row]
            .iter()
            .map(|&v| decode(f64::from(v)))
            .collect();
        out.push_values(time, decoded)?;
    }

    debug!(group = %name, ?kind, n_timesteps = n_times, "read result group");
    Ok(out)
}

/// Read every child group of `results_group` in enumeration order.
///
/// Either every child is read successfully or an error is returned; no
/// partial result is produced.
pub(crate) fn read_results(
    path: &Path,
    results_group: &str,
    face_count: usize,
) -> Result<Vec<DatasetGroup>, IoError> {
    let file = open_file(path)?;
    let results = top_group(&file, results_group, path)?;

    results
        .groups()
        .map(|child| read_child(&child, face_count, path))
        .collect()
}

/// Whether `path` opens as a container holding `results_group`.
pub(crate) fn has_results(path: &Path, results_group: &str) -> bool {
    let Ok(file) = open_file(path) else {
        return false;
    };
    top_group(&file, results_group, path).is_ok()
}
