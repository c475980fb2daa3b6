//! Text result files: `TIMDEP.OUT`, `DEPTH.OUT`, `VELFP.OUT` and `VELOC.OUT`.
//!
//! All of them are optional. A missing file yields `None`; a present but
//! malformed file is an error.

use std::path::Path;

use flo2d_mesh::{DataLocation, DatasetGroup, ValueKind};
use tracing::debug;

use crate::error::IoError;
use crate::layout::{self, groups};
use crate::records::for_each_record;
use crate::sentinel::decode;

/// What the text readers need to know about the mesh.
pub(crate) struct FaceContext<'a> {
    face_count: usize,
    elevations: &'a [f64],
    uri: &'a str,
}

impl<'a> FaceContext<'a> {
    /// # Errors
    ///
    /// [`IoError::IncompatibleMesh`] if there is not one elevation per face.
    pub(crate) fn new(
        face_count: usize,
        elevations: &'a [f64],
        uri: &'a str,
    ) -> Result<Self, IoError> {
        if elevations.len() != face_count {
            return Err(IoError::IncompatibleMesh {
                reason: format!(
                    "{} bed elevations for {face_count} faces",
                    elevations.len()
                ),
            });
        }
        Ok(Self {
            face_count,
            elevations,
            uri,
        })
    }

    fn group(&self, name: &str, kind: ValueKind) -> DatasetGroup {
        DatasetGroup::new(name, self.uri, DataLocation::Faces, kind, self.face_count)
    }

    /// Water surface elevation from a depth; missing depth stays missing.
    fn water_level(&self, face: usize, depth: f64) -> f64 {
        if depth.is_nan() {
            f64::NAN
        } else {
            depth + self.elevations[face]
        }
    }

    fn too_many_rows(&self, path: &Path, line: usize) -> IoError {
        IoError::IncompatibleMesh {
            reason: format!(
                "{}:{line}: more rows than the {} faces of the mesh",
                path.display(),
                self.face_count
            ),
        }
    }
}

/// A single-timestep (time 0) scalar group on faces.
pub(crate) fn static_group(
    name: &str,
    uri: &str,
    values: Vec<f64>,
) -> Result<DatasetGroup, IoError> {
    let mut group = DatasetGroup::new(
        name,
        uri,
        DataLocation::Faces,
        ValueKind::Scalar,
        values.len(),
    );
    group.push_values(0.0, values)?;
    Ok(group)
}

// ---------------------------------------------------------------------------
// TIMDEP.OUT
// ---------------------------------------------------------------------------

/// Values collected for one timestep of `TIMDEP.OUT`.
struct Timestep {
    time: f64,
    depth: Vec<f64>,
    velocity: Vec<f64>,
    level: Vec<f64>,
    cursor: usize,
}

impl Timestep {
    fn new(time: f64, face_count: usize) -> Self {
        Self {
            time,
            depth: vec![f64::NAN; face_count],
            velocity: vec![f64::NAN; 2 * face_count],
            level: vec![f64::NAN; face_count],
            cursor: 0,
        }
    }

    /// Push the timestep into depth, velocity and water level groups.
    /// A timestep without any face rows is dropped.
    fn flush(self, out: &mut [DatasetGroup; 3]) -> Result<(), IoError> {
        if self.cursor == 0 {
            debug!(time = self.time, "dropping timestep without face rows");
            return Ok(());
        }
        out[0].push_values(self.time, self.depth)?;
        out[1].push_values(self.time, self.velocity)?;
        out[2].push_values(self.time, self.level)?;
        Ok(())
    }
}

/// Read the depth/velocity time series.
///
/// A line with a single field starts a new timestep; lines with 5 or 6
/// fields (`id depth speed vx vy [wse]`) fill the next face of the current
/// timestep. Produces "Depth", "Velocity" and "Water Level".
///
/// # Errors
///
/// [`IoError::UnknownFormat`] for any other field count, a face row before
/// the first timestamp or a timestamp earlier than the previous one,
/// [`IoError::IncompatibleMesh`] for more face rows in
/// a timestep than the mesh has faces.
pub(crate) fn read_timdep(
    path: &Path,
    ctx: &FaceContext<'_>,
) -> Result<Option<Vec<DatasetGroup>>, IoError> {
    if !path.exists() {
        debug!(path = %path.display(), "no depth/velocity time series");
        return Ok(None);
    }

    let mut out = [
        ctx.group(groups::DEPTH, ValueKind::Scalar),
        ctx.group(groups::VELOCITY, ValueKind::Vector),
        ctx.group(groups::WATER_LEVEL, ValueKind::Scalar),
    ];
    let mut current: Option<Timestep> = None;

    for_each_record(path, |r| match r.len() {
        1 => {
            let time = r.f64(0)?;
            if let Some(step) = current.take() {
                step.flush(&mut out)?;
            }
            if let Some(last) = out[0].datasets().last().map(|d| d.time())
                && time < last
            {
                return Err(r.format_error(format!(
                    "timestamp {time} is earlier than the previous timestamp {last}"
                )));
            }
            current = Some(Timestep::new(time, ctx.face_count));
            Ok(())
        }
        5 | 6 => {
            let step = current
                .as_mut()
                .ok_or_else(|| r.format_error("face record before the first timestamp"))?;
            let face = step.cursor;
            if face == ctx.face_count {
                return Err(ctx.too_many_rows(path, r.line()));
            }

            let depth = decode(r.f64(1)?);
            step.depth[face] = depth;
            step.velocity[2 * face] = decode(r.f64(3)?);
            step.velocity[2 * face + 1] = decode(r.f64(4)?);
            step.level[face] = ctx.water_level(face, depth);
            step.cursor += 1;
            Ok(())
        }
        n => Err(r.format_error(format!("expected 1, 5 or 6 fields, got {n}"))),
    })?;

    if let Some(step) = current.take() {
        step.flush(&mut out)?;
    }

    debug!(
        path = %path.display(),
        n_timesteps = out[0].len(),
        "read depth/velocity time series"
    );
    Ok(Some(out.into()))
}

// ---------------------------------------------------------------------------
// Maxima files
// ---------------------------------------------------------------------------

/// Read the 4th column of an `id x y value` file, one row per face in face
/// order. Faces without a row stay missing.
///
/// # Errors
///
/// [`IoError::IncompatibleMesh`] for more rows than faces,
/// [`IoError::UnknownFormat`] for a row without exactly 4 fields.
pub(crate) fn read_face_column(
    path: &Path,
    ctx: &FaceContext<'_>,
) -> Result<Option<Vec<f64>>, IoError> {
    if !path.exists() {
        debug!(path = %path.display(), "optional maxima file absent");
        return Ok(None);
    }

    let mut values = vec![f64::NAN; ctx.face_count];
    let mut face = 0;
    for_each_record(path, |r| {
        if face == ctx.face_count {
            return Err(ctx.too_many_rows(path, r.line()));
        }
        r.expect_len(4)?;
        values[face] = decode(r.f64(3)?);
        face += 1;
        Ok(())
    })?;

    Ok(Some(values))
}

/// Read maximum depth and derive maximum water level from it.
pub(crate) fn read_depth_maxima(
    path: &Path,
    ctx: &FaceContext<'_>,
) -> Result<Option<Vec<DatasetGroup>>, IoError> {
    let Some(depth) = read_face_column(path, ctx)? else {
        return Ok(None);
    };
    let level: Vec<f64> = depth
        .iter()
        .enumerate()
        .map(|(face, &d)| ctx.water_level(face, d))
        .collect();

    Ok(Some(vec![
        static_group(groups::DEPTH_MAX, ctx.uri, depth)?,
        static_group(groups::WATER_LEVEL_MAX, ctx.uri, level)?,
    ]))
}

/// Overwrite `baseline` with every non-missing value of `overlay`.
pub(crate) fn overlay_present(baseline: &mut [f64], overlay: &[f64]) {
    for (b, &o) in baseline.iter_mut().zip(overlay) {
        if !o.is_nan() {
            *b = o;
        }
    }
}

/// Read maximum velocity: floodplain values, overridden per face by channel
/// values where those are present. Either file may be absent.
pub(crate) fn read_velocity_maxima(
    floodplain: &Path,
    channel: &Path,
    ctx: &FaceContext<'_>,
) -> Result<Option<DatasetGroup>, IoError> {
    let baseline = read_face_column(floodplain, ctx)?;
    let overlay = read_face_column(channel, ctx)?;

    let values = match (baseline, overlay) {
        (None, None) => return Ok(None),
        (Some(b), None) => b,
        (None, Some(o)) => o,
        (Some(mut b), Some(o)) => {
            overlay_present(&mut b, &o);
            b
        }
    };
    Ok(Some(static_group(groups::VELOCITY_MAX, ctx.uri, values)?))
}

/// Read every text result family found next to `mesh_path`, in the order
/// time series, depth maxima, velocity maxima.
pub(crate) fn read_text_results(
    mesh_path: &Path,
    ctx: &FaceContext<'_>,
) -> Result<Vec<DatasetGroup>, IoError> {
    let mut out = Vec::new();

    if let Some(groups) = read_timdep(&layout::sibling(mesh_path, layout::TIMDEP_OUT), ctx)? {
        out.extend(groups);
    }
    if let Some(groups) = read_depth_maxima(&layout::sibling(mesh_path, layout::DEPTH_OUT), ctx)? {
        out.extend(groups);
    }
    if let Some(group) = read_velocity_maxima(
        &layout::sibling(mesh_path, layout::VELFP_OUT),
        &layout::sibling(mesh_path, layout::VELOC_OUT),
        ctx,
    )? {
        out.push(group);
    }

    Ok(out)
}
