//! Inspect command: print the mesh and result groups of a simulation.

use anyhow::{Context, Result};
use tracing::info_span;

use flo2d_io::load_mesh;
use flo2d_mesh::{DatasetGroup, Mesh};

use crate::cli::InspectArgs;
use crate::config::Flo2dConfig;
use crate::convert;

/// Run the inspect command.
pub fn run(args: InspectArgs, config: &Flo2dConfig) -> Result<()> {
    let _cmd = info_span!("inspect").entered();
    let reader_cfg = convert::build_reader_config(&config.io)?;

    let mesh = load_mesh(&args.path, &reader_cfg)
        .with_context(|| format!("failed to load simulation: {}", args.path.display()))?;

    print!("{}", summary(&mesh));
    Ok(())
}

fn group_line(group: &DatasetGroup) -> String {
    let stats = group.statistics();
    format!(
        "  {:<24} {:<6} {:>5} timesteps  min {:>10.4}  max {:>10.4}\n",
        group.name(),
        if group.is_scalar() { "scalar" } else { "vector" },
        group.len(),
        stats.minimum,
        stats.maximum,
    )
}

/// Human-readable description of `mesh`.
fn summary(mesh: &Mesh) -> String {
    let extent = mesh.extent();
    let mut out = format!(
        "{}\n  vertices: {}\n  faces:    {}\n  extent:   x {} .. {}, y {} .. {}\n",
        mesh.uri(),
        mesh.vertex_count(),
        mesh.face_count(),
        extent.min_x,
        extent.max_x,
        extent.min_y,
        extent.max_y,
    );
    out.push_str(&format!("groups ({}):\n", mesh.groups().len()));
    for group in mesh.groups() {
        out.push_str(&group_line(group));
    }
    out
}
