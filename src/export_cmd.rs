//! Export command: write result groups of a simulation into a container.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use flo2d_io::layout::groups;
use flo2d_io::{load_mesh, write_group};
use flo2d_mesh::{DatasetGroup, Mesh};

use crate::cli::ExportArgs;
use crate::config::Flo2dConfig;
use crate::convert;

/// Run the export command.
pub fn run(args: ExportArgs, config: &Flo2dConfig) -> Result<()> {
    let _cmd = info_span!("export").entered();
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.export, args.time_units.as_deref())?;

    let mesh = load_mesh(&args.path, &reader_cfg)
        .with_context(|| format!("failed to load simulation: {}", args.path.display()))?;

    let requested = if args.groups.is_empty() {
        &config.export.groups
    } else {
        &args.groups
    };
    let selected = select_groups(&mesh, requested)?;
    if selected.is_empty() {
        bail!("no result groups to export in {}", args.path.display());
    }

    for group in selected {
        let stored = write_group(&args.output, group, mesh.face_count(), &writer_cfg)
            .with_context(|| {
                format!(
                    "failed to write group '{}' to {}",
                    group.name(),
                    args.output.display()
                )
            })?;
        info!(group = group.name(), stored = %stored, "exported group");
        println!("{} -> {stored}", group.name());
    }
    Ok(())
}

/// Groups named in `requested`, in that order, or every result group when
/// `requested` is empty.
fn select_groups<'m>(mesh: &'m Mesh, requested: &[String]) -> Result<Vec<&'m DatasetGroup>> {
    if requested.is_empty() {
        return Ok(mesh
            .groups()
            .iter()
            .filter(|g| g.name() != groups::BED_ELEVATION)
            .collect());
    }
    requested
        .iter()
        .map(|name| {
            mesh.group(name).with_context(|| {
                let available: Vec<_> = mesh.groups().iter().map(|g| g.name()).collect();
                format!("no group named '{name}' (available: {available:?})")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flo2d_mesh::{DataLocation, ValueKind, Vertex};

    fn mesh_with(names: &[&str]) -> Mesh {
        let vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
        ];
        let mut mesh = Mesh::new("m", vertices, vec![[1, 2, 3, 0]]).unwrap();
        for name in names {
            let mut g = DatasetGroup::new(*name, "m", DataLocation::Faces, ValueKind::Scalar, 1);
            g.push_values(0.0, vec![1.0]).unwrap();
            mesh.add_group(g).unwrap();
        }
        mesh
    }

    #[test]
    fn default_selection_skips_bed_elevation() {
        let mesh = mesh_with(&[groups::BED_ELEVATION, groups::DEPTH, groups::DEPTH_MAX]);
        let names: Vec<_> = select_groups(&mesh, &[])
            .unwrap()
            .iter()
            .map(|g| g.name())
            .collect();
        assert_eq!(names, vec![groups::DEPTH, groups::DEPTH_MAX]);
    }

    #[test]
    fn explicit_selection_keeps_order() {
        let mesh = mesh_with(&[groups::BED_ELEVATION, groups::DEPTH, groups::DEPTH_MAX]);
        let requested = vec![groups::DEPTH_MAX.to_string(), groups::BED_ELEVATION.to_string()];
        let names: Vec<_> = select_groups(&mesh, &requested)
            .unwrap()
            .iter()
            .map(|g| g.name())
            .collect();
        assert_eq!(names, vec![groups::DEPTH_MAX, groups::BED_ELEVATION]);
    }

    #[test]
    fn unknown_group_is_an_error() {
        let mesh = mesh_with(&[groups::DEPTH]);
        let err = select_groups(&mesh, &["Speed".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Speed"));
    }
}
