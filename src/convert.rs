//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use flo2d_io::{CellSizeProbe, ReaderConfig, WriterConfig};

use crate::config::{ExportToml, IoToml};

/// Parses a cell size probe name into the corresponding enum variant.
pub fn parse_cell_size_probe(s: &str) -> Result<CellSizeProbe> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "directional" => Ok(CellSizeProbe::Directional),
        "first-slot" => Ok(CellSizeProbe::FirstSlot),
        other => bail!("unknown cell size probe: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let probe = parse_cell_size_probe(&io.cell_size_probe)?;
    let cfg = ReaderConfig::default()
        .with_cell_size_probe(probe)
        .with_vertex_resolution(io.vertex_resolution)
        .with_binary_results(io.binary_results)
        .with_bed_elevation_group(io.bed_elevation_group)
        .with_results_group(&io.results_group);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML export configuration, with an
/// optional time units override from the command line.
pub fn build_writer_config(export: &ExportToml, time_units: Option<&str>) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_time_units(time_units.unwrap_or(&export.time_units))
        .with_results_group(&export.results_group);
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_names() {
        assert_eq!(
            parse_cell_size_probe("Directional").unwrap(),
            CellSizeProbe::Directional
        );
        assert_eq!(
            parse_cell_size_probe("first_slot").unwrap(),
            CellSizeProbe::FirstSlot
        );
        assert!(parse_cell_size_probe("diagonal").is_err());
    }

    #[test]
    fn reader_config_from_defaults() {
        let cfg = build_reader_config(&IoToml::default()).unwrap();
        assert_eq!(cfg.cell_size_probe(), CellSizeProbe::Directional);
        assert_eq!(cfg.vertex_resolution(), 1e6);
    }

    #[test]
    fn invalid_reader_config_is_rejected() {
        let io = IoToml {
            vertex_resolution: 0.0,
            ..IoToml::default()
        };
        assert!(build_reader_config(&io).is_err());
    }

    #[test]
    fn writer_config_time_units_override() {
        assert!(build_writer_config(&ExportToml::default(), Some("Seconds")).is_ok());
        assert!(build_writer_config(&ExportToml::default(), Some("")).is_err());
    }

    #[test]
    fn invalid_writer_config_is_rejected() {
        let export = ExportToml {
            results_group: "a/b".to_string(),
            ..ExportToml::default()
        };
        assert!(build_writer_config(&export, None).is_err());
    }
}
