use std::path::Path;

use anyhow::{Context, Result};
use flo2d_io::layout::RESULTS_GROUP;
use serde::Deserialize;

/// Top-level flo2d configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flo2dConfig {
    /// Loading settings.
    #[serde(default)]
    pub io: IoToml,

    /// Export settings.
    #[serde(default)]
    pub export: ExportToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_cell_size_probe")]
    pub cell_size_probe: String,
    #[serde(default = "default_vertex_resolution")]
    pub vertex_resolution: f64,
    #[serde(default = "default_true")]
    pub binary_results: bool,
    #[serde(default = "default_true")]
    pub bed_elevation_group: bool,
    #[serde(default = "default_results_group")]
    pub results_group: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            cell_size_probe: default_cell_size_probe(),
            vertex_resolution: default_vertex_resolution(),
            binary_results: true,
            bed_elevation_group: true,
            results_group: default_results_group(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportToml {
    #[serde(default = "default_time_units")]
    pub time_units: String,
    #[serde(default = "default_results_group")]
    pub results_group: String,
    /// Groups exported when none are given on the command line.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Default for ExportToml {
    fn default() -> Self {
        Self {
            time_units: default_time_units(),
            results_group: default_results_group(),
            groups: Vec::new(),
        }
    }
}

fn default_cell_size_probe() -> String {
    "directional".to_string()
}
fn default_vertex_resolution() -> f64 {
    1e6
}
fn default_true() -> bool {
    true
}
fn default_results_group() -> String {
    RESULTS_GROUP.to_string()
}
fn default_time_units() -> String {
    "Hours".to_string()
}

/// Read the configuration file at `path`, or the defaults if there is none.
pub fn load(path: Option<&Path>) -> Result<Flo2dConfig> {
    let Some(path) = path else {
        return Ok(Flo2dConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Flo2dConfig = toml::from_str("").unwrap();
        assert_eq!(config.io.cell_size_probe, "directional");
        assert_eq!(config.io.vertex_resolution, 1e6);
        assert!(config.io.binary_results);
        assert!(config.io.bed_elevation_group);
        assert_eq!(config.io.results_group, RESULTS_GROUP);
        assert_eq!(config.export.time_units, "Hours");
        assert!(config.export.groups.is_empty());
    }

    #[test]
    fn tables_override_defaults() {
        let config: Flo2dConfig = toml::from_str(
            r#"
            [io]
            cell_size_probe = "first-slot"
            binary_results = false

            [export]
            time_units = "Seconds"
            groups = ["Depth", "Velocity"]
            "#,
        )
        .unwrap();
        assert_eq!(config.io.cell_size_probe, "first-slot");
        assert!(!config.io.binary_results);
        assert!(config.io.bed_elevation_group);
        assert_eq!(config.export.time_units, "Seconds");
        assert_eq!(config.export.groups, vec!["Depth", "Velocity"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Flo2dConfig>("[io]\nprecision = 3\n").is_err());
        assert!(toml::from_str::<Flo2dConfig>("[output]\n").is_err());
    }

    #[test]
    fn no_path_gives_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config.export.results_group, RESULTS_GROUP);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flo2d.toml");
        std::fs::write(&path, "[io]\nvertex_resolution = 100.0\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.io.vertex_resolution, 100.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load(Some(Path::new("/no/such/flo2d.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
