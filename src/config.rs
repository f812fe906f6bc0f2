use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level dsample configuration, loaded from an optional TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DsampleConfig {
    /// Sampling defaults.
    #[serde(default)]
    pub sample: SampleDefaults,
}

/// Defaults the CLI falls back to when a flag is omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleDefaults {
    /// NetCDF mask dataset path.
    pub mask: Option<PathBuf>,
    /// Mask layers to sample with.
    #[serde(default)]
    pub layers: Vec<String>,
    /// Output root directory.
    pub output_dir: Option<PathBuf>,
    /// Temporal resolution name.
    pub time_step: Option<String>,
}

impl DsampleConfig {
    /// Loads the configuration, returning defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config: {}", p.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("failed to parse config: {}", p.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: DsampleConfig = toml::from_str("").unwrap();
        assert!(cfg.sample.mask.is_none());
        assert!(cfg.sample.layers.is_empty());
        assert!(cfg.sample.time_step.is_none());
    }

    #[test]
    fn parses_sample_section() {
        let cfg: DsampleConfig = toml::from_str(
            r#"
            [sample]
            mask = "masks/network.nc"
            layers = ["Gauges", "Basins"]
            output_dir = "out"
            time_step = "daily"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sample.mask.as_deref(), Some(Path::new("masks/network.nc")));
        assert_eq!(cfg.sample.layers, vec!["Gauges", "Basins"]);
        assert_eq!(cfg.sample.time_step.as_deref(), Some("daily"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<DsampleConfig, _> = toml::from_str("[sample]\nmsak = \"x\"\n");
        assert!(res.is_err());
    }
}
