use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PrintScoreError, Result};
use crate::profiles::{DEFAULT_MEDIUM, DEFAULT_UPSCALE, DEFAULT_VIEWING_DISTANCE};

/// Caller-side defaults and sanity limits, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_medium")]
    pub medium: String,
    #[serde(default = "default_viewing_distance")]
    pub viewing_distance: String,
    #[serde(default = "default_upscale")]
    pub upscale: String,
    /// Longest print edge accepted before asking the user to double-check.
    #[serde(default = "default_max_print_inches")]
    pub max_print_inches: f64,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Embedded DPI at or above this is treated as a placeholder.
    #[serde(default = "default_max_plausible_dpi")]
    pub max_plausible_dpi: u32,
}

fn default_medium() -> String { DEFAULT_MEDIUM.to_string() }
fn default_viewing_distance() -> String { DEFAULT_VIEWING_DISTANCE.to_string() }
fn default_upscale() -> String { DEFAULT_UPSCALE.to_string() }
fn default_max_print_inches() -> f64 { 2400.0 }
fn default_max_file_bytes() -> u64 { 50 * 1024 * 1024 }
fn default_max_plausible_dpi() -> u32 { 12_000 }

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            medium: default_medium(),
            viewing_distance: default_viewing_distance(),
            upscale: default_upscale(),
            max_print_inches: default_max_print_inches(),
            max_file_bytes: default_max_file_bytes(),
            max_plausible_dpi: default_max_plausible_dpi(),
        }
    }
}

impl CalculatorConfig {
    /// Reject print sizes beyond `max_print_inches`.
    pub fn check_print_size(&self, width_in: f64, height_in: f64) -> Result<()> {
        if width_in > self.max_print_inches || height_in > self.max_print_inches {
            return Err(PrintScoreError::PrintTooLarge {
                width: width_in,
                height: height_in,
                max_inches: self.max_print_inches,
            });
        }
        Ok(())
    }

    pub fn check_file_size(&self, size: u64) -> Result<()> {
        if size > self.max_file_bytes {
            return Err(PrintScoreError::FileTooLarge {
                size,
                max_bytes: self.max_file_bytes,
            });
        }
        Ok(())
    }
}

/// Load config from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let Some(path) = path else {
        return Ok(CalculatorConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| PrintScoreError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CalculatorConfig = toml::from_str(&contents).map_err(|e| PrintScoreError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_default() {
        let config = CalculatorConfig::default();
        assert_eq!(config.medium, "coated_paper");
        assert_eq!(config.viewing_distance, "standard");
        assert_eq!(config.upscale, "none");
        assert_eq!(config.max_print_inches, 2400.0);
        assert_eq!(config.max_file_bytes, 52_428_800);
        assert_eq!(config.max_plausible_dpi, 12_000);
    }

    #[test]
    fn config_from_toml_fills_missing() {
        let toml_str = r#"
            medium = "canvas"
            viewing_distance = "wall_art"
        "#;
        let config: CalculatorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.medium, "canvas");
        assert_eq!(config.viewing_distance, "wall_art");
        assert_eq!(config.upscale, "none");
        assert_eq!(config.max_print_inches, 2400.0);
    }

    #[test]
    fn load_config_without_path_is_default() {
        assert_eq!(load_config(None).unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "upscale = \"ai_standard\"\nmax_print_inches = 120.0").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.upscale, "ai_standard");
        assert_eq!(config.max_print_inches, 120.0);
        assert_eq!(config.medium, "coated_paper");
    }

    #[test]
    fn load_config_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, PrintScoreError::ConfigRead { .. }));
    }

    #[test]
    fn load_config_bad_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_print_inches = \"wide\"").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, PrintScoreError::ConfigParse { .. }));
    }

    #[test]
    fn print_size_limit() {
        let config = CalculatorConfig::default();
        assert!(config.check_print_size(2400.0, 10.0).is_ok());
        assert!(matches!(
            config.check_print_size(10.0, 2400.5),
            Err(PrintScoreError::PrintTooLarge { .. })
        ));
    }

    #[test]
    fn file_size_limit() {
        let config = CalculatorConfig { max_file_bytes: 100, ..CalculatorConfig::default() };
        assert!(config.check_file_size(100).is_ok());
        assert!(matches!(config.check_file_size(101), Err(PrintScoreError::FileTooLarge { .. })));
    }
}
