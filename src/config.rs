use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{ConfigError, ConfigResult};

/// ## Structure
/// Designer configuration, read from a TOML file. Every field has a default,
/// so an empty file (or no file at all) is a valid configuration.
///
/// ```text
/// DesignerConfig
///   ├── canvas: CanvasConfig
///   │   ├── origin_x / origin_y: f64
///   │   ├── spacing: f64
///   │   └── columns / rows: u64
///   ├── export: ExportConfig
///   │   ├── filename: String
///   │   └── output_dir: String
///   └── session: SessionConfig
///       └── start_with_sample: bool
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DesignerConfig {
    pub canvas: CanvasConfig,
    pub export: ExportConfig,
    pub session: SessionConfig,
}

/// Grid used to place newly added nodes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing: f64,
    pub columns: u64,
    pub rows: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            origin_x: 250.0,
            origin_y: 80.0,
            spacing: 40.0,
            columns: 5,
            rows: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: String,
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: crate::export::DEFAULT_FILENAME.to_string(),
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub start_with_sample: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_with_sample: true,
        }
    }
}

impl DesignerConfig {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {:?}", path);
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: DesignerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.canvas.columns == 0 || self.canvas.rows == 0 {
            return Err(ConfigError::Invalid(
                "canvas.columns and canvas.rows must be at least 1".to_string(),
            ));
        }
        if !self.canvas.spacing.is_finite() || self.canvas.spacing < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "canvas.spacing must be a non-negative number, got {}",
                self.canvas.spacing
            )));
        }
        if self.export.filename.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export.filename cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
