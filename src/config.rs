//! Rendering configuration.
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use colorspace_workshop::RenderConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = RenderConfig::from_json_file(Path::new("render.json"))?;
//!
//! // Or use defaults
//! let config = RenderConfig::default();
//! # Ok::<(), colorspace_workshop::WorkshopError>(())
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::layout;
use crate::error::{Result, WorkshopError};

/// Where and how figures are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directory receiving PNG figures
    pub output_dir: PathBuf,

    /// Pixels per inch of figure size
    pub dpi: f32,

    /// Draw a frame around each axes box
    #[serde(default = "default_true")]
    pub draw_frames: bool,

    /// Write a JSON sidecar with titles and colormaps next to each PNG
    #[serde(default = "default_true")]
    pub write_metadata: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("figures"),
            dpi: layout::DEFAULT_DPI,
            draw_frames: true,
            write_metadata: true,
        }
    }
}

impl RenderConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WorkshopError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            WorkshopError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            WorkshopError::config("Failed to serialize configuration", e)
        })?;
        std::fs::write(path, json).map_err(|e| {
            WorkshopError::config(format!("Failed to write {}", path.display()), e)
        })
    }

    fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(WorkshopError::ConfigError {
                message: format!("dpi must be positive, got {}", self.dpi),
                source: None,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "colorspace_workshop_config_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.dpi, 100.0);
        assert!(config.draw_frames);
        assert!(config.write_metadata);
    }

    #[test]
    fn test_json_round_trip() {
        let path = scratch_file("roundtrip");
        let config = RenderConfig {
            output_dir: PathBuf::from("out/plots"),
            dpi: 50.0,
            draw_frames: false,
            write_metadata: true,
        };
        config.to_json_file(&path).unwrap();
        assert_eq!(RenderConfig::from_json_file(&path).unwrap(), config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_optional_flags_default_on() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"output_dir": "x", "dpi": 72.0}"#).unwrap();
        assert!(config.draw_frames);
        assert!(config.write_metadata);
    }

    #[test]
    fn test_rejects_non_positive_dpi() {
        let path = scratch_file("bad_dpi");
        std::fs::write(&path, r#"{"output_dir": "x", "dpi": 0.0}"#).unwrap();
        assert!(matches!(
            RenderConfig::from_json_file(&path),
            Err(WorkshopError::ConfigError { .. })
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let result = RenderConfig::from_json_file(Path::new("no/such/render.json"));
        assert!(result.is_err());
    }
}
