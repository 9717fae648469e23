//! Boundary session configuration
//!
//! Stored on disk as a versioned JSON envelope. A missing file means the
//! defaults, which reproduce the reference drawing behavior.

use crate::snap::SnapConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Map zoom used when centering on a device location
pub const DEFAULT_VIEWPORT_ZOOM: u8 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub snap: SnapConfig,
    pub viewport_zoom: u8,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self { snap: SnapConfig::default(), viewport_zoom: DEFAULT_VIEWPORT_ZOOM }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigEnvelope {
    version: u32,
    config: BoundaryConfig,
}

impl BoundaryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.snap.radius_m.is_finite() || self.snap.radius_m <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "snap radius must be a positive number of meters, got {}",
                self.snap.radius_m
            )));
        }

        if !(1..=22).contains(&self.viewport_zoom) {
            return Err(ConfigError::Invalid(format!(
                "viewport zoom must be within 1..=22, got {}",
                self.viewport_zoom
            )));
        }

        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let bytes = fs::read(path)?;
        let envelope: ConfigEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::UnsupportedVersion(envelope.version));
        }

        envelope.config.validate()?;
        Ok(envelope.config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let envelope = ConfigEnvelope { version: CONFIG_SCHEMA_VERSION, config: *self };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("nested").join("boundary.json");

        let config = BoundaryConfig {
            snap: SnapConfig { enabled: false, radius_m: 25.0 },
            viewport_zoom: 18,
        };

        config.save(&path).expect("save should succeed");
        let loaded = BoundaryConfig::load(&path).expect("load should succeed");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_defaults_when_file_absent() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let loaded =
            BoundaryConfig::load(&temp.path().join("missing.json")).expect("load should succeed");

        assert_eq!(loaded, BoundaryConfig::default());
        assert_eq!(loaded.snap.radius_m, 50.0);
        assert_eq!(loaded.viewport_zoom, 15);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("boundary.json");
        fs::write(&path, r#"{"version": 1, "config": {"snap": {"radius_m": 30.0}}}"#)
            .expect("write should succeed");

        let loaded = BoundaryConfig::load(&path).expect("load should succeed");

        assert!(loaded.snap.enabled);
        assert_eq!(loaded.snap.radius_m, 30.0);
        assert_eq!(loaded.viewport_zoom, DEFAULT_VIEWPORT_ZOOM);
    }

    #[test]
    fn rejects_unknown_version() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("boundary.json");
        fs::write(&path, r#"{"version": 7, "config": {}}"#).expect("write should succeed");

        assert!(matches!(BoundaryConfig::load(&path), Err(ConfigError::UnsupportedVersion(7))));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let config = BoundaryConfig {
            snap: SnapConfig { radius_m: 0.0, ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let zoom = BoundaryConfig { viewport_zoom: 0, ..Default::default() };
        assert!(matches!(zoom.validate(), Err(ConfigError::Invalid(_))));
    }
}
