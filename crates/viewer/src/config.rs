use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tileworld_kernel::TerrainParams;
use tileworld_stream::CameraSettings;

/// Errors from loading or validating a [`ViewerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
    #[error("ticks per second must be positive")]
    ZeroTickRate,
    #[error("terrain step must be positive")]
    ZeroTerrainStep,
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

/// Viewer settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Terrain seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    pub ticks_per_second: u32,
    pub pixels_per_unit: f32,
    /// World units panned per tick while a pan key is held.
    pub pan_step: f32,
    pub boost: f32,
    pub creep: f32,
    /// Columns per terrain segment.
    pub terrain_step: u32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let camera = CameraSettings::default();
        Self {
            grid_width: 256,
            grid_height: 128,
            seed: None,
            ticks_per_second: 60,
            pixels_per_unit: camera.pixels_per_unit,
            pan_step: camera.pan_step,
            boost: camera.boost,
            creep: camera.creep,
            terrain_step: TerrainParams::default().step,
            window_width: 1024,
            window_height: 768,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load `path` when given, otherwise start from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.terrain_step == 0 {
            return Err(ConfigError::ZeroTerrainStep);
        }
        for (field, value) in [
            ("pixels_per_unit", self.pixels_per_unit),
            ("pan_step", self.pan_step),
            ("boost", self.boost),
            ("creep", self.creep),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            pixels_per_unit: self.pixels_per_unit,
            pan_step: self.pan_step,
            boost: self.boost,
            creep: self.creep,
        }
    }

    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            step: self.terrain_step,
            ..TerrainParams::default()
        }
    }
}
