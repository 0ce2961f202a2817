//! Configuration for ndscatter.
//!
//! Loads configuration from TOML files; every field has a default so hosts
//! can start from `ScatterConfig::default()` and override selectively.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ndscatter_render::{PerspectiveCamera, ProjectionMode, ViewOptions};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Projection mode as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionSetting {
    #[default]
    Perspective,
    Orthographic,
}

impl From<ProjectionSetting> for ProjectionMode {
    fn from(setting: ProjectionSetting) -> Self {
        match setting {
            ProjectionSetting::Perspective => ProjectionMode::Perspective,
            ProjectionSetting::Orthographic => ProjectionMode::Orthographic,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Perspective or orthographic rendering.
    pub projection: ProjectionSetting,
    /// Field of view in degrees; drives the focal length.
    pub view_angle: f64,
    /// Camera position along the depth axis.
    pub camera_z: f64,
    /// Lower bound for perspective point-size attenuation.
    pub min_depth_scale: f64,
    /// Axis guide-line length in data units.
    pub axis_length: f64,
    /// Point sprite size in pixels before depth scaling.
    pub base_point_size: f32,
    /// Painter's-algorithm depth sorting.
    pub depth_sort: bool,
    /// Canvas margin in pixels.
    pub margin: f64,
    /// Hit radius of the labeled axis handle in pixels; the away handle
    /// uses half of it.
    pub handle_radius: f32,
    /// Background color as hex for the host renderer.
    pub background: String,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionSetting::default(),
            view_angle: PerspectiveCamera::DEFAULT_VIEW_ANGLE,
            camera_z: 3.0,
            min_depth_scale: 0.2,
            axis_length: 1.0,
            base_point_size: 3.0,
            depth_sort: true,
            margin: 24.0,
            handle_radius: 10.0,
            background: "#0e0e14".to_string(),
        }
    }
}

impl ScatterConfig {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ScatterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./ndscatter.toml`
    /// 2. `~/.config/ndscatter/config.toml`
    ///
    /// Returns default config if no file found.
    #[must_use]
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load("ndscatter.toml") {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ndscatter").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("ndscatter.toml")
    }

    /// View options for the frame builder.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            mode: self.projection.into(),
            camera: PerspectiveCamera::from_view_angle(
                self.camera_z,
                self.view_angle,
                self.min_depth_scale,
            ),
            axis_length: self.axis_length,
            base_point_size: self.base_point_size,
            depth_sort: self.depth_sort,
            margin: self.margin,
        }
    }
}
