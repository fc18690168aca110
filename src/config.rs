//! Configuration loading with override support
//!
//! Settings are resolved in three layers:
//! 1. TOML file (`--config`, else `./stereoatlas.toml` when present, else defaults)
//! 2. Environment variables
//! 3. Command line flags, applied by the binary

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stereoatlas_core::DEFAULT_ROTATION_RADIANS;
use stereoatlas_io::default_brainglobe_dir;
use stereoatlas_visualization::{RenderSettings, ShaderStyle};
use thiserror::Error;
use tracing::{debug, warn};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "stereoatlas.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub atlas_name: String,
    /// BrainGlobe atlas directory; `~/.brainglobe` when unset
    pub brainglobe_dir: Option<PathBuf>,
    pub zoom: f32,
    pub rotation_radians: f64,
    pub render: RenderConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub shader_style: ShaderStyle,
    pub root_alpha: f32,
    pub show_axes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            atlas_name: "allen_mouse_10um".to_string(),
            brainglobe_dir: None,
            zoom: 1.2,
            rotation_radians: DEFAULT_ROTATION_RADIANS,
            render: RenderConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_style: ShaderStyle::Plastic,
            root_alpha: 0.1,
            show_axes: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            title: "stereoatlas: injection trajectories".to_string(),
        }
    }
}

impl Config {
    /// Directory holding the installed atlases, with `~` expanded
    pub fn brainglobe_dir(&self) -> PathBuf {
        match &self.brainglobe_dir {
            Some(dir) => expand_home(dir),
            None => default_brainglobe_dir(),
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            shader_style: self.render.shader_style,
            root_alpha: self.render.root_alpha,
            show_axes: self.render.show_axes,
            ..RenderSettings::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.atlas_name.trim().is_empty() {
            return Err(ConfigError::Invalid("atlas_name must not be empty".to_string()));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ConfigError::Invalid(format!("zoom must be positive, got {}", self.zoom)));
        }
        if !self.rotation_radians.is_finite() {
            return Err(ConfigError::Invalid("rotation_radians must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.render.root_alpha) {
            return Err(ConfigError::Invalid(format!(
                "render.root_alpha must be within [0, 1], got {}",
                self.render.root_alpha
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Parse configuration from a TOML string
pub fn parse_config(content: &str, path: &Path) -> ConfigResult<Config> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration and apply environment overrides.
///
/// An explicit `config_path` must exist. Without one, `./stereoatlas.toml` is
/// used when present and the built-in defaults otherwise.
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<Config> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            candidate.exists().then_some(candidate)
        }
    };

    let mut config = match config_file {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            parse_config(&content, &path)?
        }
        None => {
            debug!("no configuration file, using defaults");
            Config::default()
        }
    };

    apply_environment_overrides(&mut config, |key| env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported variables:
/// - `STEREOATLAS_BRAINGLOBE_DIR` -> `brainglobe_dir`
/// - `STEREOATLAS_ATLAS` -> `atlas_name`
/// - `STEREOATLAS_ZOOM` -> `zoom`
pub fn apply_environment_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = var("STEREOATLAS_BRAINGLOBE_DIR") {
        config.brainglobe_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = var("STEREOATLAS_ATLAS") {
        config.atlas_name = value;
    }
    if let Some(value) = var("STEREOATLAS_ZOOM") {
        match value.parse::<f32>() {
            Ok(zoom) => config.zoom = zoom,
            Err(_) => warn!("ignoring STEREOATLAS_ZOOM={:?}: not a number", value),
        }
    }
}
