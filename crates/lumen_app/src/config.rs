use std::path::{Path, PathBuf};

use lumen_window::WindowSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the demo reads at start-up. Every field is optional in the
/// JSON file.
#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,

    pub mesh_path: PathBuf,
    pub object_position: [f32; 3],
    pub object_scale: f32,

    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per second while an arrow key is held.
    pub turn_speed: f32,

    pub fog_density: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Lumen".to_string(),
            width: 1024,
            height: 768,
            resizable: false,
            mesh_path: PathBuf::from("assets/models/icosphere.obj"),
            object_position: [30.0, 0.0, -5.0],
            object_scale: 2.0,
            fov_degrees: 70.0,
            near: 0.1,
            far: 120.0,
            turn_speed: 0.5,
            fog_density: 0.01,
        }
    }
}

impl DemoConfig {
    /// Reads the config file if one was given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::info!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let name = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: name.clone(),
            source,
        })?;

        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: name.clone(),
            source,
        })?;
        log::info!("Loaded config from {name}");

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            resizable: self.resizable,
        }
    }
}
