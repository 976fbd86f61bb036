//! Game configuration resource.
//!
//! Manages engine settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [world]
//! gravity_x = 0.0
//! gravity_y = -1000.0
//!
//! [game]
//! level = assets/levels/level.lvl
//! debug = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;
const DEFAULT_GRAVITY_X: f32 = 0.0;
const DEFAULT_GRAVITY_Y: f32 = -1000.0;
const DEFAULT_LEVEL: &str = "assets/levels/level.lvl";
const DEFAULT_DEBUG: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the viewport extents, world gravity and the startup level path.
/// Missing file or missing keys fall back to the defaults above.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Viewport width in world units.
    pub viewport_width: u32,
    /// Viewport height in world units.
    pub viewport_height: u32,
    /// World gravity, x component.
    pub gravity_x: f32,
    /// World gravity, y component (negative is down).
    pub gravity_y: f32,
    /// Path of the level to load at startup.
    pub level: PathBuf,
    /// Enable debug logging of per-tick state.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            gravity_x: DEFAULT_GRAVITY_X,
            gravity_y: DEFAULT_GRAVITY_Y,
            level: PathBuf::from(DEFAULT_LEVEL),
            debug: DEFAULT_DEBUG,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [viewport] section
        if let Some(width) = config.getuint("viewport", "width").ok().flatten() {
            self.viewport_width = width as u32;
        }
        if let Some(height) = config.getuint("viewport", "height").ok().flatten() {
            self.viewport_height = height as u32;
        }

        // [world] section
        if let Some(gx) = config.getfloat("world", "gravity_x").ok().flatten() {
            self.gravity_x = gx as f32;
        }
        if let Some(gy) = config.getfloat("world", "gravity_y").ok().flatten() {
            self.gravity_y = gy as f32;
        }

        // [game] section
        if let Some(level) = config.get("game", "level") {
            self.level = PathBuf::from(level);
        }
        if let Some(debug) = config.getbool("game", "debug").ok().flatten() {
            self.debug = debug;
        }

        info!(
            "Loaded config: {}x{} viewport, gravity ({}, {}), level {:?}, debug={}",
            self.viewport_width,
            self.viewport_height,
            self.gravity_x,
            self.gravity_y,
            self.level,
            self.debug
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    #[allow(dead_code)]
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("viewport", "width", Some(self.viewport_width.to_string()));
        config.set("viewport", "height", Some(self.viewport_height.to_string()));

        config.set("world", "gravity_x", Some(self.gravity_x.to_string()));
        config.set("world", "gravity_y", Some(self.gravity_y.to_string()));

        config.set(
            "game",
            "level",
            Some(self.level.to_string_lossy().into_owned()),
        );
        config.set("game", "debug", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the viewport size.
    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width as f32, self.viewport_height as f32)
    }

    /// Get the world gravity.
    pub fn gravity(&self) -> glam::Vec2 {
        glam::Vec2::new(self.gravity_x, self.gravity_y)
    }
}
