//! Game configuration resource.
//!
//! Holds the tunables of the simulation loaded from an INI file. Every value
//! has a safe default, so a missing file or key never stops the game.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 0.0013
//! tile_size = 64
//! platform_tolerance = 20
//! die_time_ms = 1000
//!
//! [player]
//! lives = 2
//! health = 2
//! jump_speed = -0.4
//! jump_height = 200
//! attack_cooldown_ms = 500
//!
//! [viewport]
//! width = 800
//! height = 600
//!
//! [paths]
//! maps_dir = ./assets/maps
//! catalog = ./assets/catalog.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::creature::DEFAULT_DIE_TIME_MS;
use crate::components::player::{DEFAULT_JUMP_HEIGHT, DEFAULT_JUMP_SPEED};
use crate::resources::tilemap::DEFAULT_TILE_SIZE;

/// Default safe values for startup
const DEFAULT_GRAVITY: f32 = 0.0013;
const DEFAULT_PLATFORM_TOLERANCE: f32 = 20.0;
const DEFAULT_LIVES: i32 = 2;
const DEFAULT_PLAYER_HEALTH: i32 = 2;
const DEFAULT_ATTACK_COOLDOWN_MS: u64 = 500;
const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;
const DEFAULT_MAPS_DIR: &str = "./assets/maps";
const DEFAULT_CATALOG_PATH: &str = "./assets/catalog.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Downward acceleration in pixels per ms squared.
    pub gravity: f32,
    /// Tile edge in pixels.
    pub tile_size: i32,
    /// Depth below a platform's top in which a falling body still lands.
    pub platform_tolerance: f32,
    pub die_time_ms: u64,
    /// Lives at the start of a game.
    pub lives: i32,
    /// Player health after every (re)spawn.
    pub player_health: i32,
    pub jump_speed: f32,
    pub jump_height: f32,
    pub attack_cooldown_ms: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Directory holding `map1.txt`, `map2.txt`, ...
    pub maps_dir: PathBuf,
    pub catalog_path: PathBuf,
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
            gravity: DEFAULT_GRAVITY,
            tile_size: DEFAULT_TILE_SIZE,
            platform_tolerance: DEFAULT_PLATFORM_TOLERANCE,
            die_time_ms: DEFAULT_DIE_TIME_MS,
            lives: DEFAULT_LIVES,
            player_health: DEFAULT_PLAYER_HEALTH,
            jump_speed: DEFAULT_JUMP_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            attack_cooldown_ms: DEFAULT_ATTACK_COOLDOWN_MS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            maps_dir: PathBuf::from(DEFAULT_MAPS_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
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

        // [physics] section
        if let Some(gravity) = config.getfloat("physics", "gravity").ok().flatten() {
            self.gravity = gravity as f32;
        }
        if let Some(size) = config.getuint("physics", "tile_size").ok().flatten() {
            if size == 0 {
                warn!("Ignoring tile_size = 0, keeping {}", self.tile_size);
            } else {
                self.tile_size = size as i32;
            }
        }
        if let Some(tolerance) = config
            .getfloat("physics", "platform_tolerance")
            .ok()
            .flatten()
        {
            self.platform_tolerance = tolerance as f32;
        }
        if let Some(ms) = config.getuint("physics", "die_time_ms").ok().flatten() {
            self.die_time_ms = ms;
        }

        // [player] section
        if let Some(lives) = config.getint("player", "lives").ok().flatten() {
            self.lives = lives as i32;
        }
        if let Some(health) = config.getint("player", "health").ok().flatten() {
            self.player_health = health as i32;
        }
        if let Some(speed) = config.getfloat("player", "jump_speed").ok().flatten() {
            self.jump_speed = speed as f32;
        }
        if let Some(height) = config.getfloat("player", "jump_height").ok().flatten() {
            self.jump_height = height as f32;
        }
        if let Some(ms) = config
            .getuint("player", "attack_cooldown_ms")
            .ok()
            .flatten()
        {
            self.attack_cooldown_ms = ms;
        }

        // [viewport] section
        if let Some(width) = config.getuint("viewport", "width").ok().flatten() {
            self.viewport_width = width as u32;
        }
        if let Some(height) = config.getuint("viewport", "height").ok().flatten() {
            self.viewport_height = height as u32;
        }

        // [paths] section
        if let Some(dir) = config.get("paths", "maps_dir") {
            self.maps_dir = PathBuf::from(dir);
        }
        if let Some(catalog) = config.get("paths", "catalog") {
            self.catalog_path = PathBuf::from(catalog);
        }

        info!(
            "Loaded config: gravity={}, tile={}px, lives={}, health={}, viewport {}x{}, maps in {:?}",
            self.gravity,
            self.tile_size,
            self.lives,
            self.player_health,
            self.viewport_width,
            self.viewport_height,
            self.maps_dir
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "tile_size", Some(self.tile_size.to_string()));
        config.set(
            "physics",
            "platform_tolerance",
            Some(self.platform_tolerance.to_string()),
        );
        config.set("physics", "die_time_ms", Some(self.die_time_ms.to_string()));

        config.set("player", "lives", Some(self.lives.to_string()));
        config.set("player", "health", Some(self.player_health.to_string()));
        config.set("player", "jump_speed", Some(self.jump_speed.to_string()));
        config.set("player", "jump_height", Some(self.jump_height.to_string()));
        config.set(
            "player",
            "attack_cooldown_ms",
            Some(self.attack_cooldown_ms.to_string()),
        );

        config.set("viewport", "width", Some(self.viewport_width.to_string()));
        config.set("viewport", "height", Some(self.viewport_height.to_string()));

        config.set(
            "paths",
            "maps_dir",
            Some(self.maps_dir.to_string_lossy().into_owned()),
        );
        config.set(
            "paths",
            "catalog",
            Some(self.catalog_path.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
