//! Game configuration
//!
//! Field layout, sizes and speeds. Every field has a default matching the
//! classic layout, so partial JSON overrides are enough.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field must have positive finite dimensions, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },
    #[error("{what} size must be positive and finite, got {size}")]
    InvalidSize { what: &'static str, size: f32 },
    #[error("player of size {size} does not fit a {width}x{height} field")]
    PlayerTooLarge { size: f32, width: f32, height: f32 },
    #[error("{what} must be non-negative and finite, got {value}")]
    InvalidSpeed { what: &'static str, value: f32 },
    #[error("redirect chance must be within [0, 1], got {0}")]
    InvalidChance(f32),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Starting state of one enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    /// Fixed starting velocity; drawn at random when absent
    #[serde(default)]
    pub vel: Option<Vec2>,
}

impl EnemySpawn {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: None,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vel = Some(Vec2::new(vx, vy));
        self
    }
}

/// Game configuration
///
/// An empty `collectable_positions` list is valid but satisfies the win
/// condition on the very first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub player_start: Vec2,
    pub player_size: f32,
    pub player_speed: f32,

    pub enemy_size: f32,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub enemy_max_speed: f32,
    pub redirect_chance: f32,

    pub collectable_size: f32,
    pub collectable_positions: Vec<Vec2>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_start: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            enemy_size: ENEMY_SIZE,
            enemy_spawns: ENEMY_STARTS
                .iter()
                .map(|&(x, y)| EnemySpawn::at(x, y))
                .collect(),
            enemy_max_speed: ENEMY_MAX_SPEED,
            redirect_chance: ENEMY_REDIRECT_CHANCE,

            collectable_size: COLLECTABLE_SIZE,
            collectable_positions: COLLECTABLE_POSITIONS
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.field_width, self.field_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }

        for (what, size) in [
            ("player", self.player_size),
            ("enemy", self.enemy_size),
            ("collectable", self.collectable_size),
        ] {
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::InvalidSize { what, size });
            }
        }

        if self.player_size > width || self.player_size > height {
            return Err(ConfigError::PlayerTooLarge {
                size: self.player_size,
                width,
                height,
            });
        }

        for (what, value) in [
            ("player speed", self.player_speed),
            ("enemy max speed", self.enemy_max_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidSpeed { what, value });
            }
        }

        if !(0.0..=1.0).contains(&self.redirect_chance) {
            return Err(ConfigError::InvalidChance(self.redirect_chance));
        }

        Ok(())
    }

    /// Clamp a player position to the field (max bound checked first per axis)
    pub fn clamp_player(&self, pos: Vec2) -> Vec2 {
        let size = self.player_size;
        let clamp_axis = |v: f32, extent: f32| {
            if v + size > extent {
                extent - size
            } else if v < 0.0 {
                0.0
            } else {
                v
            }
        };
        Vec2::new(
            clamp_axis(pos.x, self.field_width),
            clamp_axis(pos.y, self.field_height),
        )
    }
}
