//! Pixel Dash - A dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, bounce, collisions, game state)
//! - `game`: Simulation controller with injected renderer/observer seams
//! - `config`: Data-driven field layout and tuning
//! - `input`: Host key names to game keys
//! - `autopilot`: Demo-mode steering
//! - `renderer`: Canvas 2D drawing (wasm32 only)

pub mod autopilot;
pub mod config;
pub mod game;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, EnemySpawn, GameConfig};
pub use game::{GameObserver, Key, KeyResponse, Outcome, Renderer, Simulation, TickStatus};

use glam::Vec2;

/// Default game configuration constants
pub mod consts {
    /// Field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (50.0, 50.0);
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Pixels per tick while an arrow key is held
    pub const PLAYER_SPEED: f32 = 4.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_STARTS: [(f32, f32); 2] = [(300.0, 200.0), (100.0, 50.0)];
    /// Velocity components are drawn from [-ENEMY_MAX_SPEED, ENEMY_MAX_SPEED)
    pub const ENEMY_MAX_SPEED: f32 = 2.0;
    /// Per-enemy, per-tick chance of picking a new random velocity
    pub const ENEMY_REDIRECT_CHANCE: f32 = 0.01;

    /// Collectable defaults
    pub const COLLECTABLE_SIZE: f32 = 30.0;
    pub const COLLECTABLE_POSITIONS: [(f32, f32); 3] =
        [(200.0, 150.0), (100.0, 50.0), (350.0, 250.0)];
}

/// Center of an axis-aligned square whose top-left corner is `pos`
#[inline]
pub fn square_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}
