//! Game state and core simulation types
//!
//! Everything a restart must restore, or a renderer must see, lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    #[default]
    Running,
    /// Won or lost; ticks are no-ops until restart
    GameOver,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every collectable picked up
    Win { score: u32 },
    /// Touched an enemy
    Loss { score: u32 },
}

/// The player-controlled square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }
}

/// A roaming enemy square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Restored on restart
    pub start_pos: Vec2,
    pub start_vel: Vec2,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            start_pos: pos,
            start_vel: vel,
        }
    }

    /// Integrate one tick, then negate any velocity component whose edge
    /// overlaps the field boundary after the move
    pub fn advance(&mut self, size: f32, width: f32, height: f32) {
        self.pos += self.vel;

        if self.pos.x + size > width || self.pos.x < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + size > height || self.pos.y < 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    pub fn randomize_velocity(&mut self, rng: &mut impl RandomSource, max_speed: f32) {
        let vx = rng.next_signed(max_speed);
        let vy = rng.next_signed(max_speed);
        self.vel = Vec2::new(vx, vy);
    }

    fn reset(&mut self) {
        self.pos = self.start_pos;
        self.vel = self.start_vel;
    }
}

/// A stationary pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectable {
    pub pos: Vec2,
    pub collected: bool,
}

/// Axis-aligned square for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub pos: Vec2,
    pub size: f32,
}

/// Per-tick snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub field: Vec2,
    pub player: Square,
    pub enemies: Vec<Square>,
    /// Uncollected only
    pub collectables: Vec<Square>,
    pub score: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Order-insensitive; iterated in spawn order
    pub enemies: Vec<Enemy>,
    pub collectables: Vec<Collectable>,
    pub score: u32,
    /// Ticks advanced since the last (re)start
    pub time_ticks: u64,
}

impl GameState {
    /// Build the initial state, drawing any unpinned enemy velocities from `rng`
    pub fn new(config: &GameConfig, rng: &mut impl RandomSource) -> Self {
        let enemies = config
            .enemy_spawns
            .iter()
            .map(|spawn| {
                let vel = spawn.vel.unwrap_or_else(|| {
                    let vx = rng.next_signed(config.enemy_max_speed);
                    let vy = rng.next_signed(config.enemy_max_speed);
                    Vec2::new(vx, vy)
                });
                Enemy::new(spawn.pos, vel)
            })
            .collect();

        let collectables = config
            .collectable_positions
            .iter()
            .map(|&pos| Collectable {
                pos,
                collected: false,
            })
            .collect();

        Self {
            phase: GamePhase::Running,
            player: Player::new(config.player_start),
            enemies,
            collectables,
            score: 0,
            time_ticks: 0,
        }
    }

    /// Restore every entity to its starting state
    pub fn reset(&mut self, config: &GameConfig) {
        self.phase = GamePhase::Running;
        self.player = Player::new(config.player_start);
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        for collectable in &mut self.collectables {
            collectable.collected = false;
        }
        self.score = 0;
        self.time_ticks = 0;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True when nothing is left to collect (vacuously true with no collectables)
    pub fn all_collected(&self) -> bool {
        self.collectables.iter().all(|c| c.collected)
    }

    pub fn collected_count(&self) -> usize {
        self.collectables.iter().filter(|c| c.collected).count()
    }

    pub fn frame(&self, config: &GameConfig) -> Frame {
        Frame {
            field: Vec2::new(config.field_width, config.field_height),
            player: Square {
                pos: self.player.pos,
                size: config.player_size,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| Square {
                    pos: e.pos,
                    size: config.enemy_size,
                })
                .collect(),
            collectables: self
                .collectables
                .iter()
                .filter(|c| !c.collected)
                .map(|c| Square {
                    pos: c.pos,
                    size: config.collectable_size,
                })
                .collect(),
            score: self.score,
        }
    }
}
