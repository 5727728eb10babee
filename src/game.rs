//! Simulation controller
//!
//! Owns the game state, configuration and random source. Hosts feed it key
//! events and call [`Simulation::tick`] once per display frame, passing in
//! the renderer and observer for that frame.

use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig};
use crate::sim::{Frame, GamePhase, GameState, RandomSource, seeded, tick};

pub use crate::sim::Outcome;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

/// Effect of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    /// Player velocity changed
    Steered,
    /// Game was reset; the host should resume ticking
    Restarted,
}

/// Whether the host should schedule another tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Halted,
}

/// Draws one frame
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

impl<F: FnMut(&Frame)> Renderer for F {
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Receives win/loss notifications. Must not block.
pub trait GameObserver {
    fn on_outcome(&mut self, outcome: Outcome);
}

impl<F: FnMut(Outcome)> GameObserver for F {
    fn on_outcome(&mut self, outcome: Outcome) {
        self(outcome)
    }
}

/// The game loop state machine
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl Simulation<Pcg32> {
    /// Create a simulation driven by a seeded PCG generator
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, seeded(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, &mut rng);
        log::info!(
            "New game: {} enemies, {} collectables on a {}x{} field",
            state.enemies.len(),
            state.collectables.len(),
            config.field_width,
            config.field_height
        );
        Ok(Self { config, state, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn frame(&self) -> Frame {
        self.state.frame(&self.config)
    }

    pub fn handle_key_down(&mut self, key: Key) -> KeyResponse {
        let speed = self.config.player_speed;
        let vel = &mut self.state.player.vel;

        match (self.state.phase, key) {
            (GamePhase::Running, Key::Up) => vel.y = -speed,
            (GamePhase::Running, Key::Down) => vel.y = speed,
            (GamePhase::Running, Key::Left) => vel.x = -speed,
            (GamePhase::Running, Key::Right) => vel.x = speed,
            (GamePhase::GameOver, Key::Restart) => {
                self.restart();
                return KeyResponse::Restarted;
            }
            _ => return KeyResponse::Ignored,
        }
        KeyResponse::Steered
    }

    /// Any key release stops all movement
    pub fn handle_key_up(&mut self) {
        self.state.player.vel = glam::Vec2::ZERO;
    }

    /// Reset every entity to its starting state and resume play
    pub fn restart(&mut self) {
        self.state.reset(&self.config);
        log::info!("Game restarted");
    }

    /// Advance one frame, render it, and report any outcome
    ///
    /// Renders nothing while the game is over.
    pub fn tick(
        &mut self,
        renderer: &mut impl Renderer,
        observer: &mut impl GameObserver,
    ) -> TickStatus {
        let report = tick(&mut self.state, &self.config, &mut self.rng);
        if !report.advanced {
            return TickStatus::Halted;
        }

        for index in &report.collected {
            log::debug!("Collected #{} (score {})", index, self.state.score);
        }

        if let Some(outcome) = report.outcome {
            match outcome {
                Outcome::Win { score } => log::info!("You win! Final score: {}", score),
                Outcome::Loss { score } => log::info!("Game over! Final score: {}", score),
            }
            observer.on_outcome(outcome);
        }

        renderer.render(&self.state.frame(&self.config));

        if self.state.is_over() {
            TickStatus::Halted
        } else {
            TickStatus::Continue
        }
    }
}
