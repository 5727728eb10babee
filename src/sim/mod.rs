//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, circles_overlap_sq};
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{Collectable, Enemy, Frame, GamePhase, GameState, Outcome, Player, Square};
pub use tick::{TickReport, tick};
