//! Demo-mode steering
//!
//! Heads for the nearest remaining collectable and backs away from any
//! enemy that gets too close. Output is the set of arrow keys to hold.

use glam::Vec2;

use crate::config::GameConfig;
use crate::game::{Key, Simulation};
use crate::sim::{GameState, RandomSource};
use crate::square_center;

/// Extra clearance (pixels) kept between player and enemy circles
const DANGER_MARGIN: f32 = 40.0;
/// Axis offsets smaller than this are considered aligned
const DEADZONE: f32 = 2.0;

/// Keys to hold this frame (at most one per axis)
pub fn steer(state: &GameState, config: &GameConfig) -> Vec<Key> {
    if state.is_over() {
        return Vec::new();
    }

    let player = square_center(state.player.pos, config.player_size);
    let danger = config.player_size / 2.0 + config.enemy_size / 2.0 + DANGER_MARGIN;

    let threat = state
        .enemies
        .iter()
        .map(|e| square_center(e.pos, config.enemy_size))
        .map(|center| (center, center.distance(player)))
        .filter(|&(_, dist)| dist < danger)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let direction = if let Some((enemy, _)) = threat {
        player - enemy
    } else {
        let target = state
            .collectables
            .iter()
            .filter(|c| !c.collected)
            .map(|c| square_center(c.pos, config.collectable_size))
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
        match target {
            Some(target) => target - player,
            None => return Vec::new(),
        }
    };

    keys_toward(direction)
}

/// Replace the held keys with this frame's steering
pub fn drive<R: RandomSource>(sim: &mut Simulation<R>) {
    let keys = steer(sim.state(), sim.config());
    sim.handle_key_up();
    for key in keys {
        sim.handle_key_down(key);
    }
}

fn keys_toward(direction: Vec2) -> Vec<Key> {
    let mut keys = Vec::with_capacity(2);
    if direction.x > DEADZONE {
        keys.push(Key::Right);
    } else if direction.x < -DEADZONE {
        keys.push(Key::Left);
    }
    if direction.y > DEADZONE {
        keys.push(Key::Down);
    } else if direction.y < -DEADZONE {
        keys.push(Key::Up);
    }
    keys
}
