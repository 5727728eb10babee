//! Per-frame simulation tick
//!
//! One call advances the game by one display frame. There is no fixed
//! timestep: speeds are in pixels per tick.

use super::collision::{circles_overlap, circles_overlap_sq};
use super::rng::RandomSource;
use super::state::{GamePhase, GameState, Outcome};
use crate::config::GameConfig;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the tick was skipped because the game is over
    pub advanced: bool,
    /// Indices of collectables picked up this tick
    pub collected: Vec<usize>,
    /// Set on the tick that ends the game
    pub outcome: Option<Outcome>,
}

/// Advance the game state by one tick
///
/// A win is checked before collisions. A tick that reports a win skips
/// the collision stage, so at most one outcome is reported per tick.
pub fn tick(state: &mut GameState, config: &GameConfig, rng: &mut impl RandomSource) -> TickReport {
    if state.phase == GamePhase::GameOver {
        return TickReport::default();
    }

    let mut report = TickReport {
        advanced: true,
        ..Default::default()
    };
    state.time_ticks += 1;

    // Player
    state.player.pos = config.clamp_player(state.player.pos + state.player.vel);

    // Enemies: bounce and random redirect are independent
    for enemy in &mut state.enemies {
        enemy.advance(config.enemy_size, config.field_width, config.field_height);
        if rng.next_unit() < config.redirect_chance {
            enemy.randomize_velocity(rng, config.enemy_max_speed);
        }
    }

    if state.all_collected() {
        state.phase = GamePhase::GameOver;
        report.outcome = Some(Outcome::Win { score: state.score });
        return report;
    }

    check_collisions(state, config, &mut report);

    report
}

fn check_collisions(state: &mut GameState, config: &GameConfig, report: &mut TickReport) {
    let player_pos = state.player.pos;

    let hit = state.enemies.iter().any(|enemy| {
        circles_overlap_sq(player_pos, config.player_size, enemy.pos, config.enemy_size)
    });
    if hit {
        state.phase = GamePhase::GameOver;
    }

    for (i, collectable) in state.collectables.iter_mut().enumerate() {
        if collectable.collected {
            continue;
        }
        if circles_overlap(
            player_pos,
            config.player_size,
            collectable.pos,
            config.collectable_size,
        ) {
            collectable.collected = true;
            state.score += 1;
            report.collected.push(i);
        }
    }

    // Reported after pickups so the final score includes this frame
    if hit {
        report.outcome = Some(Outcome::Loss { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::config::EnemySpawn;
    use crate::sim::rng::{ScriptedRandom, seeded};

    /// Config with enemies parked far from the player and pinned velocities
    fn quiet_config() -> GameConfig {
        GameConfig {
            enemy_spawns: vec![EnemySpawn::at(340.0, 240.0).with_velocity(0.0, 0.0)],
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_tick_moves_and_clamps_player() {
        let config = quiet_config();
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        state.player.vel = Vec2::new(-4.0, 4.0);
        for _ in 0..20 {
            tick(&mut state, &config, &mut rng);
        }
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.player.pos.y, 130.0);
        assert_eq!(state.time_ticks, 20);
    }

    #[test]
    fn test_enemy_bounce_same_tick() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(0.0, 150.0).with_velocity(-1.0, 0.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        tick(&mut state, &config, &mut rng);
        assert_eq!(state.enemies[0].pos.x, -1.0);
        assert_eq!(state.enemies[0].vel.x, 1.0);
        assert_eq!(state.frame(&config).enemies[0].pos.x, -1.0);
    }

    #[test]
    fn test_redirect_triggered() {
        let config = quiet_config();
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        // Roll 0.005 (< 0.01) then draw vx = 0.75*4-2, vy = 0.25*4-2
        let mut rng = ScriptedRandom::new([0.005, 0.75, 0.25]);
        tick(&mut state, &config, &mut rng);
        assert_eq!(state.enemies[0].vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_redirect_not_triggered() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(200.0, 200.0).with_velocity(0.5, 0.5)];
        let mut rng = ScriptedRandom::new([0.01]);
        let mut state = GameState::new(&config, &mut rng);

        tick(&mut state, &config, &mut rng);
        assert_eq!(state.enemies[0].vel, Vec2::new(0.5, 0.5));
        assert_eq!(state.enemies[0].pos, Vec2::new(200.5, 200.5));
    }

    #[test]
    fn test_bounce_and_redirect_in_same_tick() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(0.0, 200.0).with_velocity(-1.0, 0.0)];
        let mut rng = ScriptedRandom::new([0.0, 0.5, 0.5]);
        let mut state = GameState::new(&config, &mut rng);

        let mut rng = ScriptedRandom::new([0.0, 1.0, 0.5]);
        tick(&mut state, &config, &mut rng);
        assert_eq!(state.enemies[0].pos.x, -1.0);
        // Bounce flipped to +1, then the redirect replaced it
        assert_eq!(state.enemies[0].vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_enemy_collision_is_a_loss() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(70.0, 60.0).with_velocity(0.0, 0.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        let report = tick(&mut state, &config, &mut rng);
        assert_eq!(report.outcome, Some(Outcome::Loss { score: 0 }));
        assert_eq!(state.phase, GamePhase::GameOver);

        let report = tick(&mut state, &config, &mut rng);
        assert!(!report.advanced);
        assert_eq!(report.outcome, None);
    }

    #[test]
    fn test_exact_touch_is_not_a_loss() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(100.0, 50.0).with_velocity(0.0, 0.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        let report = tick(&mut state, &config, &mut rng);
        assert_eq!(report.outcome, None);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pickup_then_win_next_tick() {
        let mut config = quiet_config();
        config.collectable_positions = vec![Vec2::new(150.0, 60.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);
        state.player.vel = Vec2::new(4.0, 0.0);

        let mut wins = 0;
        let mut pickup_tick = None;
        for t in 0..100 {
            let report = tick(&mut state, &config, &mut rng);
            if !report.collected.is_empty() {
                pickup_tick = Some(t);
                assert_eq!(report.outcome, None);
            }
            if let Some(Outcome::Win { score }) = report.outcome {
                assert_eq!(score, 1);
                assert_eq!(Some(t - 1), pickup_tick);
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_empty_collectables_win_first_tick() {
        let mut config = quiet_config();
        config.collectable_positions.clear();
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        let report = tick(&mut state, &config, &mut rng);
        assert_eq!(report.outcome, Some(Outcome::Win { score: 0 }));
    }

    #[test]
    fn test_win_short_circuits_loss() {
        // Everything collected and an enemy on top of the player
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(50.0, 50.0).with_velocity(0.0, 0.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);
        for c in &mut state.collectables {
            c.collected = true;
        }
        state.score = state.collectables.len() as u32;

        let report = tick(&mut state, &config, &mut rng);
        assert_eq!(report.outcome, Some(Outcome::Win { score: 3 }));
    }

    #[test]
    fn test_loss_tick_still_collects() {
        let mut config = quiet_config();
        config.enemy_spawns = vec![EnemySpawn::at(70.0, 60.0).with_velocity(0.0, 0.0)];
        config.collectable_positions = vec![Vec2::new(60.0, 60.0), Vec2::new(300.0, 10.0)];
        let mut rng = ScriptedRandom::never();
        let mut state = GameState::new(&config, &mut rng);

        let report = tick(&mut state, &config, &mut rng);
        assert_eq!(report.collected, vec![0]);
        assert_eq!(report.outcome, Some(Outcome::Loss { score: 1 }));
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::default();
        let mut rng1 = seeded(99999);
        let mut rng2 = seeded(99999);
        let mut state1 = GameState::new(&config, &mut rng1);
        let mut state2 = GameState::new(&config, &mut rng2);

        for i in 0..300 {
            let vel = Vec2::new(((i / 40) % 3) as f32 - 1.0, ((i / 25) % 3) as f32 - 1.0) * 4.0;
            state1.player.vel = vel;
            state2.player.vel = vel;
            tick(&mut state1, &config, &mut rng1);
            tick(&mut state2, &config, &mut rng2);
        }

        assert_eq!(state1, state2);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            moves in prop::collection::vec((-1i8..=1, -1i8..=1), 1..200),
        ) {
            let config = GameConfig::default();
            let mut rng = seeded(seed);
            let mut state = GameState::new(&config, &mut rng);
            let max = Vec2::new(
                config.field_width - config.player_size,
                config.field_height - config.player_size,
            );

            for (dx, dy) in moves {
                if state.phase == GamePhase::GameOver {
                    break;
                }
                state.player.vel = Vec2::new(dx as f32, dy as f32) * config.player_speed;
                tick(&mut state, &config, &mut rng);
                prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= max.x);
                prop_assert!(state.player.pos.y >= 0.0 && state.player.pos.y <= max.y);
            }
        }

        #[test]
        fn prop_score_matches_collected(
            seed in any::<u64>(),
            moves in prop::collection::vec((-1i8..=1, -1i8..=1), 1..300),
        ) {
            let config = GameConfig::default();
            let mut rng = seeded(seed);
            let mut state = GameState::new(&config, &mut rng);
            let mut previous = vec![false; state.collectables.len()];

            for (dx, dy) in moves {
                state.player.vel = Vec2::new(dx as f32, dy as f32) * config.player_speed;
                tick(&mut state, &config, &mut rng);

                for (was, c) in previous.iter().zip(&state.collectables) {
                    prop_assert!(!*was || c.collected);
                }
                previous = state.collectables.iter().map(|c| c.collected).collect();
                prop_assert_eq!(state.score as usize, state.collected_count());
            }
        }
    }
}
