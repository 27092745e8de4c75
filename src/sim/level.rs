//! Level generation and difficulty scaling
//!
//! Difficulty grows with the level number only; every random draw goes
//! through the session RNG, so a seed fully determines a layout.

use std::f32::consts::TAU;

use super::state::{Current, GameEvent, GameState, Mine, Player, Token};
use crate::consts::*;
use crate::{rand_point, rand_range};

/// Movement multiplier applied to the player and mines on `level`
pub fn speed_multiplier(level: u32) -> f64 {
    1.0 + (level as f64 - 1.0) * SPEED_STEP_PER_LEVEL
}

/// Mines spawned on `level`
pub fn mines_count(level: u32) -> u32 {
    (4 + (level as f64 * 0.9).floor() as u32).min(MAX_MINES)
}

/// Currents spawned on `level`
pub fn currents_count(level: u32) -> u32 {
    (1 + level / 3).min(MAX_CURRENTS)
}

/// Chance that a collected token drops a power-up on `level`
pub fn power_up_chance(level: u32) -> f64 {
    POWER_UP_BASE_CHANCE + level as f64 * POWER_UP_CHANCE_PER_LEVEL
}

/// Score for one token at the given speed multiplier
pub fn token_score(speed_multiplier: f64) -> u64 {
    TOKEN_BASE_SCORE + (10.0 * speed_multiplier).floor() as u64
}

/// Lay out `level`: clear per-level pools, spawn fresh entities, and park
/// the player at the start point behind a short spawn shield
pub fn setup_level(state: &mut GameState, level: u32) {
    let field = state.field();
    let level = level.clamp(1, state.max_levels());

    state.level = level;
    state.tokens_collected = 0;
    state.tokens.clear();
    state.mines.clear();
    state.currents.clear();
    state.power_ups.clear();
    state.speed_multiplier = speed_multiplier(level);

    for _ in 0..state.tokens_target() {
        let id = state.next_entity_id();
        let pos = rand_point(&mut state.rng, field, TOKEN_MARGIN);
        let pulse = rand_range(&mut state.rng, 0.0, TAU);
        state.tokens.push(Token {
            id,
            pos,
            radius: TOKEN_RADIUS,
            pulse,
        });
    }

    let mines = mines_count(level);
    let currents = currents_count(level);
    state.mine_count = mines;
    state.current_count = currents;

    for _ in 0..mines {
        let id = state.next_entity_id();
        let pos = rand_point(&mut state.rng, field, MINE_MARGIN);
        let speed = rand_range(&mut state.rng, 0.6, 1.5) + level as f32 * 0.07;
        let heading = rand_range(&mut state.rng, 0.0, TAU);
        state.mines.push(Mine::new(id, pos, heading, speed));
    }

    for _ in 0..currents {
        let id = state.next_entity_id();
        let pos = rand_point(&mut state.rng, field, CURRENT_MARGIN);
        let range = rand_range(&mut state.rng, 60.0, 120.0) + level as f32 * 4.0;
        let vx = rand_range(&mut state.rng, -0.6, 0.6);
        let vy = rand_range(&mut state.rng, -0.6, 0.6);
        let phase = rand_range(&mut state.rng, 0.0, 1000.0);
        state.currents.push(Current {
            id,
            pos,
            range,
            vel: glam::Vec2::new(vx, vy),
            phase,
        });
    }

    state.player.pos = Player::start_position(field);
    state.player.vel = glam::Vec2::ZERO;
    state.player.shield = SPAWN_SHIELD_TICKS;
    state.banner_ticks = LEVEL_BANNER_TICKS;

    log::info!(
        "Level {}: speed={:.2}x mines={} currents={}",
        level,
        state.speed_multiplier,
        mines,
        currents
    );

    state.emit(GameEvent::LevelStarted {
        level,
        speed_multiplier: state.speed_multiplier,
        mines,
        currents,
    });
}
