//! Fixed timestep simulation tick
//!
//! Advances every entity by one frame and resolves pickups and mine hits.
//! Step order matters: currents, power-up expiry, mines, player, then
//! tokens, power-ups and mines against the player, then level completion.

use rand::Rng;

use super::collision::{Collider, overlapping};
use super::level::{power_up_chance, token_score};
use super::lifecycle::finish;
use super::state::{Axes, GameEvent, GamePhase, GameState, LevelResult, Outcome, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::rand_point;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Directional controls sampled for this tick
    pub axes: Axes,
}

/// Advance the game state by one fixed tick. Does nothing unless Running.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.flash_ticks = state.flash_ticks.saturating_sub(1);
    state.banner_ticks = state.banner_ticks.saturating_sub(1);

    let field = state.field();
    let speed = state.speed_multiplier as f32;

    for current in &mut state.currents {
        current.update();
    }

    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state.power_ups.retain(|p| !p.is_expired());

    for mine in &mut state.mines {
        mine.update(speed, field);
    }

    state.player.update(input.axes, speed, &state.currents, field);

    collect_tokens(state);
    collect_power_ups(state);
    if resolve_mine_hits(state) {
        return;
    }

    check_level_complete(state);
}

/// Pick up every token under the player (back-to-front so removal is safe)
fn collect_tokens(state: &mut GameState) {
    let hits = overlapping(&state.player, &state.tokens);
    for &i in hits.iter().rev() {
        let token = state.tokens.remove(i);
        state.tokens_collected = (state.tokens_collected + 1).min(state.tokens_target());
        state.score += token_score(state.speed_multiplier);
        log::debug!(
            "Token {} collected ({}/{}), score {}",
            token.id,
            state.tokens_collected,
            state.tokens_target(),
            state.score
        );
        state.emit(GameEvent::TokenCollected {
            id: token.id,
            collected: state.tokens_collected,
            target: state.tokens_target(),
            score: state.score,
        });

        if state.rng.random::<f64>() < power_up_chance(state.level) {
            drop_random_power_up(state);
        }
    }
}

/// Spawn one random power-up somewhere on the field
fn drop_random_power_up(state: &mut GameState) {
    let field = state.field();
    let kind = PowerUpKind::random(&mut state.rng);
    let pos = rand_point(&mut state.rng, field, POWER_UP_MARGIN);
    let id = state.next_entity_id();
    log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, pos.x, pos.y);
    state.power_ups.push(PowerUp::new(id, kind, pos));
    state.emit(GameEvent::PowerUpSpawned { id, kind, pos });
}

fn collect_power_ups(state: &mut GameState) {
    let hits = overlapping(&state.player, &state.power_ups);
    for &i in hits.iter().rev() {
        let power_up = state.power_ups.remove(i);
        apply_power_up(state, power_up.kind);
        state.emit(GameEvent::PowerUpCollected {
            id: power_up.id,
            kind: power_up.kind,
        });
    }
}

/// Apply a power-up effect
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Power-up {:?} applied", kind);
    match kind {
        PowerUpKind::Shield => {
            // Never cuts an existing longer shield short
            state.player.shield = state.player.shield.max(POWER_UP_SHIELD_TICKS);
        }
        PowerUpKind::Slow => {
            for mine in &mut state.mines {
                mine.vel *= SLOW_FACTOR;
            }
        }
        PowerUpKind::Score => {
            state.score += SCORE_POWER_UP_BONUS;
        }
    }
}

/// Mines against the player, in list order. Returns true if the session ended.
fn resolve_mine_hits(state: &mut GameState) -> bool {
    for i in 0..state.mines.len() {
        if !state.player.hits(&state.mines[i]) {
            continue;
        }

        if state.player.is_shielded() {
            state.mines[i].reflect();
            let id = state.mines[i].id;
            state.emit(GameEvent::MineDeflected { id });
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        state.player.shield = HIT_SHIELD_TICKS;
        state.flash_ticks = DAMAGE_FLASH_TICKS;
        log::info!("Mine hit, {} lives left", state.lives);
        state.emit(GameEvent::DamageTaken { lives: state.lives });

        if state.lives == 0 {
            finish(state, Outcome::Defeat);
            return true;
        }
    }
    false
}

fn check_level_complete(state: &mut GameState) {
    if state.tokens_collected < state.tokens_target() {
        return;
    }

    let result = LevelResult {
        level: state.level,
        speed_multiplier: state.speed_multiplier,
        score: state.score,
        lives: state.lives,
        tokens: state.tokens_target(),
    };
    log::info!("{}", result);
    state.results.push(result.clone());

    if state.level >= state.max_levels() {
        finish(state, Outcome::Victory);
    } else {
        state.level += 1;
        state.phase = GamePhase::LevelComplete;
        state.emit(GameEvent::LevelComplete { result });
    }
}
