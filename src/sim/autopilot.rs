//! Demo autopilot
//!
//! Picks input axes the way a cautious player would: head for the nearest
//! oxygen tank, and veer away from mines that get close while unshielded.

use glam::Vec2;

use super::state::{Axes, GameState};

/// Mines nearer than this (center to center) are avoided
const DANGER_RADIUS: f32 = 70.0;
/// Per-axis slack before steering toward a target
const STEER_DEADBAND: f32 = 2.0;

fn axis(delta: f32, deadband: f32) -> i8 {
    if delta > deadband {
        1
    } else if delta < -deadband {
        -1
    } else {
        0
    }
}

/// Steering input for the current state
pub fn steer(state: &GameState) -> Axes {
    let pos = state.player.pos;

    if !state.player.is_shielded() {
        let threat = state
            .mines
            .iter()
            .map(|m| (m, m.pos.distance(pos)))
            .filter(|(_, d)| *d < DANGER_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((mine, _)) = threat {
            let away = pos - mine.pos;
            // Sitting exactly on the mine: any direction will do
            let away = if away == Vec2::ZERO { Vec2::NEG_Y } else { away };
            return Axes::new(axis(away.x, 0.0), axis(away.y, 0.0));
        }
    }

    let target = state
        .tokens
        .iter()
        .map(|t| t.pos)
        .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));

    match target {
        Some(target) => {
            let delta = target - pos;
            Axes::new(axis(delta.x, STEER_DEADBAND), axis(delta.y, STEER_DEADBAND))
        }
        None => Axes::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Mine, Token};
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_heads_for_nearest_token() {
        let mut state = GameState::with_seed(8);
        let p = state.player.pos;
        state.mines.clear();
        state.tokens = vec![
            Token { id: 1, pos: p + Vec2::new(300.0, 0.0), radius: 10.0, pulse: 0.0 },
            Token { id: 2, pos: p + Vec2::new(-50.0, -50.0), radius: 10.0, pulse: 0.0 },
        ];
        assert_eq!(steer(&state), Axes::new(-1, -1));
    }

    #[test]
    fn test_flees_close_mine_when_unshielded() {
        let mut state = GameState::with_seed(8);
        let p = state.player.pos;
        state.player.shield = 0;
        state.mines = vec![Mine::new(1, p + Vec2::new(30.0, 0.0), 0.0, 1.0)];
        state.tokens = vec![Token { id: 2, pos: p + Vec2::new(200.0, 0.0), radius: 10.0, pulse: 0.0 }];
        assert_eq!(steer(&state).x, -1);

        state.player.shield = 10;
        assert_eq!(steer(&state), Axes::new(1, 0));
    }

    #[test]
    fn test_clears_a_quiet_level() {
        let mut state = GameState::with_seed(123);
        state.start();
        state.mines.clear();

        for _ in 0..20_000 {
            if state.phase != GamePhase::Running {
                break;
            }
            let input = TickInput { axes: steer(&state) };
            tick(&mut state, &input);
        }

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.level, 2);
    }
}
