//! Sub Rescue - A single-screen submarine arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, levels, collisions, lifecycle)
//! - `platform`: Host-side input mapping and frame scheduling
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Upper bound on elapsed time fed into a single frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Session shape
    pub const MAX_LEVELS: u32 = 10;
    pub const TOKENS_PER_LEVEL: u32 = 10;
    pub const MAX_LIVES: u8 = 3;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 2.4;
    /// Start point sits this far above the bottom edge, horizontally centered
    pub const PLAYER_START_INSET: f32 = 60.0;
    /// Below this speed the facing angle holds still
    pub const FACING_DEADZONE: f32 = 0.05;
    pub const FACING_BLEND: f32 = 0.15;

    /// Shield windows (ticks)
    pub const SPAWN_SHIELD_TICKS: u32 = 60;
    pub const HIT_SHIELD_TICKS: u32 = 90;
    pub const POWER_UP_SHIELD_TICKS: u32 = 240;

    /// Entity radii
    pub const TOKEN_RADIUS: f32 = 10.0;
    pub const MINE_RADIUS: f32 = 12.0;
    pub const POWER_UP_RADIUS: f32 = 9.0;

    /// Spawn margins (distance kept from the field edge)
    pub const TOKEN_MARGIN: f32 = 30.0;
    pub const MINE_MARGIN: f32 = 20.0;
    pub const CURRENT_MARGIN: f32 = 80.0;
    pub const POWER_UP_MARGIN: f32 = 30.0;

    /// Difficulty scaling
    pub const SPEED_STEP_PER_LEVEL: f64 = 0.12;
    pub const MAX_MINES: u32 = 18;
    pub const MAX_CURRENTS: u32 = 6;

    /// Scoring
    pub const TOKEN_BASE_SCORE: u64 = 100;
    pub const SCORE_POWER_UP_BONUS: u64 = 500;

    /// Power-ups
    pub const POWER_UP_LIFE_TICKS: u32 = 12 * 60;
    pub const POWER_UP_BASE_CHANCE: f64 = 0.10;
    pub const POWER_UP_CHANCE_PER_LEVEL: f64 = 0.008;
    pub const SLOW_FACTOR: f32 = 0.6;

    /// Current modulation
    pub const CURRENT_PHASE_STEP: f32 = 0.02;

    /// Presentation cue durations (ticks)
    pub const DAMAGE_FLASH_TICKS: u32 = 12;
    pub const LEVEL_BANNER_TICKS: u32 = 90;
}

/// Uniform random value in `[min, max)`
///
/// Never panics on an empty range; `min == max` yields `min`.
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Random point inside `field` keeping `margin` away from every edge
#[inline]
pub fn rand_point<R: Rng + ?Sized>(rng: &mut R, field: Vec2, margin: f32) -> Vec2 {
    let x = rand_range(rng, margin, field.x - margin);
    let y = rand_range(rng, margin, field.y - margin);
    Vec2::new(x, y)
}

/// Clamp a circle's center so the whole circle stays inside `field`
#[inline]
pub fn clamp_to_field(pos: Vec2, radius: f32, field: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, field.x - radius),
        pos.y.clamp(radius, field.y - radius),
    )
}

/// Squared distance between two points (no sqrt)
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.x * d.x + d.y * d.y
}

/// Circle overlap test; touching circles count as overlapping
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    dist2(a, b) <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_dist2() {
        assert_eq!(dist2(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0)), 25.0);
        assert_eq!(dist2(Vec2::ZERO, Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_circles_touching_count_as_hit() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.5, 0.0), 5.0));
    }

    #[test]
    fn test_clamp_to_field() {
        let field = Vec2::new(100.0, 50.0);
        assert_eq!(clamp_to_field(Vec2::new(-20.0, 80.0), 10.0, field), Vec2::new(10.0, 40.0));
        assert_eq!(clamp_to_field(Vec2::new(50.0, 25.0), 10.0, field), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_rand_range_degenerate() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(rand_range(&mut rng, 3.0, 3.0), 3.0);
    }

    proptest! {
        #[test]
        fn rand_range_stays_in_bounds(seed in any::<u64>(), min in -500.0f32..500.0, span in 0.1f32..500.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let v = rand_range(&mut rng, min, min + span);
            prop_assert!(v >= min && v <= min + span);
        }

        #[test]
        fn overlap_is_symmetric(ax in -100.0f32..100.0, ay in -100.0f32..100.0,
                                bx in -100.0f32..100.0, by in -100.0f32..100.0,
                                ra in 0.0f32..30.0, rb in 0.0f32..30.0) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }
    }
}
