//! Data-driven game balance
//!
//! Session shape and field size, loadable from JSON. Missing keys fall back to
//! the compile-time defaults in [`crate::consts`], so a tuning file only needs
//! the values it changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Smallest field edge that still leaves room inside the widest spawn margin
const MIN_FIELD_EDGE: f32 = 2.0 * CURRENT_MARGIN + 2.0 * PLAYER_RADIUS;
/// Largest token pool a single level may ask for
pub const MAX_TOKENS_PER_LEVEL: u32 = 100;
/// Longest run a tuning file may configure
pub const MAX_LEVEL_COUNT: u32 = 100;

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play field width
    pub field_width: f32,
    /// Play field height
    pub field_height: f32,
    /// Tokens required to clear a level
    pub tokens_per_level: u32,
    /// Number of levels in a full run
    pub max_levels: u32,
    /// Lives granted on a full reset
    pub starting_lives: u8,
    /// RNG seed used for every full reset
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tokens_per_level: TOKENS_PER_LEVEL,
            max_levels: MAX_LEVELS,
            starting_lives: MAX_LIVES,
            seed: 0x5EA5_1DE5,
        }
    }
}

impl Tuning {
    /// Parse a tuning document. Values are sanitized before being returned.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Field dimensions as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Pull every value back into a playable range
    pub fn sanitized(mut self) -> Self {
        if self.field_width < MIN_FIELD_EDGE {
            log::warn!("field_width {} too small, using {}", self.field_width, MIN_FIELD_EDGE);
            self.field_width = MIN_FIELD_EDGE;
        }
        if self.field_height < MIN_FIELD_EDGE {
            log::warn!("field_height {} too small, using {}", self.field_height, MIN_FIELD_EDGE);
            self.field_height = MIN_FIELD_EDGE;
        }
        let tokens = self.tokens_per_level.clamp(1, MAX_TOKENS_PER_LEVEL);
        if tokens != self.tokens_per_level {
            log::warn!("tokens_per_level {} out of range, using {}", self.tokens_per_level, tokens);
            self.tokens_per_level = tokens;
        }
        let levels = self.max_levels.clamp(1, MAX_LEVEL_COUNT);
        if levels != self.max_levels {
            log::warn!("max_levels {} out of range, using {}", self.max_levels, levels);
            self.max_levels = levels;
        }
        let lives = self.starting_lives.clamp(1, MAX_LIVES);
        if lives != self.starting_lives {
            log::warn!("starting_lives {} out of range, using {}", self.starting_lives, lives);
            self.starting_lives = lives;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_partial_document() {
        let tuning = Tuning::from_json(r#"{ "max_levels": 3, "seed": 42 }"#).unwrap();
        assert_eq!(tuning.max_levels, 3);
        assert_eq!(tuning.seed, 42);
        assert_eq!(tuning.tokens_per_level, TOKENS_PER_LEVEL);
        assert_eq!(tuning.field(), Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let tuning = Tuning::from_json(
            r#"{ "field_width": 10, "tokens_per_level": 0, "max_levels": 0, "starting_lives": 9 }"#,
        )
        .unwrap();
        assert_eq!(tuning.field_width, MIN_FIELD_EDGE);
        assert_eq!(tuning.tokens_per_level, 1);
        assert_eq!(tuning.max_levels, 1);
        assert_eq!(tuning.starting_lives, MAX_LIVES);
    }

    #[test]
    fn test_oversized_pools_are_capped() {
        let tuning = Tuning::from_json(r#"{ "tokens_per_level": 4000000000, "max_levels": 4000000000 }"#)
            .unwrap();
        assert_eq!(tuning.tokens_per_level, MAX_TOKENS_PER_LEVEL);
        assert_eq!(tuning.max_levels, MAX_LEVEL_COUNT);

        let state = crate::sim::GameState::new(tuning);
        assert_eq!(state.tokens.len(), MAX_TOKENS_PER_LEVEL as usize);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "max_levels": "ten" }"#).is_err());
    }
}
