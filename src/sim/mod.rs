//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use collision::{Collider, overlapping};
pub use level::{currents_count, mines_count, setup_level, speed_multiplier};
pub use state::{
    Axes, Current, GameEvent, GamePhase, GameState, LevelResult, Mine, Outcome, Player, PowerUp,
    PowerUpKind, Snapshot, Token,
};
pub use tick::{TickInput, apply_power_up, tick};
