//! Platform abstraction layer
//!
//! Host-side glue between whatever drives the game and the simulation:
//! - Input: key identifiers to per-tick axes
//! - Frame: clamped elapsed time to fixed ticks, tick-if-active scheduling

pub mod frame;
pub mod input;

pub use frame::FrameLoop;
pub use input::{Control, KeyState};
