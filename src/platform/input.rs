//! Keyboard state
//!
//! Arrow keys and WASD both drive the submarine. Each physical key is
//! tracked on its own, so releasing one alias doesn't cancel the other.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::Axes;

/// A directional control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

impl Control {
    /// Map a key identifier (DOM `KeyboardEvent.key` style) to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Control::Up),
            "ArrowDown" | "s" | "S" => Some(Control::Down),
            "ArrowLeft" | "a" | "A" => Some(Control::Left),
            "ArrowRight" | "d" | "D" => Some(Control::Right),
            _ => None,
        }
    }
}

/// Pressed/released state of every recognized key
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns false for keys that aren't controls.
    pub fn set(&mut self, key: &str, pressed: bool) -> bool {
        if Control::from_key(key).is_none() {
            return false;
        }
        // Shift turns "w" into "W"; treat them as one key
        let key = if key.len() == 1 {
            key.to_ascii_lowercase()
        } else {
            key.to_string()
        };
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
        true
    }

    /// Drop everything (focus lost)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.pressed
            .iter()
            .any(|key| Control::from_key(key) == Some(control))
    }

    /// Sample the axes for this tick; opposite keys cancel out
    pub fn axes(&self) -> Axes {
        let x = self.is_held(Control::Right) as i8 - self.is_held(Control::Left) as i8;
        let y = self.is_held(Control::Down) as i8 - self.is_held(Control::Up) as i8;
        Axes::new(x, y)
    }
}
