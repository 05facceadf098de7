//! Normalized per-tick input
//!
//! Whatever captures keys, mouse or touch boils it down to a `TickInput`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How directional intent is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Swim toward the pointer
    #[default]
    Pointer,
    /// Discrete direction keys
    Directional,
}

/// Direction keys held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    /// Unit heading for the held keys (diagonals normalized), zero if none or cancelled out
    pub fn heading(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub directions: HeldDirections,
    /// Primary action (click / space)
    pub dash: bool,
    /// Secondary action (right click / shift)
    pub suction: bool,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
    pub mode: ControlMode,
}
