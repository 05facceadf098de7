//! Ocean Frenzy - a 2D "grow by eating" arcade game core
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (movement, spawning, collisions, progression)
//! - `snapshot`: Read-only render projection handed to an external renderer
//! - `audio`: Sound keys and the audio collaborator trait
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `autopilot`: Attract-mode input generator

pub mod audio;
pub mod autopilot;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use snapshot::{AssetCatalog, RenderSnapshot};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per animation frame at 60 Hz)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Milliseconds of game time covered by one tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_RATE_HZ as f64;
    /// Maximum ticks a host may run per frame to catch up
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default world dimensions (matches a 720p canvas)
    pub const DEFAULT_WORLD_WIDTH: f32 = 1280.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 720.0;

    /// Palette (0xRRGGBB)
    pub mod colors {
        pub const PLAYER: u32 = 0xFF6B6B;
        pub const GOLD: u32 = 0xFFD700;
        pub const TIERS: [u32; 5] = [0xA8E6CF, 0xDCEDC1, 0xFFD3B6, 0xFF8B94, 0x2C3E50];
        pub const MINE: u32 = 0x333333;
        pub const JELLY: u32 = 0xE040FB;
        pub const ELECTRIC: u32 = 0xFFFF00;
        pub const SHIELD: u32 = 0x00BFFF;
        pub const SPEED: u32 = 0xFF4500;
        pub const FREEZE: u32 = 0x00FFFF;
        pub const GROWTH: u32 = 0x32CD32;
        pub const CHASER: u32 = 0xFF0000;
        pub const WHITE: u32 = 0xFFFFFF;
        pub const COMBO_TEXT: u32 = 0x76FF03;
        pub const EXPLOSION: u32 = 0xFFA500;
        pub const DANGER: u32 = 0xFF0000;
    }
}

/// Unit vector pointing from `from` toward `to`, or zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector at `angle` radians
#[inline]
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Knockback velocity pushing `target` directly away from `source`
#[inline]
pub fn knockback(source: Vec2, target: Vec2, strength: f32) -> Vec2 {
    let away = target - source;
    from_angle(away.y.atan2(away.x)) * strength
}
