//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, velocities in px/tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order, reverse pass for contacts)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod entity;
pub mod input;
pub mod level;
pub mod movement;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use effects::{Effects, FloatingText, GameEvent, Particle};
pub use entity::{Entity, EntityKind, MAX_TIER, PickupKind, TierProfile};
pub use input::{ControlMode, HeldDirections, TickInput};
pub use level::{LAST_LEVEL, LEVELS, LevelConfig};
pub use session::{GamePhase, Session, points_for_eat};
pub use state::GameState;
pub use tick::tick;
