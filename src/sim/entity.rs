//! Entity data model
//!
//! The player and every fish, hazard and pickup share one `Entity` struct.
//! `EntityKind` is the closed set of things that can swim around; which of
//! the optional modifiers mean anything depends on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::colors;

/// Highest non-player difficulty tier
pub const MAX_TIER: u8 = 4;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// One-hit damage absorption
    Shield,
    /// Temporary speed multiplier
    Speed,
    /// Stops spawning and enemy motion for a while
    Freeze,
    /// Instant radius bonus
    Growth,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Shield,
        PickupKind::Speed,
        PickupKind::Freeze,
        PickupKind::Growth,
    ];

    pub fn color(&self) -> u32 {
        match self {
            PickupKind::Shield => colors::SHIELD,
            PickupKind::Speed => colors::SPEED,
            PickupKind::Freeze => colors::FREEZE,
            PickupKind::Growth => colors::GROWTH,
        }
    }
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Normal,
    /// High-value, fast, small
    Gold,
    /// Detonates on contact
    Mine,
    /// Stings through shields, never consumed
    Jelly,
    /// Edible, but stuns whoever eats it
    Electric,
    Pickup(PickupKind),
}

impl EntityKind {
    pub fn is_pickup(&self) -> bool {
        matches!(self, EntityKind::Pickup(_))
    }

    /// Fish-type entities resolve by size comparison
    pub fn is_fish(&self) -> bool {
        matches!(self, EntityKind::Normal | EntityKind::Gold | EntityKind::Electric)
    }

    /// Jellies and pickups drift vertically and ignore their horizontal velocity
    pub fn moves_vertically_only(&self) -> bool {
        matches!(self, EntityKind::Jelly | EntityKind::Pickup(_))
    }

    /// Whether the suction ability may drag this entity (size still applies to fish)
    pub fn is_pullable(&self) -> bool {
        !matches!(self, EntityKind::Mine | EntityKind::Jelly)
    }
}

/// Per-tier base radius range and color
#[derive(Debug, Clone, Copy)]
pub struct TierProfile {
    pub min_radius: f32,
    pub radius_spread: f32,
    pub color: u32,
}

/// Radius ranges widen with tier
pub const TIER_PROFILES: [TierProfile; 5] = [
    TierProfile { min_radius: 10.0, radius_spread: 5.0, color: colors::TIERS[0] },
    TierProfile { min_radius: 25.0, radius_spread: 8.0, color: colors::TIERS[1] },
    TierProfile { min_radius: 45.0, radius_spread: 10.0, color: colors::TIERS[2] },
    TierProfile { min_radius: 70.0, radius_spread: 15.0, color: colors::TIERS[3] },
    TierProfile { min_radius: 110.0, radius_spread: 20.0, color: colors::TIERS[4] },
];

impl TierProfile {
    /// Look up a tier, clamping to the valid range
    pub fn get(tier: u8) -> &'static TierProfile {
        &TIER_PROFILES[tier.min(MAX_TIER) as usize]
    }

    /// Radius for a uniform roll in [0, 1)
    pub fn radius(&self, roll: f32) -> f32 {
        self.min_radius + roll * self.radius_spread
    }
}

/// A player or non-player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Always > 0
    pub radius: f32,
    /// Base movement speed (px/tick)
    pub speed: f32,
    pub kind: EntityKind,
    /// Difficulty class 0..=MAX_TIER (0 for hazards and pickups)
    pub tier: u8,
    pub color: u32,
    /// Ticks remaining with movement input disabled
    pub stun_ticks: u32,
    /// Ticks remaining with the speed multiplier active
    pub speed_boost_ticks: u32,
    /// Absorbs one hit
    pub has_shield: bool,
    /// Steers toward the player when bigger
    pub is_chaser: bool,
    /// Wave phase, jelly only
    pub oscillation_offset: f32,
}

impl Entity {
    /// Create a bare entity of `kind` at `pos`
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, radius: f32, speed: f32) -> Self {
        let color = match kind {
            EntityKind::Normal => colors::TIERS[0],
            EntityKind::Gold => colors::GOLD,
            EntityKind::Mine => colors::MINE,
            EntityKind::Jelly => colors::JELLY,
            EntityKind::Electric => colors::ELECTRIC,
            EntityKind::Pickup(p) => p.color(),
        };
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            speed,
            kind,
            tier: 0,
            color,
            stun_ticks: 0,
            speed_boost_ticks: 0,
            has_shield: false,
            is_chaser: false,
            oscillation_offset: 0.0,
        }
    }

    /// The player fish
    pub fn player(pos: Vec2, radius: f32, speed: f32) -> Self {
        let mut player = Self::new(0, EntityKind::Normal, pos, radius, speed);
        player.color = colors::PLAYER;
        player
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_ticks > 0
    }

    pub fn is_speed_boosted(&self) -> bool {
        self.speed_boost_ticks > 0
    }

    /// Count down status timers (clamped at zero)
    pub fn tick_status(&mut self) {
        self.stun_ticks = self.stun_ticks.saturating_sub(1);
        self.speed_boost_ticks = self.speed_boost_ticks.saturating_sub(1);
    }

    /// Clear every transient modifier
    pub fn clear_status(&mut self) {
        self.stun_ticks = 0;
        self.speed_boost_ticks = 0;
        self.has_shield = false;
    }

    /// Shrink by `factor`, never below `floor`
    pub fn shrink(&mut self, factor: f32, floor: f32) {
        self.radius = (self.radius * factor).max(floor);
    }

    /// Whether two entities overlap enough to interact
    pub fn overlaps(&self, other: &Entity, overlap_factor: f32) -> bool {
        self.pos.distance(other.pos) < (self.radius + other.radius) * overlap_factor
    }

    /// Visual asset key for the renderer
    pub fn visual_key(&self) -> &'static str {
        match self.kind {
            EntityKind::Normal => match self.tier.min(MAX_TIER) {
                0 => "enemy0",
                1 => "enemy1",
                2 => "enemy2",
                3 => "enemy3",
                _ => "enemy4",
            },
            EntityKind::Gold => "gold",
            EntityKind::Mine => "mine",
            EntityKind::Jelly => "jelly",
            EntityKind::Electric => "electric",
            EntityKind::Pickup(PickupKind::Shield) => "shield_item",
            EntityKind::Pickup(PickupKind::Speed) => "speed_item",
            EntityKind::Pickup(PickupKind::Freeze) => "freeze_item",
            EntityKind::Pickup(PickupKind::Growth) => "growth_item",
        }
    }
}
