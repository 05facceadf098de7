//! Read-only render projection
//!
//! Rebuilt from `GameState` after every tick and handed to whatever draws the
//! frame. The renderer never sees the live world, so nothing it does can feed
//! back into the simulation.

use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::sim::{Entity, EntityKind, FloatingText, GamePhase, GameState, Particle};

/// Visual key for the player sprite
pub const PLAYER_VISUAL: &str = "player";

/// Lookup the renderer offers for optional art
///
/// Only decides between an image and the procedural fallback. Simulation
/// outcomes never depend on it.
pub trait AssetCatalog {
    fn has_visual(&self, key: &str) -> bool;

    /// Key to draw with, or `None` for procedural rendering
    fn resolve<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.has_visual(key).then_some(key)
    }
}

/// Catalog with no art at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn has_visual(&self, _key: &str) -> bool {
        false
    }
}

impl AssetCatalog for HashSet<String> {
    fn has_visual(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Modifier flags a renderer may draw (auras, outlines, tints)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisualFlags {
    pub stunned: bool,
    pub shielded: bool,
    pub speed_boosted: bool,
    pub chaser: bool,
    /// Held in place by the freeze pickup
    pub frozen: bool,
}

impl VisualFlags {
    pub const STUNNED: u32 = 1;
    pub const SHIELDED: u32 = 1 << 1;
    pub const SPEED_BOOSTED: u32 = 1 << 2;
    pub const CHASER: u32 = 1 << 3;
    pub const FROZEN: u32 = 1 << 4;

    /// Pack into a bitfield for GPU instance data
    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        for (set, bit) in [
            (self.stunned, Self::STUNNED),
            (self.shielded, Self::SHIELDED),
            (self.speed_boosted, Self::SPEED_BOOSTED),
            (self.chaser, Self::CHASER),
            (self.frozen, Self::FROZEN),
        ] {
            if set {
                bits |= bit;
            }
        }
        bits
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntity {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub kind: EntityKind,
    pub visual_key: &'static str,
    pub tier: u8,
    pub color: u32,
    /// Sprite faces left when moving left
    pub facing_left: bool,
    /// Jelly wobble phase
    pub oscillation_offset: f32,
    pub flags: VisualFlags,
}

impl RenderEntity {
    fn from_entity(e: &Entity, visual_key: &'static str, frozen: bool) -> Self {
        Self {
            id: e.id,
            x: e.pos.x,
            y: e.pos.y,
            radius: e.radius,
            kind: e.kind,
            visual_key,
            tier: e.tier,
            color: e.color,
            facing_left: e.vel.x < 0.0,
            oscillation_offset: e.oscillation_offset,
            flags: VisualFlags {
                stunned: e.is_stunned(),
                shielded: e.has_shield,
                speed_boosted: e.is_speed_boosted(),
                chaser: e.is_chaser,
                frozen,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
}

impl From<&Particle> for RenderParticle {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            size: p.size,
            color: p.color,
            alpha: (p.alpha * p.life).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: u32,
    pub alpha: f32,
}

impl From<&FloatingText> for RenderText {
    fn from(t: &FloatingText) -> Self {
        Self {
            x: t.pos.x,
            y: t.pos.y,
            text: t.text.clone(),
            color: t.color,
            alpha: t.alpha(),
        }
    }
}

/// Level presentation data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView {
    pub index: usize,
    pub name: &'static str,
    pub background: &'static str,
    pub bg_top: u32,
    pub bg_bottom: u32,
    pub goal_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub level_score: u64,
    pub combo: u32,
    pub frenzy_meter: f32,
    pub frenzy_active: bool,
    /// 0..=1 toward the goal radius
    pub growth_progress: f32,
    pub dash_ready: bool,
    pub dash_cooldown: u32,
    pub freeze_ticks: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub level: LevelView,
    pub player: RenderEntity,
    pub entities: Vec<RenderEntity>,
    pub particles: Vec<RenderParticle>,
    pub bubbles: Vec<RenderParticle>,
    pub texts: Vec<RenderText>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let frozen = state.session.is_frozen();
        let config = state.level_config();

        let entities = state
            .enemies
            .iter()
            .map(|e| RenderEntity::from_entity(e, e.visual_key(), frozen && !e.kind.is_pickup()))
            .collect();

        Self {
            phase: state.phase(),
            tick: state.time_ticks,
            width: state.bounds.x,
            height: state.bounds.y,
            level: LevelView {
                index: state.session.level,
                name: config.name,
                background: config.background,
                bg_top: config.bg_top,
                bg_bottom: config.bg_bottom,
                goal_radius: config.goal_radius,
            },
            player: RenderEntity::from_entity(&state.player, PLAYER_VISUAL, false),
            entities,
            particles: state.effects.particles.iter().map(RenderParticle::from).collect(),
            bubbles: state.effects.bubbles.iter().map(RenderParticle::from).collect(),
            texts: state.effects.texts.iter().map(RenderText::from).collect(),
            hud: Hud {
                score: state.session.score,
                level_score: state.session.level_score,
                combo: state.session.combo,
                frenzy_meter: state.session.frenzy_meter,
                frenzy_active: state.session.frenzy_active,
                growth_progress: state.growth_progress(),
                dash_ready: state.session.dash_ready(),
                dash_cooldown: state.session.dash_cooldown,
                freeze_ticks: state.session.freeze_ticks,
            },
        }
    }

    /// Every drawable body, player last so it draws on top
    pub fn bodies(&self) -> impl Iterator<Item = &RenderEntity> {
        self.entities.iter().chain(std::iter::once(&self.player))
    }

    /// Packed per-body instance data for an instanced circle shader
    pub fn instances(&self) -> Vec<EntityInstance> {
        self.bodies().map(EntityInstance::from).collect()
    }
}

/// GPU instance record for one body
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
    pub flags: u32,
}

impl From<&RenderEntity> for EntityInstance {
    fn from(e: &RenderEntity) -> Self {
        Self {
            position: [e.x, e.y],
            radius: e.radius,
            color: rgba(e.color, 1.0),
            flags: e.flags.bits(),
        }
    }
}

/// 0xRRGGBB to normalized RGBA
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}
