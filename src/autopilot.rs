//! Attract-mode player
//!
//! Produces a `TickInput` from the current world the same way a human would:
//! pointer steering plus the two action buttons. Used by the headless runner
//! and by the web build's idle demo.

use glam::Vec2;

use crate::sim::movement::is_suction_target;
use crate::sim::{ControlMode, Entity, EntityKind, GameState, TickInput};

/// Heuristic knobs
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Threats closer than this (edge to edge) are avoided
    pub flee_radius: f32,
    /// Threats closer than this trigger a dash
    pub panic_radius: f32,
    /// How far ahead of the player the flee target is placed
    pub flee_lead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            flee_radius: 180.0,
            panic_radius: 60.0,
            flee_lead: 200.0,
        }
    }
}

/// Whether touching `e` would hurt a player of `player_radius`
fn is_threat(e: &Entity, player_radius: f32) -> bool {
    match e.kind {
        EntityKind::Mine | EntityKind::Jelly => true,
        EntityKind::Normal | EntityKind::Gold | EntityKind::Electric => e.radius >= player_radius,
        EntityKind::Pickup(_) => false,
    }
}

/// Worth swimming toward: pickups and anything safely edible except electric
fn is_prey(e: &Entity, player_radius: f32) -> bool {
    match e.kind {
        EntityKind::Pickup(_) => true,
        EntityKind::Normal | EntityKind::Gold => e.radius < player_radius,
        EntityKind::Electric | EntityKind::Mine | EntityKind::Jelly => false,
    }
}

fn gap(player: &Entity, e: &Entity) -> f32 {
    player.pos.distance(e.pos) - player.radius - e.radius
}

impl Autopilot {
    /// Input for the next tick
    pub fn input_for(&self, state: &GameState) -> TickInput {
        let player = &state.player;
        let mut input = TickInput {
            mode: ControlMode::Pointer,
            ..Default::default()
        };

        let threat = state
            .enemies
            .iter()
            .filter(|e| is_threat(e, player.radius))
            .map(|e| (e, gap(player, e)))
            .filter(|(_, d)| *d < self.flee_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((threat, distance)) = threat {
            let away = (player.pos - threat.pos).normalize_or(Vec2::X);
            // Slide along walls instead of pinning against them
            let target = player.pos + away * self.flee_lead;
            input.pointer = target.clamp(Vec2::ZERO, state.bounds);
            input.dash = distance < self.panic_radius;
            return input;
        }

        let prey = state
            .enemies
            .iter()
            .filter(|e| is_prey(e, player.radius))
            .min_by(|a, b| {
                player
                    .pos
                    .distance_squared(a.pos)
                    .total_cmp(&player.pos.distance_squared(b.pos))
            });

        match prey {
            Some(prey) => {
                input.pointer = prey.pos;
                input.suction = is_suction_target(
                    prey,
                    player.radius,
                    state.tuning.player.suction_size_ratio,
                ) && player.pos.distance(prey.pos) < state.tuning.player.suction_range;
            }
            None => {
                // Drift in a slow figure around the middle
                let t = state.time_ticks as f32 * 0.01;
                let wobble = Vec2::new(t.sin(), (t * 0.7).sin()) * state.bounds * 0.25;
                input.pointer = state.bounds * 0.5 + wobble;
            }
        }
        input
    }
}
