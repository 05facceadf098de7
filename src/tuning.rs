//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override any subset
//! of them. Missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

/// Player movement, dash and suction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Radius at level 0 start
    pub start_radius: f32,
    /// Radius floor after damage
    pub min_radius: f32,
    /// Base movement speed (px/tick)
    pub base_speed: f32,
    /// First-order easing factor toward target velocity
    pub steering_ease: f32,
    /// Damping with no directional key held
    pub idle_damping: f32,
    /// Damping when the pointer sits on the player
    pub pointer_idle_damping: f32,
    /// Drift damping while stunned
    pub stun_damping: f32,
    /// Pointer distance under which the player stops chasing it
    pub pointer_dead_zone: f32,
    pub dash_speed: f32,
    pub dash_cooldown_ticks: u32,
    /// Dash glide ends once the cooldown falls below this
    pub dash_glide_cooldown: u32,
    /// Braking applied to post-glide excess speed
    pub dash_brake: f32,
    pub dash_particles: u32,
    pub suction_range: f32,
    /// Fraction of the gap closed per tick for pulled entities
    pub suction_pull: f32,
    /// Fish are pullable only below this fraction of the player radius
    pub suction_size_ratio: f32,
    pub suction_speed_mult: f32,
    pub suction_particle_chance: f32,
    pub suction_sound_chance: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_radius: 15.0,
            min_radius: 15.0,
            base_speed: 5.0,
            steering_ease: 0.1,
            idle_damping: 0.95,
            pointer_idle_damping: 0.9,
            stun_damping: 0.95,
            pointer_dead_zone: 1.0,
            dash_speed: 15.0,
            dash_cooldown_ticks: 60,
            dash_glide_cooldown: 50,
            dash_brake: 0.9,
            dash_particles: 8,
            suction_range: 300.0,
            suction_pull: 0.02,
            suction_size_ratio: 0.9,
            suction_speed_mult: 0.5,
            suction_particle_chance: 0.2,
            suction_sound_chance: 0.1,
        }
    }
}

/// Points, combo and frenzy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub base_points: f64,
    pub gold_multiplier: f64,
    pub frenzy_multiplier: f64,
    /// Per-combo-step score bonus
    pub combo_step: f64,
    pub combo_window_ms: f64,
    pub frenzy_max: f32,
    /// Meter decay per tick
    pub frenzy_decay: f32,
    pub frenzy_gain: f32,
    pub frenzy_gain_gold: f32,
    /// Ticks the meter is held at max once frenzy triggers
    pub frenzy_hold_ticks: u32,
    pub frenzy_speed_mult: f32,
    /// Growth per eat as a fraction of the eaten radius
    pub growth_factor: f32,
    pub min_growth: f32,
    pub gold_growth_mult: f32,
    /// Starting score per skipped level on direct level select
    pub level_skip_score: u64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_points: 10.0,
            gold_multiplier: 5.0,
            frenzy_multiplier: 2.0,
            combo_step: 0.1,
            combo_window_ms: 2500.0,
            frenzy_max: 100.0,
            frenzy_decay: 0.1,
            frenzy_gain: 15.0,
            frenzy_gain_gold: 50.0,
            frenzy_hold_ticks: 300,
            frenzy_speed_mult: 1.3,
            growth_factor: 0.05,
            min_growth: 0.2,
            gold_growth_mult: 2.0,
            level_skip_score: 1000,
        }
    }
}

/// Spawner probabilities and world limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub max_enemies: usize,
    pub pickup_prob: f32,
    pub gold_prob: f32,
    /// Level index where jellies enter the hazard pool
    pub jelly_unlock_level: usize,
    pub jelly_weight: f32,
    /// Level index where mines enter the hazard pool
    pub mine_unlock_level: usize,
    pub mine_weight: f32,
    pub chaser_unlock_level: usize,
    pub chaser_base_chance: f32,
    pub chaser_chance_per_level: f32,
    pub chaser_speed_mult: f32,
    pub chaser_detection_radius: f32,
    pub chaser_steer: f32,
    pub chaser_max_speed_mult: f32,
    pub gold_radius: f32,
    pub gold_speed_mult: f32,
    pub electric_radius_mult: f32,
    pub electric_speed_mult: f32,
    /// Distance past the world edge before an entity is culled
    pub cull_margin: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            max_enemies: 30,
            pickup_prob: 0.02,
            gold_prob: 0.05,
            jelly_unlock_level: 4,
            jelly_weight: 0.4,
            mine_unlock_level: 8,
            mine_weight: 0.3,
            chaser_unlock_level: 8,
            chaser_base_chance: 0.1,
            chaser_chance_per_level: 0.01,
            chaser_speed_mult: 1.3,
            chaser_detection_radius: 400.0,
            chaser_steer: 0.05,
            chaser_max_speed_mult: 1.5,
            gold_radius: 15.0,
            gold_speed_mult: 1.5,
            electric_radius_mult: 0.9,
            electric_speed_mult: 1.2,
            cull_margin: 200.0,
        }
    }
}

/// Contact outcomes for hazards and lethal fish
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Interactions resolve below `(r1 + r2) * overlap_factor`
    pub overlap_factor: f32,
    /// Radius multiplier on an unshielded mine hit
    pub mine_shrink: f32,
    pub mine_stun_ticks: u32,
    pub mine_shielded_stun_ticks: u32,
    pub mine_knockback: f32,
    pub mine_particles: u32,
    /// Explosion particle velocity range per axis
    pub mine_particle_spread: f32,
    pub mine_particle_life: f32,
    pub mine_particle_size: f32,
    pub jelly_stun_ticks: u32,
    pub jelly_knockback: f32,
    pub electric_stun_ticks: u32,
    pub shield_break_stun_ticks: u32,
    pub shield_break_knockback: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            overlap_factor: 0.8,
            mine_shrink: 0.7,
            mine_stun_ticks: 60,
            mine_shielded_stun_ticks: 30,
            mine_knockback: 15.0,
            mine_particles: 15,
            mine_particle_spread: 10.0,
            mine_particle_life: 1.5,
            mine_particle_size: 5.0,
            jelly_stun_ticks: 30,
            jelly_knockback: 10.0,
            electric_stun_ticks: 90,
            shield_break_stun_ticks: 45,
            shield_break_knockback: 20.0,
        }
    }
}

/// Power-up effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub radius: f32,
    pub speed_boost_ticks: u32,
    pub speed_boost_mult: f32,
    pub freeze_ticks: u32,
    pub growth_amount: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            speed_boost_ticks: 300,
            speed_boost_mult: 1.8,
            freeze_ticks: 240,
            growth_amount: 5.0,
        }
    }
}

/// Cosmetic effects (never gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FxTuning {
    /// Cap on live particles; new ones are dropped past it
    pub max_particles: usize,
    pub particle_decay: f32,
    pub bubble_chance: f32,
    pub text_rise: f32,
    /// Crumbs left behind by an eaten fish
    pub eat_particles: u32,
    pub eat_particle_spread: f32,
    pub eat_particle_size: f32,
}

impl Default for FxTuning {
    fn default() -> Self {
        Self {
            max_particles: 1024,
            particle_decay: 0.05,
            bubble_chance: 0.05,
            text_rise: 1.0,
            eat_particles: 5,
            eat_particle_spread: 5.0,
            eat_particle_size: 4.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub scoring: ScoringTuning,
    pub spawn: SpawnTuning,
    pub hazards: HazardTuning,
    pub pickups: PickupTuning,
    pub fx: FxTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        if !(self.player.min_radius > 0.0) {
            log::warn!("min_radius {} must be positive, using 1.0", self.player.min_radius);
            self.player.min_radius = 1.0;
        }
        if self.player.start_radius < self.player.min_radius {
            log::warn!(
                "start_radius {} below min_radius, raising to {}",
                self.player.start_radius,
                self.player.min_radius
            );
            self.player.start_radius = self.player.min_radius;
        }
        if !(self.hazards.overlap_factor > 0.0 && self.hazards.overlap_factor <= 1.0) {
            log::warn!(
                "overlap_factor {} outside (0, 1], using 0.8",
                self.hazards.overlap_factor
            );
            self.hazards.overlap_factor = 0.8;
        }
        for prob in [
            &mut self.spawn.pickup_prob,
            &mut self.spawn.gold_prob,
            &mut self.player.suction_particle_chance,
            &mut self.player.suction_sound_chance,
            &mut self.fx.bubble_chance,
        ] {
            *prob = prob.clamp(0.0, 1.0);
        }
        self.hazards.mine_shrink = self.hazards.mine_shrink.clamp(0.0, 1.0);
        if !(self.spawn.gold_radius > 0.0) {
            log::warn!("gold_radius {} must be positive, using 15.0", self.spawn.gold_radius);
            self.spawn.gold_radius = 15.0;
        }
        if !(self.spawn.electric_radius_mult > 0.0) {
            log::warn!(
                "electric_radius_mult {} must be positive, using 0.9",
                self.spawn.electric_radius_mult
            );
            self.spawn.electric_radius_mult = 0.9;
        }
        if !(self.pickups.radius > 0.0) {
            log::warn!("pickup radius {} must be positive, using 20.0", self.pickups.radius);
            self.pickups.radius = 20.0;
        }
        if !(self.pickups.growth_amount >= 0.0) {
            log::warn!(
                "growth_amount {} would shrink the player, using 0",
                self.pickups.growth_amount
            );
            self.pickups.growth_amount = 0.0;
        }
        if self.scoring.frenzy_max <= 0.0 {
            self.scoring.frenzy_max = 100.0;
        }
        self
    }
}
