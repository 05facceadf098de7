//! Stochastic enemy, hazard and pickup generator
//!
//! One roll per tick against the level's spawn rate, then one roll partitioned
//! into pickup / gold / hazard / normal buckets. Sub-selection and physical
//! parameters come from further rolls.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityKind, PickupKind, TierProfile};
use super::level::{self, LevelConfig};
use crate::consts::colors;
use crate::tuning::{SpawnTuning, Tuning};

/// Top-level bucket for a spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Pickup,
    Gold,
    Hazard,
    Normal,
}

/// Cumulative tier thresholds per zone; tier = first index whose bound exceeds the roll
const TIER_DISTRIBUTIONS: [[f32; 5]; 5] = [
    // Reef
    [0.7, 0.9, 1.0, 1.0, 1.0],
    // Twilight
    [0.5, 0.8, 0.95, 1.0, 1.0],
    // Abyss
    [0.3, 0.6, 0.85, 1.0, 1.0],
    // Shipwreck
    [0.0, 0.2, 0.5, 0.8, 1.0],
    // Trench
    [0.0, 0.1, 0.3, 0.6, 1.0],
];

/// Partition a roll in [0, 1) into a spawn bucket
pub fn category_for_roll(roll: f32, hazard_prob: f32, spawn: &SpawnTuning) -> SpawnCategory {
    let pickup_end = spawn.pickup_prob;
    let gold_end = pickup_end + spawn.gold_prob;
    let hazard_end = gold_end + hazard_prob;
    if roll < pickup_end {
        SpawnCategory::Pickup
    } else if roll < gold_end {
        SpawnCategory::Gold
    } else if roll < hazard_end {
        SpawnCategory::Hazard
    } else {
        SpawnCategory::Normal
    }
}

/// Uniform pick among the four pickups
pub fn pickup_for_roll(roll: f32) -> PickupKind {
    let idx = ((roll * PickupKind::ALL.len() as f32) as usize).min(PickupKind::ALL.len() - 1);
    PickupKind::ALL[idx]
}

/// Hazard sub-type; locked types have zero weight and fall through to electric
pub fn hazard_for_roll(level_index: usize, roll: f32, spawn: &SpawnTuning) -> EntityKind {
    let jelly = if level_index >= spawn.jelly_unlock_level {
        spawn.jelly_weight
    } else {
        0.0
    };
    let mine = if level_index >= spawn.mine_unlock_level {
        spawn.mine_weight
    } else {
        0.0
    };
    if roll < jelly {
        EntityKind::Jelly
    } else if roll < jelly + mine {
        EntityKind::Mine
    } else {
        EntityKind::Electric
    }
}

/// Tier drawn from the level's zone distribution
pub fn tier_for_roll(level_index: usize, roll: f32) -> u8 {
    let zone = level::zone_of(level_index).min(TIER_DISTRIBUTIONS.len() - 1);
    TIER_DISTRIBUTIONS[zone]
        .iter()
        .position(|&bound| roll < bound)
        .unwrap_or(TIER_DISTRIBUTIONS[zone].len() - 1) as u8
}

/// Chance a normal fish spawns as a chaser on `level_index`
pub fn chaser_chance(level_index: usize, spawn: &SpawnTuning) -> f32 {
    if level_index >= spawn.chaser_unlock_level {
        spawn.chaser_base_chance + level_index as f32 * spawn.chaser_chance_per_level
    } else {
        0.0
    }
}

/// Per-tick gate: spawn rate roll, enemy cap and freeze
pub fn should_spawn<R: Rng>(
    rng: &mut R,
    level_index: usize,
    active: usize,
    frozen: bool,
    spawn: &SpawnTuning,
) -> bool {
    if frozen || active >= spawn.max_enemies {
        return false;
    }
    rng.random::<f32>() < LevelConfig::get(level_index).spawn_rate
}

/// Build one entity for `level_index` inside a world of size `bounds`
pub fn spawn_entity<R: Rng>(
    rng: &mut R,
    id: u32,
    level_index: usize,
    bounds: Vec2,
    tuning: &Tuning,
) -> Entity {
    let spawn = &tuning.spawn;
    let config = LevelConfig::get(level_index);
    let from_left = rng.random::<f32>() < 0.5;

    let kind = match category_for_roll(rng.random(), config.hazard_prob, spawn) {
        SpawnCategory::Pickup => EntityKind::Pickup(pickup_for_roll(rng.random())),
        SpawnCategory::Gold => EntityKind::Gold,
        SpawnCategory::Hazard => hazard_for_roll(level_index, rng.random(), spawn),
        SpawnCategory::Normal => EntityKind::Normal,
    };

    let entity = match kind {
        EntityKind::Pickup(_) => spawn_pickup(rng, id, kind, bounds, tuning),
        EntityKind::Jelly => spawn_jelly(rng, id, bounds),
        EntityKind::Mine => spawn_mine(rng, id, from_left, bounds),
        EntityKind::Normal | EntityKind::Gold | EntityKind::Electric => {
            let chaser = kind == EntityKind::Normal
                && rng.random::<f32>() < chaser_chance(level_index, spawn);
            spawn_fish(rng, id, kind, chaser, from_left, level_index, bounds, tuning)
        }
    };

    log::debug!(
        "Spawned {:?} (tier {}, r={:.1}, chaser={}) at ({:.0}, {:.0})",
        entity.kind,
        entity.tier,
        entity.radius,
        entity.is_chaser,
        entity.pos.x,
        entity.pos.y
    );
    entity
}

/// Random x at least 50px from either side wall
fn interior_x<R: Rng>(rng: &mut R, width: f32) -> f32 {
    rng.random::<f32>() * (width - 100.0).max(0.0) + 50.0
}

/// Random y keeping the whole body inside the world height
fn edge_y<R: Rng>(rng: &mut R, radius: f32, height: f32) -> f32 {
    rng.random::<f32>() * (height - radius * 2.0).max(0.0) + radius
}

/// Just past the left or right wall
fn edge_x(from_left: bool, radius: f32, width: f32) -> f32 {
    if from_left {
        -radius * 2.0
    } else {
        width + radius * 2.0
    }
}

fn spawn_pickup<R: Rng>(
    rng: &mut R,
    id: u32,
    kind: EntityKind,
    bounds: Vec2,
    tuning: &Tuning,
) -> Entity {
    let pos = Vec2::new(interior_x(rng, bounds.x), -50.0);
    let mut e = Entity::new(id, kind, pos, tuning.pickups.radius, 1.0);
    e.vel = Vec2::new(0.0, 0.5 + rng.random::<f32>() * 0.5);
    e
}

fn spawn_jelly<R: Rng>(rng: &mut R, id: u32, bounds: Vec2) -> Entity {
    let radius = 20.0 + rng.random::<f32>() * 10.0;
    let speed = 1.0;
    let from_top = rng.random::<f32>() < 0.5;
    let x = interior_x(rng, bounds.x);
    let (y, vy) = if from_top {
        (-radius * 2.0, speed)
    } else {
        (bounds.y + radius * 2.0, -speed)
    };
    let mut e = Entity::new(id, EntityKind::Jelly, Vec2::new(x, y), radius, speed);
    e.vel = Vec2::new(0.0, vy);
    e.oscillation_offset = rng.random::<f32>() * std::f32::consts::TAU;
    e
}

fn spawn_mine<R: Rng>(rng: &mut R, id: u32, from_left: bool, bounds: Vec2) -> Entity {
    let radius = 25.0;
    let speed = 0.5;
    let vx = if from_left { speed } else { -speed };
    let vy = (rng.random::<f32>() - 0.5) * 0.5;
    let pos = Vec2::new(edge_x(from_left, radius, bounds.x), edge_y(rng, radius, bounds.y));
    let mut e = Entity::new(id, EntityKind::Mine, pos, radius, speed);
    e.vel = Vec2::new(vx, vy);
    e
}

#[allow(clippy::too_many_arguments)]
fn spawn_fish<R: Rng>(
    rng: &mut R,
    id: u32,
    kind: EntityKind,
    chaser: bool,
    from_left: bool,
    level_index: usize,
    bounds: Vec2,
    tuning: &Tuning,
) -> Entity {
    let spawn = &tuning.spawn;
    let config = LevelConfig::get(level_index);

    let tier = if kind == EntityKind::Gold {
        0
    } else {
        tier_for_roll(level_index, rng.random())
    };
    let profile = TierProfile::get(tier);
    let mut radius = profile.radius(rng.random());
    let mut color = profile.color;
    let mut speed = (2.0 + rng.random::<f32>()) * config.enemy_speed_mult;

    match kind {
        EntityKind::Gold => {
            radius = spawn.gold_radius;
            speed *= spawn.gold_speed_mult;
            color = colors::GOLD;
        }
        EntityKind::Electric => {
            radius *= spawn.electric_radius_mult;
            speed *= spawn.electric_speed_mult;
            color = colors::ELECTRIC;
        }
        _ if chaser => {
            speed *= spawn.chaser_speed_mult;
            color = colors::CHASER;
        }
        _ => {}
    }

    let vx = if from_left { speed } else { -speed };
    let vy = rng.random::<f32>() - 0.5;
    let pos = Vec2::new(edge_x(from_left, radius, bounds.x), edge_y(rng, radius, bounds.y));

    let mut e = Entity::new(id, kind, pos, radius, speed);
    e.vel = Vec2::new(vx, vy);
    e.tier = tier;
    e.color = color;
    e.is_chaser = chaser;
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_category_partition() {
        let s = SpawnTuning::default();
        assert_eq!(category_for_roll(0.0, 0.1, &s), SpawnCategory::Pickup);
        assert_eq!(category_for_roll(0.019, 0.1, &s), SpawnCategory::Pickup);
        assert_eq!(category_for_roll(0.03, 0.1, &s), SpawnCategory::Gold);
        assert_eq!(category_for_roll(0.1, 0.1, &s), SpawnCategory::Hazard);
        assert_eq!(category_for_roll(0.2, 0.1, &s), SpawnCategory::Normal);
        // Level with no hazards skips straight from gold to normal
        assert_eq!(category_for_roll(0.08, 0.0, &s), SpawnCategory::Normal);
    }

    #[test]
    fn test_hazard_unlocks() {
        let s = SpawnTuning::default();
        // Early levels: everything collapses to electric
        assert_eq!(hazard_for_roll(1, 0.0, &s), EntityKind::Electric);
        // Twilight: jellies appear
        assert_eq!(hazard_for_roll(4, 0.1, &s), EntityKind::Jelly);
        assert_eq!(hazard_for_roll(4, 0.5, &s), EntityKind::Electric);
        // Abyss: mines sit between jelly and electric
        assert_eq!(hazard_for_roll(8, 0.5, &s), EntityKind::Mine);
        assert_eq!(hazard_for_roll(8, 0.75, &s), EntityKind::Electric);
    }

    #[test]
    fn test_tier_distribution_shifts_up() {
        // Reef never produces tier 3+
        assert_eq!(tier_for_roll(0, 0.999), 2);
        assert_eq!(tier_for_roll(0, 0.0), 0);
        // Shipwreck never produces tier 0
        assert_eq!(tier_for_roll(12, 0.0), 1);
        assert_eq!(tier_for_roll(19, 0.7), 4);
    }

    #[test]
    fn test_chaser_chance_scales() {
        let s = SpawnTuning::default();
        assert_eq!(chaser_chance(7, &s), 0.0);
        assert!((chaser_chance(10, &s) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_pickup_uniform_buckets() {
        assert_eq!(pickup_for_roll(0.1), PickupKind::Shield);
        assert_eq!(pickup_for_roll(0.3), PickupKind::Speed);
        assert_eq!(pickup_for_roll(0.6), PickupKind::Freeze);
        assert_eq!(pickup_for_roll(0.99), PickupKind::Growth);
    }

    #[test]
    fn test_spawn_gate() {
        let s = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            assert!(!should_spawn(&mut rng, 19, s.max_enemies, false, &s));
            assert!(!should_spawn(&mut rng, 19, 0, true, &s));
        }
    }

    #[test]
    fn test_spawned_entities_are_well_formed() {
        let tuning = Tuning::default();
        let bounds = Vec2::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for level in 0..20 {
            for i in 0..200 {
                let e = spawn_entity(&mut rng, i, level, bounds, &tuning);
                assert!(e.radius > 0.0);
                assert!(e.tier <= 4);
                match e.kind {
                    EntityKind::Pickup(_) => {
                        assert_eq!(e.pos.y, -50.0);
                        assert!(e.vel.y > 0.0 && e.vel.x == 0.0);
                    }
                    EntityKind::Jelly => {
                        assert!(e.vel.x == 0.0 && e.vel.y != 0.0);
                        assert!(level >= 4);
                    }
                    EntityKind::Mine => {
                        assert!(level >= 8);
                        assert_eq!(e.vel.x.abs(), 0.5);
                    }
                    EntityKind::Gold => assert_eq!(e.radius, 15.0),
                    EntityKind::Normal | EntityKind::Electric => {
                        // Swims inward from the side it spawned on
                        assert!(e.pos.x < 0.0 || e.pos.x > bounds.x);
                        assert_eq!(e.pos.x < 0.0, e.vel.x > 0.0);
                    }
                }
                if e.is_chaser {
                    assert!(level >= 8);
                    assert_eq!(e.kind, EntityKind::Normal);
                }
            }
        }
    }

    /// Speed range after the per-kind multiplier, with float slack
    fn in_speed_range(speed: f32, base_mult: f32, kind_mult: f32) -> bool {
        let lo = 2.0 * base_mult * kind_mult;
        let hi = 3.0 * base_mult * kind_mult;
        speed >= lo - 1e-4 && speed < hi + 1e-4
    }

    #[test]
    fn test_fish_kinds_scale_speed_and_radius() {
        let tuning = Tuning::default();
        let s = &tuning.spawn;
        let bounds = Vec2::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(9);
        for level in 0..20 {
            let mult = LevelConfig::get(level).enemy_speed_mult;
            for i in 0..50 {
                let from_left = i % 2 == 0;
                let mut fish = |kind, chaser| {
                    spawn_fish(&mut rng, i, kind, chaser, from_left, level, bounds, &tuning)
                };

                let e = fish(EntityKind::Normal, false);
                assert!(in_speed_range(e.speed, mult, 1.0), "normal {}", e.speed);
                assert_eq!(e.vel.x, if from_left { e.speed } else { -e.speed });
                assert!(e.vel.y.abs() <= 0.5);
                assert!(!e.is_chaser);

                let e = fish(EntityKind::Gold, false);
                assert!(in_speed_range(e.speed, mult, s.gold_speed_mult), "gold {}", e.speed);
                assert_eq!(e.radius, s.gold_radius);
                assert_eq!(e.tier, 0);
                assert_eq!(e.color, colors::GOLD);

                let e = fish(EntityKind::Electric, false);
                let electric = s.electric_speed_mult;
                assert!(in_speed_range(e.speed, mult, electric), "electric {}", e.speed);
                let profile = TierProfile::get(e.tier);
                let lo = profile.min_radius * s.electric_radius_mult;
                let hi = (profile.min_radius + profile.radius_spread) * s.electric_radius_mult;
                assert!(e.radius >= lo - 1e-4 && e.radius < hi + 1e-4, "electric r {}", e.radius);
                assert_eq!(e.color, colors::ELECTRIC);

                let e = fish(EntityKind::Normal, true);
                assert!(in_speed_range(e.speed, mult, s.chaser_speed_mult), "chaser {}", e.speed);
                assert!(e.is_chaser);
                assert_eq!(e.color, colors::CHASER);
            }
        }
    }

    #[test]
    fn test_hazard_drift() {
        let bounds = Vec2::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(3);
        for i in 0..100 {
            let from_left = i % 2 == 0;
            let mine = spawn_mine(&mut rng, i, from_left, bounds);
            assert_eq!(mine.radius, 25.0);
            assert_eq!(mine.vel.x, if from_left { 0.5 } else { -0.5 });
            assert!(mine.vel.y.abs() <= 0.25);

            let jelly = spawn_jelly(&mut rng, i, bounds);
            assert!(jelly.radius >= 20.0 && jelly.radius < 30.0);
            assert_eq!(jelly.vel.x, 0.0);
            assert_eq!(jelly.vel.y.abs(), 1.0);
            // Enters from whichever edge it starts beyond
            assert_eq!(jelly.pos.y < 0.0, jelly.vel.y > 0.0);
        }
    }

    #[test]
    fn test_zero_gold_radius_override_still_spawns_visible_fish() {
        let tuning = Tuning::from_json(r#"{ "spawn": { "gold_radius": 0.0 } }"#).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Vec2::new(800.0, 600.0);
        let e = spawn_fish(&mut rng, 1, EntityKind::Gold, false, true, 0, bounds, &tuning);
        assert!(e.radius > 0.0);
    }
}
