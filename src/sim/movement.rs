//! Player steering, entity motion and off-world culling
//!
//! Velocities are in px/tick. The player eases toward a target velocity
//! instead of snapping to it; dash and knockback bypass the easing and bleed
//! off through damping.

use glam::Vec2;
use rand::Rng;

use super::effects::Effects;
use super::entity::Entity;
use super::input::{ControlMode, TickInput};
use super::session::Session;
use crate::audio::Sound;
use crate::consts::colors;
use crate::direction_to;
use crate::tuning::Tuning;

/// Player speed for this tick before the suction penalty
pub fn effective_speed(player: &Entity, session: &Session, tuning: &Tuning) -> f32 {
    let mut speed = player.speed;
    if session.frenzy_active {
        speed *= tuning.scoring.frenzy_speed_mult;
    }
    if player.is_speed_boosted() {
        speed *= tuning.pickups.speed_boost_mult;
    }
    speed
}

/// Whether suction may pull `entity` toward a player of `player_radius`
///
/// Mines and jellies never move; pickups always do; fish only while
/// comfortably smaller than the player.
pub fn is_suction_target(entity: &Entity, player_radius: f32, size_ratio: f32) -> bool {
    entity.kind.is_pullable()
        && (entity.kind.is_pickup() || entity.radius < player_radius * size_ratio)
}

/// Drag eligible entities a fraction of the way toward the player
pub fn apply_suction<R: Rng>(
    player: &Entity,
    enemies: &mut [Entity],
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) {
    let pt = &tuning.player;
    if rng.random::<f32>() < pt.suction_sound_chance {
        fx.sound(Sound::Suction);
    }
    for e in enemies.iter_mut() {
        if !is_suction_target(e, player.radius, pt.suction_size_ratio) {
            continue;
        }
        let delta = player.pos - e.pos;
        if delta.length() >= pt.suction_range {
            continue;
        }
        if rng.random::<f32>() < pt.suction_particle_chance {
            fx.stream(e.pos, delta * 0.05);
        }
        e.pos += delta * pt.suction_pull;
    }
}

/// Start a dash along the current heading (rightward when near-stationary)
pub fn dash<R: Rng>(
    player: &mut Entity,
    session: &mut Session,
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) {
    let pt = &tuning.player;
    session.dash_cooldown = pt.dash_cooldown_ticks;

    let heading = if player.vel.x.abs() < 0.1 && player.vel.y.abs() < 0.1 {
        Vec2::X
    } else {
        player.vel.normalize_or_zero()
    };
    player.vel = heading * pt.dash_speed;
    fx.sound(Sound::Dash);

    for _ in 0..pt.dash_particles {
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 2.0;
        fx.particle(player.pos, -player.vel * 0.5 + jitter, 1.0, colors::WHITE, 3.0);
    }
}

/// Steer, dash and integrate the player for one tick
///
/// Status timers must already have been counted down. Returns whether the
/// player is stunned this tick.
#[allow(clippy::too_many_arguments)]
pub fn update_player<R: Rng>(
    player: &mut Entity,
    enemies: &mut [Entity],
    session: &mut Session,
    input: &TickInput,
    bounds: Vec2,
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) -> bool {
    let pt = &tuning.player;
    let stunned = player.is_stunned();
    let mut speed = effective_speed(player, session, tuning);

    if input.suction && !stunned {
        speed *= pt.suction_speed_mult;
        apply_suction(player, enemies, tuning, rng, fx);
    }

    if stunned {
        player.vel *= pt.stun_damping;
    } else {
        match input.mode {
            ControlMode::Directional => {
                let heading = input.directions.heading();
                if heading != Vec2::ZERO {
                    player.vel += (heading * speed - player.vel) * pt.steering_ease;
                } else {
                    player.vel *= pt.idle_damping;
                }
            }
            ControlMode::Pointer => {
                let to_pointer = input.pointer - player.pos;
                if to_pointer.length() > pt.pointer_dead_zone {
                    let target = direction_to(player.pos, input.pointer) * speed;
                    player.vel += (target - player.vel) * pt.steering_ease;
                } else {
                    player.vel *= pt.pointer_idle_damping;
                }
            }
        }

        // Post-glide braking sheds dash momentum
        if session.dash_cooldown < pt.dash_glide_cooldown && player.vel.length() > speed * 1.5 {
            player.vel *= pt.dash_brake;
        }

        if input.dash && session.dash_ready() {
            dash(player, session, tuning, rng, fx);
        }
    }

    integrate_player(player, bounds);
    stunned
}

/// Move the player and keep its whole body inside the world
pub fn integrate_player(player: &mut Entity, bounds: Vec2) {
    player.pos += player.vel;
    let r = player.radius;
    player.pos.x = player.pos.x.min(bounds.x - r).max(r);
    player.pos.y = player.pos.y.min(bounds.y - r).max(r);
}

/// Chaser pursuit: ease toward the player, capped at a multiple of base speed
fn steer_chaser(e: &mut Entity, player: &Entity, tuning: &Tuning) {
    let spawn = &tuning.spawn;
    let hunting = e.radius > player.radius
        && !player.has_shield
        && e.pos.distance(player.pos) < spawn.chaser_detection_radius;
    if !hunting {
        return;
    }
    let max_speed = e.speed * spawn.chaser_max_speed_mult;
    let desired = direction_to(e.pos, player.pos) * max_speed;
    e.vel += (desired - e.vel) * spawn.chaser_steer;
    e.vel = e.vel.clamp_length_max(max_speed);
}

/// Advance every non-player entity; freeze holds everything except pickups
pub fn move_entities(enemies: &mut [Entity], player: &Entity, frozen: bool, tuning: &Tuning) {
    for e in enemies.iter_mut() {
        if frozen && !e.kind.is_pickup() {
            continue;
        }
        if e.kind.moves_vertically_only() {
            e.pos.y += e.vel.y;
            continue;
        }
        if e.is_chaser {
            steer_chaser(e, player, tuning);
        }
        e.pos += e.vel;
    }
}

/// Whether `e` is past the margin on some side and not heading back in
pub fn is_off_world(e: &Entity, bounds: Vec2, margin: f32) -> bool {
    let escaping = |pos: f32, vel: f32, extent: f32| {
        (pos < -margin && vel <= 0.0) || (pos > extent + margin && vel >= 0.0)
    };
    escaping(e.pos.x, e.vel.x, bounds.x) || escaping(e.pos.y, e.vel.y, bounds.y)
}

/// Remove entities that have left the world; returns how many went
pub fn cull_off_world(enemies: &mut Vec<Entity>, bounds: Vec2, margin: f32) -> usize {
    let before = enemies.len();
    enemies.retain(|e| !is_off_world(e, bounds, margin));
    before - enemies.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityKind, PickupKind};
    use crate::sim::input::HeldDirections;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(1000.0, 800.0);

    fn setup() -> (Entity, Session, Tuning, Pcg32, Effects) {
        (
            Entity::player(Vec2::new(500.0, 400.0), 15.0, 5.0),
            Session::default(),
            Tuning::default(),
            Pcg32::seed_from_u64(11),
            Effects::new(256),
        )
    }

    fn directional(right: bool) -> TickInput {
        TickInput {
            mode: ControlMode::Directional,
            directions: HeldDirections {
                right,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_velocity_eases_toward_target() {
        let (mut player, mut session, tuning, mut rng, mut fx) = setup();
        let input = directional(true);
        update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        // One tenth of the way to 5 px/tick
        assert!((player.vel.x - 0.5).abs() < 1e-5);
        for _ in 0..100 {
            update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        }
        assert!((player.vel.x - 5.0).abs() < 0.01);
        assert!(player.vel.x <= 5.0);
    }

    #[test]
    fn test_effective_speed_multipliers() {
        let (mut player, mut session, tuning, _, _) = setup();
        assert_eq!(effective_speed(&player, &session, &tuning), 5.0);
        session.frenzy_active = true;
        player.speed_boost_ticks = 10;
        let expected = 5.0 * 1.3 * 1.8;
        assert!((effective_speed(&player, &session, &tuning) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_stunned_player_ignores_input_and_drifts() {
        let (mut player, mut session, tuning, mut rng, mut fx) = setup();
        player.stun_ticks = 10;
        player.vel = Vec2::new(4.0, 0.0);
        let mut input = directional(false);
        input.directions.left = true;
        input.dash = true;
        let stunned =
            update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        assert!(stunned);
        assert!((player.vel.x - 3.8).abs() < 1e-5);
        assert_eq!(session.dash_cooldown, 0);
        assert!(fx.events.is_empty());
    }

    #[test]
    fn test_dash_from_rest_goes_right() {
        let (mut player, mut session, tuning, mut rng, mut fx) = setup();
        let input = TickInput {
            mode: ControlMode::Directional,
            dash: true,
            ..Default::default()
        };
        update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        assert_eq!(player.vel, Vec2::new(15.0, 0.0));
        assert_eq!(session.dash_cooldown, 60);
        assert_eq!(fx.particles.len(), 8);
        assert!(fx.events.contains(&crate::sim::GameEvent::Sound(Sound::Dash)));

        // Cooldown blocks a second dash
        let vel_before = player.vel;
        update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        assert!(player.vel.length() < vel_before.length() + 1e-3);
        assert_eq!(session.dash_cooldown, 60);
    }

    #[test]
    fn test_player_clamped_to_world() {
        let mut player = Entity::player(Vec2::new(990.0, 5.0), 20.0, 5.0);
        player.vel = Vec2::new(50.0, -50.0);
        integrate_player(&mut player, BOUNDS);
        assert_eq!(player.pos, Vec2::new(980.0, 20.0));
    }

    #[test]
    fn test_pointer_mode_heads_for_pointer() {
        let (mut player, mut session, tuning, mut rng, mut fx) = setup();
        let input = TickInput {
            pointer: Vec2::new(500.0, 100.0),
            ..Default::default()
        };
        update_player(&mut player, &mut [], &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        assert!(player.vel.y < 0.0);
        assert!(player.vel.x.abs() < 1e-5);
    }

    #[test]
    fn test_suction_rule() {
        let player = Entity::player(Vec2::ZERO, 50.0, 5.0);
        let small = Entity::new(1, EntityKind::Normal, Vec2::X, 20.0, 1.0);
        let big = Entity::new(2, EntityKind::Normal, Vec2::X, 46.0, 1.0);
        let mine = Entity::new(3, EntityKind::Mine, Vec2::X, 25.0, 1.0);
        let jelly = Entity::new(4, EntityKind::Jelly, Vec2::X, 20.0, 1.0);
        let electric = Entity::new(5, EntityKind::Electric, Vec2::X, 20.0, 1.0);
        let pickup = Entity::new(6, EntityKind::Pickup(PickupKind::Shield), Vec2::X, 20.0, 1.0);
        assert!(is_suction_target(&small, player.radius, 0.9));
        assert!(!is_suction_target(&big, player.radius, 0.9));
        assert!(!is_suction_target(&mine, player.radius, 0.9));
        assert!(!is_suction_target(&jelly, player.radius, 0.9));
        assert!(is_suction_target(&electric, player.radius, 0.9));
        // Pickups are pulled even by a tiny player
        assert!(is_suction_target(&pickup, 10.0, 0.9));
    }

    #[test]
    fn test_suction_pulls_and_slows() {
        let (mut player, mut session, tuning, mut rng, mut fx) = setup();
        player.radius = 40.0;
        let mut enemies = vec![Entity::new(1, EntityKind::Normal, Vec2::new(600.0, 400.0), 10.0, 0.0)];
        let input = TickInput {
            suction: true,
            mode: ControlMode::Directional,
            directions: HeldDirections {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        update_player(&mut player, &mut enemies, &mut session, &input, BOUNDS, &tuning, &mut rng, &mut fx);
        // 2% of the 100px gap
        assert!((enemies[0].pos.x - 598.0).abs() < 1e-3);
        // Half speed target: 0.1 * 2.5
        assert!((player.vel.x - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_freeze_holds_all_but_pickups() {
        let tuning = Tuning::default();
        let player = Entity::player(Vec2::new(500.0, 400.0), 15.0, 5.0);
        let mut fish = Entity::new(1, EntityKind::Normal, Vec2::new(100.0, 100.0), 10.0, 2.0);
        fish.vel = Vec2::new(2.0, 0.0);
        let mut pickup = Entity::new(2, EntityKind::Pickup(PickupKind::Speed), Vec2::new(300.0, 0.0), 20.0, 1.0);
        pickup.vel = Vec2::new(0.0, 0.75);
        let mut enemies = vec![fish, pickup];
        move_entities(&mut enemies, &player, true, &tuning);
        assert_eq!(enemies[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(enemies[1].pos, Vec2::new(300.0, 0.75));
        move_entities(&mut enemies, &player, false, &tuning);
        assert_eq!(enemies[0].pos, Vec2::new(102.0, 100.0));
    }

    #[test]
    fn test_jelly_ignores_horizontal_velocity() {
        let tuning = Tuning::default();
        let player = Entity::player(Vec2::ZERO, 15.0, 5.0);
        let mut jelly = Entity::new(1, EntityKind::Jelly, Vec2::new(50.0, 50.0), 20.0, 1.0);
        jelly.vel = Vec2::new(3.0, 1.0);
        let mut enemies = vec![jelly];
        move_entities(&mut enemies, &player, false, &tuning);
        assert_eq!(enemies[0].pos, Vec2::new(50.0, 51.0));
    }

    #[test]
    fn test_chaser_pursues_only_when_bigger_and_unshielded() {
        let tuning = Tuning::default();
        let mut player = Entity::player(Vec2::new(300.0, 100.0), 15.0, 5.0);
        let mut chaser = Entity::new(1, EntityKind::Normal, Vec2::new(100.0, 100.0), 30.0, 2.0);
        chaser.is_chaser = true;
        chaser.vel = Vec2::new(0.0, 2.0);

        let mut enemies = vec![chaser.clone()];
        move_entities(&mut enemies, &player, false, &tuning);
        assert!(enemies[0].vel.x > 0.0);
        assert!(enemies[0].vel.length() <= 2.0 * 1.5 + 1e-5);

        player.has_shield = true;
        let mut enemies = vec![chaser];
        move_entities(&mut enemies, &player, false, &tuning);
        assert_eq!(enemies[0].vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_cull_only_escaping_entities() {
        let margin = 200.0;
        let mut incoming = Entity::new(1, EntityKind::Normal, Vec2::new(-260.0, 300.0), 130.0, 2.0);
        incoming.vel = Vec2::new(2.0, 0.0);
        let mut leaving = Entity::new(2, EntityKind::Normal, Vec2::new(1201.0, 300.0), 10.0, 2.0);
        leaving.vel = Vec2::new(2.0, 0.0);
        let mut sinking = Entity::new(3, EntityKind::Pickup(PickupKind::Growth), Vec2::new(500.0, 1001.0), 20.0, 1.0);
        sinking.vel = Vec2::new(0.0, 0.5);
        let mut enemies = vec![incoming, leaving, sinking];
        assert_eq!(cull_off_world(&mut enemies, BOUNDS, margin), 2);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 1);
    }
}
