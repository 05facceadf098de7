//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame: timers, player and entity
//! motion, spawning, contact resolution, effects, then the level goal check.

use super::collision::resolve_collisions;
use super::input::TickInput;
use super::level::LAST_LEVEL;
use super::movement::{cull_off_world, move_entities, update_player};
use super::session::GamePhase;
use super::spawner::{should_spawn, spawn_entity};
use super::state::GameState;
use crate::audio::Sound;

/// Advance the game state by one fixed timestep
///
/// Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.session.phase.is_running() {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Timers
    state.player.tick_status();
    state
        .session
        .tick_timers(now, &state.tuning, &mut state.effects);

    // Input and motion
    update_player(
        &mut state.player,
        &mut state.enemies,
        &mut state.session,
        input,
        state.bounds,
        &state.tuning,
        &mut state.rng,
        &mut state.effects,
    );
    let frozen = state.session.is_frozen();
    move_entities(&mut state.enemies, &state.player, frozen, &state.tuning);
    cull_off_world(&mut state.enemies, state.bounds, state.tuning.spawn.cull_margin);

    // Spawning
    if should_spawn(
        &mut state.rng,
        state.session.level,
        state.enemies.len(),
        frozen,
        &state.tuning.spawn,
    ) {
        let id = state.next_entity_id();
        let entity = spawn_entity(
            &mut state.rng,
            id,
            state.session.level,
            state.bounds,
            &state.tuning,
        );
        state.enemies.push(entity);
    }

    // Contacts
    let report = resolve_collisions(
        &mut state.player,
        &mut state.enemies,
        &mut state.session,
        now,
        &state.tuning,
        &mut state.rng,
        &mut state.effects,
    );

    state
        .effects
        .update(&mut state.rng, state.bounds, &state.tuning.fx);

    // Progression
    if report.died {
        log::info!(
            "Eaten on level {} at tick {} with score {}",
            state.session.level + 1,
            now,
            state.session.score
        );
        state
            .session
            .set_phase(GamePhase::GameOver, &mut state.effects);
        return;
    }

    if state.player.radius >= state.level_config().goal_radius {
        state.effects.sound(Sound::LevelUp);
        let next = if state.session.level >= LAST_LEVEL {
            state.effects.sound(Sound::Win);
            GamePhase::Victory
        } else {
            GamePhase::LevelComplete
        };
        log::info!(
            "Level {} cleared in {} ticks, score {}",
            state.session.level + 1,
            now,
            state.session.score
        );
        state.session.set_phase(next, &mut state.effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::GameEvent;
    use crate::sim::entity::{Entity, EntityKind};
    use crate::sim::input::ControlMode;
    use crate::sim::level::LevelConfig;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Playing world with spawning off so tests control every entity
    fn quiet_world(level: usize) -> GameState {
        let mut tuning = Tuning::default();
        tuning.spawn.max_enemies = 0;
        let mut state = GameState::new(7, 1000.0, 800.0, tuning);
        state.finish_loading();
        state.start(level);
        state.drain_events();
        state
    }

    /// Directional input with no keys held: the player idles in place
    fn idle() -> TickInput {
        TickInput {
            mode: ControlMode::Directional,
            ..Default::default()
        }
    }

    fn place(state: &mut GameState, kind: EntityKind, radius: f32) {
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(2.0, 0.0);
        state.enemies.push(Entity::new(id, kind, pos, radius, 0.0));
    }

    #[test]
    fn test_tick_only_runs_while_playing() {
        let mut state = quiet_world(0);
        state.pause();
        tick(&mut state, &idle());
        assert_eq!(state.time_ticks, 0);
        state.resume();
        tick(&mut state, &idle());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_stunned_player_survives_bigger_fish() {
        let mut state = quiet_world(0);
        state.player.stun_ticks = 10;
        place(&mut state, EntityKind::Normal, 60.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_unshielded_player_is_eaten() {
        let mut state = quiet_world(0);
        place(&mut state, EntityKind::Normal, 60.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(Sound::Die)));
        // Frozen in place afterwards
        tick(&mut state, &idle());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_shield_saves_once() {
        let mut state = quiet_world(0);
        state.player.has_shield = true;
        place(&mut state, EntityKind::Normal, 60.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(!state.player.has_shield);

        // Wait out the stun, then meet the fish again
        state.player.stun_ticks = 0;
        state.player.vel = Vec2::ZERO;
        state.player.pos = state.enemies[0].pos;
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_reaching_goal_completes_level() {
        let mut state = quiet_world(0);
        let goal = state.level_config().goal_radius;
        state.player.radius = goal - 0.1;
        place(&mut state, EntityKind::Normal, 10.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::LevelComplete);
        assert!(state.growth_progress() >= 1.0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(Sound::LevelUp)));
        assert!(!events.contains(&GameEvent::Sound(Sound::Win)));
    }

    #[test]
    fn test_final_level_goal_is_victory() {
        let mut state = quiet_world(LAST_LEVEL);
        state.player.radius = LevelConfig::get(LAST_LEVEL).goal_radius - 0.1;
        place(&mut state, EntityKind::Normal, 10.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::Victory);
        assert!(state.drain_events().contains(&GameEvent::Sound(Sound::Win)));
    }

    #[test]
    fn test_freeze_suppresses_spawning() {
        let mut state = GameState::new(3, 1000.0, 800.0, Tuning::default());
        state.finish_loading();
        state.start(LAST_LEVEL);
        state.session.freeze_ticks = 200;
        for _ in 0..150 {
            tick(&mut state, &idle());
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_frenzy_through_play() {
        let mut state = quiet_world(0);
        state.player.radius = 30.0;
        state.session.frenzy_meter = 90.0;
        place(&mut state, EntityKind::Normal, 10.0);
        tick(&mut state, &idle());
        assert_eq!(state.session.frenzy_meter, 100.0);
        // Activation is reported on the next timer pass
        tick(&mut state, &idle());
        assert!(state.session.frenzy_active);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(Sound::Frenzy)));
        assert!(events.contains(&GameEvent::FrenzyStarted));
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(99999, 1280.0, 720.0, Tuning::default());
            state.finish_loading();
            state.start(9);
            let input = TickInput {
                pointer: Vec2::new(900.0, 200.0),
                suction: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut state, &input);
            }
            state
        };
        let a = run();
        let b = run();
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.player, b.player);
        assert_eq!(a.session, b.session);
    }

    proptest! {
        #[test]
        fn prop_enemy_count_capped(seed in any::<u64>(), level in 0usize..20) {
            let mut state = GameState::new(seed, 1280.0, 720.0, Tuning::default());
            state.finish_loading();
            state.start(level);
            for _ in 0..300 {
                tick(&mut state, &idle());
                prop_assert!(state.enemies.len() <= state.tuning.spawn.max_enemies);
                prop_assert!(state.player.radius >= state.tuning.player.min_radius);
            }
        }

        #[test]
        fn prop_escaping_entities_culled_in_one_tick(
            x_far in 1210.0f32..5000.0,
            y in 0.0f32..800.0,
            speed in 0.1f32..6.0,
        ) {
            let mut state = quiet_world(0);
            let id = state.next_entity_id();
            let mut fish = Entity::new(id, EntityKind::Normal, Vec2::new(x_far, y), 10.0, speed);
            fish.vel = Vec2::new(speed, 0.0);
            state.enemies.push(fish);
            tick(&mut state, &idle());
            prop_assert!(state.enemies.iter().all(|e| e.id != id));
            tick(&mut state, &idle());
            prop_assert!(state.enemies.iter().all(|e| e.id != id));
        }
    }
}
