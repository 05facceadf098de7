//! World state and the phase control surface
//!
//! `GameState` owns everything the tick loop mutates. Phase changes requested
//! from outside (menus, pause key) go through the methods here; phase changes
//! caused by gameplay happen in `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::{Effects, GameEvent};
use super::entity::Entity;
use super::level::{self, LAST_LEVEL, LevelConfig};
use super::session::{GamePhase, Session};
use crate::consts::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Complete simulation world
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// World size in px
    pub bounds: Vec2,
    pub player: Entity,
    /// Every non-player entity, in spawn order
    pub enemies: Vec<Entity>,
    /// Visual effects and the pending event queue (not gameplay-affecting)
    pub effects: Effects,
    pub session: Session,
    pub tuning: Tuning,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a world in the `Loading` phase
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let bounds = sanitize_bounds(width, height);
        let player = Entity::player(
            bounds * 0.5,
            tuning.player.start_radius,
            tuning.player.base_speed,
        );
        Self {
            seed,
            bounds,
            player,
            enemies: Vec::new(),
            effects: Effects::new(tuning.fx.max_particles),
            session: Session::default(),
            tuning,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (0 is the player)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn level_config(&self) -> &'static LevelConfig {
        LevelConfig::get(self.session.level)
    }

    /// Normalized progress toward the current goal radius
    pub fn growth_progress(&self) -> f32 {
        self.session.growth_progress(self.player.radius, &self.tuning)
    }

    /// Feed player preferences into the running simulation
    ///
    /// The balance table keeps its own cap; only the live limit changes.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.effects
            .set_max_particles(settings.max_particles(self.tuning.fx.max_particles));
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.effects.drain_events()
    }

    fn transition(&mut self, to: GamePhase) {
        self.session.set_phase(to, &mut self.effects);
    }

    /// Asset collaborator finished: `Loading` -> `Menu`
    pub fn finish_loading(&mut self) -> bool {
        if self.phase() != GamePhase::Loading {
            log::warn!("finish_loading ignored in {:?}", self.phase());
            return false;
        }
        self.transition(GamePhase::Menu);
        true
    }

    pub fn open_settings(&mut self) -> bool {
        if self.phase() != GamePhase::Menu {
            log::warn!("open_settings ignored in {:?}", self.phase());
            return false;
        }
        self.transition(GamePhase::Settings);
        true
    }

    pub fn close_settings(&mut self) -> bool {
        if self.phase() != GamePhase::Settings {
            return false;
        }
        self.transition(GamePhase::Menu);
        true
    }

    /// Reset the world and start playing `level`
    ///
    /// Out-of-range levels clamp to the last one. Level 0 starts fresh; any
    /// other level is treated as a direct selection and seeds the score.
    pub fn start(&mut self, level: usize) -> bool {
        if self.phase() == GamePhase::Loading {
            log::warn!("start({}) ignored while loading", level);
            return false;
        }
        if level > LAST_LEVEL {
            log::warn!("Level {} out of range, starting level {}", level, LAST_LEVEL);
        }
        self.session.reset_for_level(level, &self.tuning);
        self.enter_level();
        true
    }

    /// Move on from a cleared level, or declare victory after the last
    ///
    /// The score carries over as earned. Unlike `start`, this never reseeds
    /// it to `level * 1000`, so a run that clears every level reports what
    /// the player actually scored.
    pub fn advance_next_level(&mut self) -> bool {
        if self.phase() != GamePhase::LevelComplete {
            log::warn!("advance_next_level ignored in {:?}", self.phase());
            return false;
        }
        if self.session.level >= LAST_LEVEL {
            self.transition(GamePhase::Victory);
            return true;
        }
        self.session.begin_level(self.session.level + 1);
        self.enter_level();
        true
    }

    /// Try the current level again after a game over
    pub fn retry(&mut self) -> bool {
        if self.phase() != GamePhase::GameOver {
            return false;
        }
        self.start(self.session.level)
    }

    pub fn pause(&mut self) -> bool {
        if self.phase() != GamePhase::Playing {
            return false;
        }
        self.transition(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase() != GamePhase::Paused {
            return false;
        }
        self.transition(GamePhase::Playing);
        true
    }

    /// Abandon whatever is in progress and go back to the menu
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase() == GamePhase::Loading {
            return false;
        }
        self.enemies.clear();
        self.effects.clear();
        self.transition(GamePhase::Menu);
        true
    }

    /// Put the player at the center with a clean slate for the session's level
    fn enter_level(&mut self) {
        let index = self.session.level;
        let pt = &self.tuning.player;
        self.player = Entity::player(
            self.bounds * 0.5,
            level::start_radius(index, pt.start_radius),
            pt.base_speed,
        );
        self.enemies.clear();
        self.effects.clear();
        self.time_ticks = 0;
        log::info!(
            "Starting level {} ({}), goal radius {}",
            index + 1,
            self.level_config().name,
            self.level_config().goal_radius
        );
        self.transition(GamePhase::Playing);
    }
}

fn sanitize_bounds(width: f32, height: f32) -> Vec2 {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Vec2::new(width, height)
    } else {
        log::warn!(
            "Invalid world size {}x{}, using {}x{}",
            width,
            height,
            DEFAULT_WORLD_WIDTH,
            DEFAULT_WORLD_HEIGHT
        );
        Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}
