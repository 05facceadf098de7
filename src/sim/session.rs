//! Session and progression state
//!
//! Score, combo, frenzy and the shared timers live in one `Session` owned by
//! the game state and passed explicitly into each tick stage.

use serde::{Deserialize, Serialize};

use super::effects::{Effects, GameEvent};
use super::level::{self, LAST_LEVEL};
use crate::audio::Sound;
use crate::consts::TICK_RATE_HZ;
use crate::tuning::{ScoringTuning, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the asset collaborator
    Loading,
    Menu,
    Settings,
    /// Active gameplay
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    /// Final level cleared
    Victory,
}

impl GamePhase {
    /// Phases the simulation advances in
    pub fn is_running(&self) -> bool {
        *self == GamePhase::Playing
    }

    /// Phases with a level in progress or just finished (world is meaningful)
    pub fn has_world(&self) -> bool {
        matches!(
            self,
            GamePhase::Playing
                | GamePhase::Paused
                | GamePhase::LevelComplete
                | GamePhase::GameOver
                | GamePhase::Victory
        )
    }
}

/// Convert a tick count into game-time milliseconds
pub fn ticks_to_ms(ticks: u64) -> f64 {
    ticks as f64 * 1000.0 / TICK_RATE_HZ as f64
}

/// Score for eating an entity of `radius`
///
/// `floor(floor(radius) * base * 0.1 * (1 + combo * step) * frenzy * gold)`
pub fn points_for_eat(
    radius: f32,
    combo: u32,
    frenzy_active: bool,
    gold: bool,
    scoring: &ScoringTuning,
) -> u64 {
    let combo_mult = 1.0 + combo as f64 * scoring.combo_step;
    let frenzy_mult = if frenzy_active {
        scoring.frenzy_multiplier
    } else {
        1.0
    };
    let gold_mult = if gold { scoring.gold_multiplier } else { 1.0 };
    let points = (radius.floor() as f64) * scoring.base_points * 0.1 * combo_mult * frenzy_mult * gold_mult;
    points.floor().max(0.0) as u64
}

/// Mutable per-session state shared across tick stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    /// Current level index (always a valid `LEVELS` index)
    pub level: usize,
    /// Cumulative score
    pub score: u64,
    /// Score earned in the current level
    pub level_score: u64,
    pub combo: u32,
    /// Tick of the last successful eat
    pub last_eat_tick: Option<u64>,
    /// 0..=frenzy_max
    pub frenzy_meter: f32,
    /// Ticks left before the maxed meter starts decaying
    pub frenzy_hold_ticks: u32,
    /// Last reported frenzy state
    pub frenzy_active: bool,
    /// Ticks left on the freeze pickup
    pub freeze_ticks: u32,
    pub dash_cooldown: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: GamePhase::Loading,
            level: 0,
            score: 0,
            level_score: 0,
            combo: 0,
            last_eat_tick: None,
            frenzy_meter: 0.0,
            frenzy_hold_ticks: 0,
            frenzy_active: false,
            freeze_ticks: 0,
            dash_cooldown: 0,
        }
    }
}

impl Session {
    /// Move to `to`, reporting the change
    pub fn set_phase(&mut self, to: GamePhase, fx: &mut Effects) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        fx.event(GameEvent::PhaseChanged { from, to });
    }

    /// Reset counters for a fresh attempt at `level`
    ///
    /// Level 0 starts from zero; selecting a later level directly seeds the
    /// score with a per-level allowance.
    pub fn reset_for_level(&mut self, level: usize, tuning: &Tuning) {
        self.begin_level(level);
        self.score = self.level as u64 * tuning.scoring.level_skip_score;
    }

    /// Clear per-level counters for `level`, keeping the cumulative score
    pub fn begin_level(&mut self, level: usize) {
        self.level = level.min(LAST_LEVEL);
        self.level_score = 0;
        self.combo = 0;
        self.last_eat_tick = None;
        self.frenzy_meter = 0.0;
        self.frenzy_hold_ticks = 0;
        self.frenzy_active = false;
        self.freeze_ticks = 0;
        self.dash_cooldown = 0;
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_ticks > 0
    }

    pub fn dash_ready(&self) -> bool {
        self.dash_cooldown == 0
    }

    /// Whether the frenzy buff applies (meter at max)
    pub fn frenzy_at_max(&self, scoring: &ScoringTuning) -> bool {
        self.frenzy_meter >= scoring.frenzy_max
    }

    /// Progress toward the current level's goal radius
    pub fn growth_progress(&self, player_radius: f32, tuning: &Tuning) -> f32 {
        level::growth_progress(self.level, player_radius, tuning.player.start_radius)
    }

    /// Count down shared timers, decay frenzy and expire the combo
    pub fn tick_timers(&mut self, now: u64, tuning: &Tuning, fx: &mut Effects) {
        let scoring = &tuning.scoring;

        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.freeze_ticks = self.freeze_ticks.saturating_sub(1);

        if self.frenzy_hold_ticks > 0 {
            self.frenzy_hold_ticks -= 1;
        } else if self.frenzy_meter > 0.0 {
            self.frenzy_meter = (self.frenzy_meter - scoring.frenzy_decay).max(0.0);
        }
        let active = self.frenzy_at_max(scoring);
        if active != self.frenzy_active {
            self.frenzy_active = active;
            fx.event(if active {
                GameEvent::FrenzyStarted
            } else {
                GameEvent::FrenzyEnded
            });
        }

        if self.combo > 0 {
            let expired = self
                .last_eat_tick
                .is_none_or(|last| ticks_to_ms(now.saturating_sub(last)) > scoring.combo_window_ms);
            if expired {
                self.combo = 0;
                fx.event(GameEvent::ComboChanged(0));
            }
        }
    }

    /// Record an eat at `now`: extend the streak inside the window, else restart at 1
    pub fn register_eat(&mut self, now: u64, scoring: &ScoringTuning, fx: &mut Effects) -> u32 {
        let in_window = self
            .last_eat_tick
            .is_some_and(|last| ticks_to_ms(now.saturating_sub(last)) < scoring.combo_window_ms);
        if in_window {
            self.combo += 1;
            if self.combo > 1 {
                fx.sound(Sound::Combo);
            }
        } else {
            self.combo = 1;
        }
        self.last_eat_tick = Some(now);
        fx.event(GameEvent::ComboChanged(self.combo));
        self.combo
    }

    /// Fill the frenzy meter; reaching max starts the hold period
    pub fn add_frenzy(&mut self, amount: f32, scoring: &ScoringTuning, fx: &mut Effects) {
        let was_max = self.frenzy_at_max(scoring);
        self.frenzy_meter = (self.frenzy_meter + amount).min(scoring.frenzy_max);
        if !was_max && self.frenzy_at_max(scoring) {
            self.frenzy_hold_ticks = scoring.frenzy_hold_ticks;
            fx.sound(Sound::Frenzy);
        }
    }

    /// Credit points to both the session total and the level counter
    pub fn award(&mut self, points: u64, fx: &mut Effects) {
        self.score += points;
        self.level_score += points;
        fx.event(GameEvent::ScoreChanged {
            gained: points,
            total: self.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scoring() -> ScoringTuning {
        ScoringTuning::default()
    }

    #[test]
    fn test_points_reference_value() {
        // radius 20, first eat (combo 1), no frenzy, not gold
        assert_eq!(points_for_eat(20.0, 1, false, false, &scoring()), 22);
    }

    #[test]
    fn test_points_modifiers() {
        let s = scoring();
        // Fractional radius floors first
        assert_eq!(points_for_eat(20.9, 1, false, false, &s), 22);
        // 15 * 1.1 * 5 = 82.5
        assert_eq!(points_for_eat(15.0, 1, false, true, &s), 82);
        // 20 * 1.1 * 2 = 44
        assert_eq!(points_for_eat(20.0, 1, true, false, &s), 44);
        // 30 * 1.5 = 45
        assert_eq!(points_for_eat(30.0, 5, false, false, &s), 45);
    }

    #[test]
    fn test_combo_window() {
        let s = scoring();
        let mut session = Session::default();
        let mut fx = Effects::new(0);

        assert_eq!(session.register_eat(10, &s, &mut fx), 1);
        // 60 ticks = 1000 ms, inside the window
        assert_eq!(session.register_eat(70, &s, &mut fx), 2);
        assert!(fx.events.contains(&GameEvent::Sound(Sound::Combo)));
        // 150 ticks = exactly 2500 ms, window has elapsed
        assert_eq!(session.register_eat(220, &s, &mut fx), 1);
    }

    #[test]
    fn test_combo_expires_after_window() {
        let tuning = Tuning::default();
        let mut session = Session::default();
        let mut fx = Effects::new(0);
        session.register_eat(0, &tuning.scoring, &mut fx);

        session.tick_timers(150, &tuning, &mut fx);
        assert_eq!(session.combo, 1);
        session.tick_timers(151, &tuning, &mut fx);
        assert_eq!(session.combo, 0);
        assert_eq!(fx.events.last(), Some(&GameEvent::ComboChanged(0)));
    }

    #[test]
    fn test_frenzy_holds_then_decays() {
        let mut tuning = Tuning::default();
        tuning.scoring.frenzy_hold_ticks = 3;
        let mut session = Session::default();
        let mut fx = Effects::new(0);

        session.add_frenzy(90.0, &tuning.scoring, &mut fx);
        session.tick_timers(1, &tuning, &mut fx);
        assert!(!session.frenzy_active);

        session.add_frenzy(15.0, &tuning.scoring, &mut fx);
        assert_eq!(session.frenzy_meter, 100.0);
        assert!(fx.events.contains(&GameEvent::Sound(Sound::Frenzy)));

        for t in 2..5 {
            session.tick_timers(t, &tuning, &mut fx);
            assert!(session.frenzy_active);
            assert_eq!(session.frenzy_meter, 100.0);
        }
        assert!(fx.events.contains(&GameEvent::FrenzyStarted));

        session.tick_timers(5, &tuning, &mut fx);
        assert!(session.frenzy_meter < 100.0);
        assert!(!session.frenzy_active);
        assert_eq!(fx.events.last(), Some(&GameEvent::FrenzyEnded));
    }

    #[test]
    fn test_reset_seeds_score_for_level_select() {
        let tuning = Tuning::default();
        let mut session = Session {
            score: 5,
            combo: 3,
            freeze_ticks: 9,
            ..Default::default()
        };
        session.reset_for_level(0, &tuning);
        assert_eq!(session.score, 0);
        assert_eq!(session.combo, 0);
        assert_eq!(session.freeze_ticks, 0);
        session.reset_for_level(3, &tuning);
        assert_eq!(session.score, 3000);
        assert_eq!(session.level, 3);
    }

    #[test]
    fn test_begin_level_keeps_score() {
        let mut session = Session {
            score: 4321,
            level_score: 900,
            combo: 2,
            ..Default::default()
        };
        session.begin_level(99);
        assert_eq!(session.level, LAST_LEVEL);
        assert_eq!(session.score, 4321);
        assert_eq!(session.level_score, 0);
        assert_eq!(session.combo, 0);
    }

    #[test]
    fn test_award_tracks_both_counters() {
        let mut session = Session {
            score: 100,
            ..Default::default()
        };
        let mut fx = Effects::new(0);
        session.award(22, &mut fx);
        assert_eq!(session.score, 122);
        assert_eq!(session.level_score, 22);
    }

    proptest! {
        #[test]
        fn prop_points_follow_formula(
            radius in 0.5f32..300.0,
            combo in 0u32..50,
            frenzy in any::<bool>(),
            gold in any::<bool>(),
        ) {
            let s = scoring();
            let points = points_for_eat(radius, combo, frenzy, gold, &s);
            prop_assert_eq!(points, points_for_eat(radius, combo, frenzy, gold, &s));
            // A longer streak never pays less
            prop_assert!(points_for_eat(radius, combo + 1, frenzy, gold, &s) >= points);
            if frenzy {
                prop_assert!(points >= points_for_eat(radius, combo, false, gold, &s));
            }
        }

        #[test]
        fn prop_combo_counts_streaks(gaps in proptest::collection::vec(1u64..300, 1..20)) {
            let s = scoring();
            let mut session = Session::default();
            let mut fx = Effects::new(0);
            let mut now = 0;
            let mut expected = session.register_eat(now, &s, &mut fx);
            for gap in gaps {
                now += gap;
                expected = if ticks_to_ms(gap) < s.combo_window_ms { expected + 1 } else { 1 };
                prop_assert_eq!(session.register_eat(now, &s, &mut fx), expected);
            }
        }
    }
}
