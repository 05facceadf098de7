//! Particles, floating text and the per-tick event queue
//!
//! None of this feeds back into gameplay. Particles and texts are plain lists
//! pruned by remaining life every tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::session::GamePhase;
use crate::audio::Sound;
use crate::tuning::FxTuning;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Decreases every tick; pruned at <= 0
    pub life: f32,
    pub color: u32,
    /// Alpha multiplier (stream lines are faint)
    pub alpha: f32,
    pub size: f32,
}

/// Rising, fading text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub color: u32,
}

impl FloatingText {
    /// Fade alpha from 1 (fresh) to 0 (expired)
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Sound(Sound),
    FrenzyStarted,
    FrenzyEnded,
    ComboChanged(u32),
    /// Points gained and the new total
    ScoreChanged { gained: u64, total: u64 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Effect lists plus the pending event queue
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    /// Ambient background bubbles
    pub bubbles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub events: Vec<GameEvent>,
    max_particles: usize,
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles,
            ..Default::default()
        }
    }

    /// Queue a sound cue
    pub fn sound(&mut self, sound: Sound) {
        self.events.push(GameEvent::Sound(sound));
    }

    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add one particle unless the cap is reached
    pub fn particle(&mut self, pos: Vec2, vel: Vec2, life: f32, color: u32, size: f32) {
        if self.particles.len() < self.max_particles {
            self.particles.push(Particle {
                pos,
                vel,
                life,
                color,
                alpha: 1.0,
                size,
            });
        }
    }

    /// Burst of `count` particles with random velocity in `[-spread/2, spread/2)` per axis
    #[allow(clippy::too_many_arguments)]
    pub fn burst<R: Rng>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        count: u32,
        spread: f32,
        life: f32,
        color: u32,
        size: f32,
    ) {
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            );
            self.particle(pos, vel, life, color, size);
        }
    }

    /// Faint line drawn by the suction ability
    pub fn stream(&mut self, pos: Vec2, vel: Vec2) {
        if self.particles.len() < self.max_particles {
            self.particles.push(Particle {
                pos,
                vel,
                life: 0.5,
                color: crate::consts::colors::WHITE,
                alpha: 0.3,
                size: 1.0,
            });
        }
    }

    /// Spawn floating text
    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, life: u32, color: u32) {
        self.texts.push(FloatingText {
            pos,
            text: text.into(),
            life,
            max_life: life,
            color,
        });
    }

    /// Advance particles, bubbles and texts; prune the expired ones
    pub fn update<R: Rng>(&mut self, rng: &mut R, bounds: Vec2, fx: &FxTuning) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= fx.particle_decay;
        }
        self.particles.retain(|p| p.life > 0.0);

        if self.max_particles > 0 && rng.random::<f32>() < fx.bubble_chance {
            self.bubbles.push(Particle {
                pos: Vec2::new(rng.random::<f32>() * bounds.x, bounds.y + 10.0),
                vel: Vec2::new(0.0, -1.0 - rng.random::<f32>()),
                life: 1.0,
                color: crate::consts::colors::WHITE,
                alpha: 0.1,
                size: 2.0 + rng.random::<f32>() * 4.0,
            });
        }
        for b in &mut self.bubbles {
            b.pos.y += b.vel.y;
            b.pos.x += (b.pos.y * 0.05).sin() * 0.5;
        }
        self.bubbles.retain(|b| b.pos.y >= -10.0);

        for t in &mut self.texts {
            t.pos.y -= fx.text_rise;
            t.life = t.life.saturating_sub(1);
        }
        self.texts.retain(|t| t.life > 0);
    }

    /// Drop everything (level start / menu exit)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.bubbles.clear();
        self.texts.clear();
        self.events.clear();
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }
}
