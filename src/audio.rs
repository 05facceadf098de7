//! Sound cues emitted by the simulation
//!
//! The simulation never plays audio itself. It queues `Sound` keys as events
//! and the host hands them to whatever `AudioSink` it owns. Nothing flows back.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    /// Player ate a fish
    Eat,
    /// Player was eaten
    Die,
    /// Final level cleared
    Win,
    /// Level goal reached
    LevelUp,
    Dash,
    /// Frenzy meter maxed out
    Frenzy,
    /// Consecutive eat inside the combo window
    Combo,
    /// Electric or jelly sting
    Zap,
    /// Mine detonation or shield pop
    Explode,
    /// Shield picked up
    Shield,
    /// Suction ability running
    Suction,
    /// Speed or growth pickup
    PowerUp,
    /// Freeze pickup
    Freeze,
}

impl Sound {
    pub const ALL: [Sound; 13] = [
        Sound::Eat,
        Sound::Die,
        Sound::Win,
        Sound::LevelUp,
        Sound::Dash,
        Sound::Frenzy,
        Sound::Combo,
        Sound::Zap,
        Sound::Explode,
        Sound::Shield,
        Sound::Suction,
        Sound::PowerUp,
        Sound::Freeze,
    ];

    /// Asset key for this sound
    pub fn key(&self) -> &'static str {
        match self {
            Sound::Eat => "eat",
            Sound::Die => "die",
            Sound::Win => "win",
            Sound::LevelUp => "levelup",
            Sound::Dash => "dash",
            Sound::Frenzy => "frenzy",
            Sound::Combo => "combo",
            Sound::Zap => "zap",
            Sound::Explode => "explode",
            Sound::Shield => "shield",
            Sound::Suction => "suction",
            Sound::PowerUp => "powerup",
            Sound::Freeze => "freeze",
        }
    }
}

/// Fire-and-forget audio backend
pub trait AudioSink {
    /// Play `sound` at `volume` (0.0 - 1.0). Missing assets must degrade to silence.
    fn play(&mut self, sound: Sound, volume: f32);
}

/// Sink that drops everything (headless runs, tests)
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound, _volume: f32) {}
}

/// Forward every sound event in `events` to `sink`, honoring the volume settings
pub fn dispatch<'a, S, I>(events: I, sink: &mut S, settings: &Settings) -> usize
where
    S: AudioSink + ?Sized,
    I: IntoIterator<Item = &'a GameEvent>,
{
    let volume = settings.effective_sfx_volume();
    if volume <= 0.0 {
        return 0;
    }
    let mut played = 0;
    for event in events {
        if let GameEvent::Sound(sound) = event {
            sink.play(*sound, volume);
            played += 1;
        }
    }
    played
}
