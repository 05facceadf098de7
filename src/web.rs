//! Browser bindings
//!
//! The JS side owns the canvas, the asset loader and the audio context. It
//! forwards input here, calls `frame` from `requestAnimationFrame`, and reads
//! the snapshot and sound queue back as JSON.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::{self, AudioSink, Sound};
use crate::autopilot::Autopilot;
use crate::consts::{MAX_SUBSTEPS, MS_PER_TICK};
use crate::settings::Settings;
use crate::sim::{ControlMode, GameState, TickInput, tick};
use crate::snapshot::RenderSnapshot;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Ocean Frenzy core loaded");
}

/// One sound for the JS audio context to play
#[derive(Debug, Serialize)]
struct Cue {
    key: &'static str,
    volume: f32,
}

/// Collects cues until JS drains them
#[derive(Default)]
struct CueQueue(Vec<Cue>);

impl AudioSink for CueQueue {
    fn play(&mut self, sound: Sound, volume: f32) {
        self.0.push(Cue {
            key: sound.key(),
            volume,
        });
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    settings: Settings,
    input: TickInput,
    autopilot: Option<Autopilot>,
    cues: CueQueue,
    accumulator: f64,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    /// A `seed` of 0 seeds from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64) -> WebGame {
        let seed = if seed > 0.0 { seed } else { js_sys::Date::now() };
        let settings = Settings::load();
        let mut state = GameState::new(seed as u64, width, height, Tuning::default());
        state.apply_settings(&settings);
        let input = TickInput {
            mode: settings.preferred_control,
            ..Default::default()
        };
        WebGame {
            state,
            settings,
            input,
            autopilot: None,
            cues: CueQueue::default(),
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Asset preloading finished
    pub fn finish_loading(&mut self) -> bool {
        self.state.finish_loading()
    }

    pub fn start(&mut self, level: usize) -> bool {
        self.accumulator = 0.0;
        self.state.start(level)
    }

    pub fn next_level(&mut self) -> bool {
        self.state.advance_next_level()
    }

    pub fn retry(&mut self) -> bool {
        self.state.retry()
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        // Don't replay the time spent paused
        self.last_time = None;
        self.state.resume()
    }

    pub fn menu(&mut self) -> bool {
        self.state.return_to_menu()
    }

    pub fn open_settings(&mut self) -> bool {
        self.state.open_settings()
    }

    pub fn close_settings(&mut self) -> bool {
        self.state.close_settings()
    }

    /// Pointer moved (world coordinates); switches to pointer control
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.pointer = glam::Vec2::new(x, y);
        self.input.mode = ControlMode::Pointer;
    }

    /// Direction key change (`KeyboardEvent.code`); switches to key control
    pub fn set_key(&mut self, code: &str, down: bool) {
        let dirs = &mut self.input.directions;
        let slot = match code {
            "ArrowUp" | "KeyW" => &mut dirs.up,
            "ArrowDown" | "KeyS" => &mut dirs.down,
            "ArrowLeft" | "KeyA" => &mut dirs.left,
            "ArrowRight" | "KeyD" => &mut dirs.right,
            _ => return,
        };
        *slot = down;
        self.input.mode = ControlMode::Directional;
    }

    /// Request a dash on the next tick
    pub fn dash(&mut self) {
        self.input.dash = true;
    }

    pub fn set_suction(&mut self, held: bool) {
        self.input.suction = held;
    }

    /// Let the autopilot play (attract mode)
    pub fn set_idle(&mut self, idle: bool) {
        self.autopilot = idle.then(Autopilot::default);
        log::info!("Idle mode: {}", idle);
    }

    /// Advance by however many fixed ticks fit in the elapsed time
    ///
    /// Returns the number of ticks run, at most `MAX_SUBSTEPS`.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let elapsed = self.last_time.map_or(MS_PER_TICK, |last| now_ms - last);
        self.last_time = Some(now_ms);
        self.accumulator = (self.accumulator + elapsed.max(0.0))
            .min(MS_PER_TICK * f64::from(MAX_SUBSTEPS));

        let mut ticks = 0;
        while self.accumulator >= MS_PER_TICK && ticks < MAX_SUBSTEPS {
            self.accumulator -= MS_PER_TICK;
            let input = match &self.autopilot {
                Some(pilot) => pilot.input_for(&self.state),
                None => self.input.clone(),
            };
            tick(&mut self.state, &input);
            self.input.dash = false;
            ticks += 1;
        }

        let events = self.state.drain_events();
        audio::dispatch(events.iter(), &mut self.cues, &self.settings);
        ticks
    }

    /// Current render snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&RenderSnapshot::capture(&self.state)).map_err(to_js)
    }

    /// Sounds queued since the last call, as JSON `[{key, volume}]`
    pub fn drain_sounds_json(&mut self) -> Result<String, JsValue> {
        let cues = std::mem::take(&mut self.cues.0);
        serde_json::to_string(&cues).map_err(to_js)
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.settings).map_err(to_js)
    }

    /// Replace and persist settings
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.settings = serde_json::from_str(json).map_err(to_js)?;
        self.settings.save();
        self.state.apply_settings(&self.settings);
        Ok(())
    }

    /// Override the balance table with (possibly partial) JSON
    pub fn set_tuning_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.state.tuning = Tuning::from_json(json).map_err(to_js)?;
        self.state.apply_settings(&self.settings);
        Ok(())
    }

    pub fn growth_progress(&self) -> f32 {
        self.state.growth_progress()
    }
}
