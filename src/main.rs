//! Ocean Frenzy entry point
//!
//! Native builds run a headless session driven by the autopilot and print a
//! JSON summary. The browser build is driven from JS through `ocean_frenzy::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use ocean_frenzy::audio::{self, AudioSink, Sound};
    use ocean_frenzy::autopilot::Autopilot;
    use ocean_frenzy::consts::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, TICK_RATE_HZ};
    use ocean_frenzy::sim::{GamePhase, GameState, tick};
    use ocean_frenzy::{Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "ocean-frenzy")]
    #[command(about = "Headless Ocean Frenzy session played by the autopilot")]
    pub struct Cli {
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Level to start on (0-based)
        #[arg(long, default_value_t = 0)]
        level: usize,
        /// Maximum ticks to simulate (60 per second)
        #[arg(long, default_value_t = 36_000)]
        ticks: u64,
        #[arg(long, default_value_t = DEFAULT_WORLD_WIDTH)]
        width: f32,
        #[arg(long, default_value_t = DEFAULT_WORLD_HEIGHT)]
        height: f32,
        /// JSON balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Retries allowed after a game over
        #[arg(long, default_value_t = 0)]
        retry: u32,
    }

    /// Counts cues instead of playing them
    #[derive(Default)]
    struct Tally(BTreeMap<&'static str, u32>);

    impl AudioSink for Tally {
        fn play(&mut self, sound: Sound, _volume: f32) {
            *self.0.entry(sound.key()).or_default() += 1;
        }
    }

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        outcome: GamePhase,
        level: usize,
        levels_cleared: u32,
        retries_used: u32,
        score: u64,
        ticks: u64,
        seconds: f64,
        player_radius: f32,
        sounds: BTreeMap<&'static str, u32>,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("parsing tuning file {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = load_tuning(cli.tuning.as_ref())?;
        let settings = Settings::default();
        let pilot = Autopilot::default();
        let mut tally = Tally::default();

        let mut state = GameState::new(cli.seed, cli.width, cli.height, tuning);
        state.apply_settings(&settings);
        state.finish_loading();
        state.start(cli.level);

        let mut levels_cleared = 0;
        let mut retries_used = 0;
        let mut total_ticks = 0;

        while total_ticks < cli.ticks {
            match state.phase() {
                GamePhase::Playing => {
                    let input = pilot.input_for(&state);
                    tick(&mut state, &input);
                    total_ticks += 1;
                }
                GamePhase::LevelComplete => {
                    levels_cleared += 1;
                    state.advance_next_level();
                }
                GamePhase::GameOver if retries_used < cli.retry => {
                    retries_used += 1;
                    log::info!("Retry {}/{}", retries_used, cli.retry);
                    state.retry();
                }
                _ => break,
            }
            audio::dispatch(state.drain_events().iter(), &mut tally, &settings);
        }

        let summary = Summary {
            seed: cli.seed,
            outcome: state.phase(),
            level: state.session.level,
            levels_cleared,
            retries_used,
            score: state.session.score,
            ticks: total_ticks,
            seconds: total_ticks as f64 / f64::from(TICK_RATE_HZ),
            player_radius: state.player.radius,
            sounds: tally.0,
        };
        log::info!(
            "Finished as {:?} on level {} with score {}",
            summary.outcome,
            summary.level + 1,
            summary.score
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ocean_frenzy::web::start, this is just to satisfy the compiler
}
