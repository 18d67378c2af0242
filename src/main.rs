//! SnakeSoul headless runner
//!
//! Plays one match with the autopilot at a fixed frame rate and logs what
//! happens. Useful for replaying a seed or sanity-checking a settings file.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::Rng;

    use snake_soul::Settings;
    use snake_soul::sim::{GameEvent, GamePhase, GameState, TickInput, clock_label, steer, tick};

    #[derive(Parser)]
    #[command(name = "snake-soul")]
    #[command(about = "Run a SnakeSoul match headless with the autopilot")]
    pub struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON settings file; missing fields keep their defaults
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Stop after this much simulated time
        #[arg(long, default_value_t = 600.0)]
        max_seconds: f64,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        let mut state = GameState::new(settings, seed)?;

        let dt = 1.0 / args.fps.max(1) as f32;
        let mut frames: u64 = 0;
        let mut apples: u32 = 0;

        while !state.phase.is_terminal() && state.elapsed() < args.max_seconds {
            let input = TickInput {
                direction: steer(&state),
            };
            for event in tick(&mut state, &input, dt) {
                match event {
                    GameEvent::ApplePicked(kind) => {
                        apples += 1;
                        log::info!(
                            "[{}] ate {:?} apple (length {}, hawk {})",
                            state.clock.label(),
                            kind,
                            state.snake.len(),
                            state.hawk_health()
                        );
                    }
                    GameEvent::FireballHit { segment, removed } => log::info!(
                        "[{}] fireball hit segment {} ({} lost)",
                        state.clock.label(),
                        segment,
                        removed
                    ),
                    GameEvent::LifeLost => {
                        log::info!("[{}] life lost, {} left", state.clock.label(), state.lives())
                    }
                    other => log::debug!("[{}] {:?}", state.clock.label(), other),
                }
            }
            frames += 1;
        }

        let outcome = match state.phase {
            GamePhase::Victory => "snake wins",
            GamePhase::GameOver => "hawk wins",
            GamePhase::Playing | GamePhase::Respawning => "time limit",
        };
        let run = match state.seed {
            Some(seed) => format!("seed {}", seed),
            None => "unseeded run".to_string(),
        };
        println!(
            "{}: {} at {} after {} frames ({} apples, length {}, lives {}, hawk {}/{})",
            run,
            outcome,
            clock_label(state.clock.whole_seconds()),
            frames,
            apples,
            state.snake.len(),
            state.lives(),
            state.hawk_health(),
            state.hawk.max_health()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("SnakeSoul (headless) starting...");

    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native runner on wasm; embed the library instead
}
