//! Flappy Loop entry point
//!
//! Native: runs the game loop headless with the demo autopilot and built-in
//! collision checks, persisting the best score to disk.
//! WASM: the JS host drives `flappy_loop::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;
    use clap::Parser;

    use flappy_loop::consts::SIM_DT;
    use flappy_loop::store::FileStore;
    use flappy_loop::{GameEvent, GameLoop, MemoryStore, ScoreStore, TickInput, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "flappy-loop", about = "Run the game loop headless with the demo autopilot")]
    struct Args {
        /// RNG seed for gap offsets (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many frames even if the bird is still alive
        #[arg(long, default_value_t = 36_000)]
        max_frames: u64,

        /// Number of sessions to play before exiting
        #[arg(long, default_value_t = 1)]
        sessions: u32,

        /// JSON tuning file
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Best-score file (defaults to the user data dir)
        #[arg(long)]
        store: Option<PathBuf>,
    }

    fn open_store(path: Option<PathBuf>) -> Box<dyn ScoreStore> {
        match path.or_else(FileStore::default_path) {
            Some(path) => {
                log::info!("Best score file: {}", path.display());
                Box::new(FileStore::new(path))
            }
            None => {
                log::warn!("No data directory, best score will not be kept");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        let mut tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        tuning.detect_collisions = true;

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        let mut game = GameLoop::new(tuning, open_store(args.store), seed)?;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut finished = 0;
        let mut frames = 0;
        while finished < args.sessions && frames < args.max_frames {
            game.tick(SIM_DT, &input);
            frames += 1;

            for event in game.drain_events() {
                match event {
                    GameEvent::Point { score } => log::debug!("Score {score}"),
                    GameEvent::GameOver {
                        score,
                        best,
                        new_best,
                    } => {
                        finished += 1;
                        let marker = if new_best { " (new best!)" } else { "" };
                        println!("Session {finished}: score {score}, best {best}{marker}");
                    }
                    _ => {}
                }
            }
        }

        if finished < args.sessions {
            println!(
                "Stopped after {frames} frames: score {}, best {}",
                game.score(),
                game.best()
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Flappy Loop (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_loop::web, this is just to satisfy the compiler
}
