//! Game loop simulation
//!
//! All gameplay logic lives here. No rendering, audio or platform code:
//! - Phases: Ready -> Playing -> GameOver -> (restart) -> Ready
//! - Fixed-size pipe pool, recycled in place
//! - Seeded RNG only

pub mod autopilot;
pub mod collision;
pub mod controller;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::{Rect, detect};
pub use controller::GameLoop;
pub use pipes::{ObstaclePair, PipePool};
pub use state::{CollisionKind, GameEvent, GamePhase, GameState, Player, ScoreBoard};
pub use tick::TickInput;
