//! Flappy Loop - engine-agnostic Flappy Bird game loop
//!
//! Core modules:
//! - `sim`: Game loop controller (phases, pipe pool, scoring, collisions)
//! - `store`: Best-score persistence (memory, file, LocalStorage)
//! - `tuning`: Data-driven game balance
//! - `clock`: Fixed timestep accumulator for hosts
//! - `hud`: Score overlay layout

pub mod clock;
pub mod error;
pub mod hud;
pub mod sim;
pub mod store;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use error::{StoreError, TuningError};
pub use sim::{CollisionKind, GameEvent, GameLoop, GamePhase, GameState, TickInput};
pub use store::{MemoryStore, ScoreStore};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (one rendering frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Scene dimensions
    pub const SCENE_WIDTH: f32 = 320.0;
    pub const SCENE_HEIGHT: f32 = 600.0;

    /// Pipe sprite dimensions
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_HEIGHT: f32 = 320.0;
    /// Vertical opening between top and bottom pipe
    pub const PIPE_GAP_HEIGHT: f32 = 100.0;
    /// Horizontal distance between consecutive pairs
    pub const PIPE_SPACING: f32 = 180.0;
    /// Number of pooled pairs
    pub const PIPE_PAIRS: usize = 3;
    /// Lowest gap offset as a fraction of pipe height (offset range is [-ratio * h, 0])
    pub const GAP_OFFSET_RATIO: f32 = 0.7;

    /// Ground strip
    pub const GROUND_HEIGHT: f32 = 112.0;
    pub const GROUND_TILE_WIDTH: f32 = 336.0;

    /// Scroll speed in pixels per frame (ground and pipes)
    pub const GAME_SPEED: f32 = 2.0;

    /// Bird defaults
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    pub const BIRD_START_X_RATIO: f32 = 0.3;
    pub const BIRD_START_Y_RATIO: f32 = 0.5;
    /// Downward acceleration, pixels/s²
    pub const BIRD_GRAVITY: f32 = 1000.0;
    /// Vertical velocity set by a flap, pixels/s (negative = up)
    pub const BIRD_FLAP_VELOCITY: f32 = -360.0;

    /// Pitch, degrees (positive = nose down)
    pub const ELEVATION_ANGLE: f32 = 25.0;
    pub const FALL_ANGLE: f32 = 90.0;
    pub const DECLINE_ANGLE_DELTA: f32 = 2.0;

    /// Idle hover while waiting for the first input
    pub const BOB_AMPLITUDE: f32 = 5.0;
    pub const BOB_HALF_PERIOD: f32 = 0.3;

    /// Seconds after game over before a restart is accepted
    pub const RESTART_COOLDOWN: f32 = 0.5;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "best-score";

    /// Width of one score digit sprite
    pub const DIGIT_WIDTH: f32 = 24.0;
}
