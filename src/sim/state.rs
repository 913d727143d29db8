//! Game state and core simulation types
//!
//! Everything the controller mutates between frames lives here. The whole
//! state is serializable so hosts can mirror it (e.g. as JSON over a JS bridge).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pipes::{ObstaclePair, PipePool};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input; bird hovers, gravity off
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended, bird keeps falling
    GameOver,
}

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ground,
    Obstacle,
}

/// Cues for the host (sounds, prompts, score overlay refresh)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entered Ready (show "get ready", play swoosh)
    Ready,
    /// First input received, gameplay started
    Start,
    Flap,
    /// Passed a pipe pair
    Point { score: u64 },
    /// Any crash
    Hit,
    /// Crash into a pipe (followed by the fall)
    Die,
    /// Session ended; `best` is already updated and persisted
    GameOver { score: u64, best: u64, new_best: bool },
    /// Restart cooldown elapsed
    RestartAllowed,
}

/// The bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive = down)
    pub vel_y: f32,
    /// Pitch in degrees (positive = nose down)
    pub angle: f32,
    pub gravity_enabled: bool,
    pub size: Vec2,
    /// Set by a flap, cleared at the end of the tick
    #[serde(skip)]
    pub flapped: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.bird_start(),
            vel_y: 0.0,
            angle: 0.0,
            gravity_enabled: false,
            size: Vec2::new(tuning.bird_width, tuning.bird_height),
            flapped: false,
        }
    }

    /// Back to the start position, at rest and level
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = tuning.bird_start();
        self.vel_y = 0.0;
        self.angle = 0.0;
        self.flapped = false;
    }

    /// Leading (right) edge
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y * 0.5
    }
}

/// Session score plus the best score seen by this controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub current: u64,
    /// Best score after the last game over (seeded from the store)
    pub best: u64,
    /// Pool index of the pair that scored most recently
    pub last_scored: Option<usize>,
}

impl ScoreBoard {
    /// Award a point if the player's leading edge is past the pair's center
    /// and the pair has not scored since it was last placed. Returns true
    /// when a point was awarded.
    pub fn try_score(
        &mut self,
        pair: &mut ObstaclePair,
        center_x: f32,
        player_right: f32,
    ) -> bool {
        if pair.scored || center_x >= player_right {
            return false;
        }
        pair.scored = true;
        self.current += 1;
        self.last_scored = Some(pair.index);
        true
    }

    /// New session
    pub fn clear(&mut self) {
        self.current = 0;
        self.last_scored = None;
    }
}

/// Complete controller state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub pipes: PipePool,
    pub score: ScoreBoard,
    /// Horizontal scroll of the ground texture, wrapped to one tile
    pub ground_offset: f32,
    /// Set on flap, cleared when the input is released
    pub flap_latch: bool,
    /// What ended the current run (None outside GameOver)
    pub crash: Option<CollisionKind>,
    /// Seconds spent in the current phase
    pub phase_time: f32,
    pub restart_allowed: bool,
    /// Frames simulated since construction
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(tuning: &Tuning, pipes: PipePool) -> Self {
        Self {
            phase: GamePhase::Ready,
            player: Player::new(tuning),
            pipes,
            score: ScoreBoard::default(),
            ground_offset: 0.0,
            flap_latch: false,
            crash: None,
            phase_time: 0.0,
            restart_allowed: false,
            time_ticks: 0,
        }
    }
}
