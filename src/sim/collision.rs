//! Axis-aligned collision checks
//!
//! Hosts with their own physics report collisions through
//! `GameLoop::on_collision`. Hosts without one can turn on
//! `Tuning::detect_collisions` and let the controller run these checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{CollisionKind, GameState};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_top_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Find what the bird is touching, pipes first.
///
/// Rotation is ignored: the bird's box stays axis-aligned.
pub fn detect(state: &GameState, tuning: &Tuning) -> Option<CollisionKind> {
    let bird = Rect::from_center(state.player.pos, state.player.size);

    let hit_pipe = state.pipes.iter().any(|pair| {
        bird.intersects(&pair.top_rect(tuning)) || bird.intersects(&pair.bottom_rect(tuning))
    });
    if hit_pipe {
        return Some(CollisionKind::Obstacle);
    }

    if state.player.bottom() >= tuning.ground_top() {
        return Some(CollisionKind::Ground);
    }

    None
}
