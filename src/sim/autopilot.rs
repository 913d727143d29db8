//! Demo autopilot
//!
//! Decides the "activation held" signal from the current state. It flaps
//! whenever the bird sinks close to the bottom of the next opening, and lets
//! go in between so the flap latch can reset.

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// How far above the gap bottom the bird's bottom edge may sink before flapping
const FLAP_MARGIN: f32 = 8.0;

/// Whether the autopilot presses this frame
pub fn wants_activate(state: &GameState, tuning: &Tuning) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::GameOver => state.restart_allowed,
        GamePhase::Playing => {
            // Release first so the next press counts
            if state.flap_latch {
                return false;
            }

            let player = &state.player;
            let bird_left = player.pos.x - player.size.x * 0.5;
            let floor = match state.pipes.next_ahead_of(bird_left, tuning) {
                Some(pair) => pair.gap(tuning).1 - FLAP_MARGIN,
                None => tuning.scene_height * 0.5,
            };

            player.bottom() > floor && player.vel_y >= 0.0
        }
    }
}
