//! Fixed timestep accumulator
//!
//! Hosts render at whatever rate the display gives them; the game loop wants
//! one `tick` per fixed step. Feed real frame times in, get a step count out.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        // Drop time we could not simulate (spiral of death guard)
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Forget leftover time (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new(0.01, 5);
        assert_eq!(clock.advance(0.006), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.025), 2);
    }

    #[test]
    fn test_caps_substeps() {
        let mut clock = FrameClock::new(0.01, 3);
        assert_eq!(clock.advance(0.05), 3);
        // Backlog was dropped, not replayed
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_ignores_negative_and_huge_frames() {
        let mut clock = FrameClock::new(0.05, 100);
        assert_eq!(clock.advance(-1.0), 0);
        // Clamped to 0.1 s
        assert_eq!(clock.advance(10.0), 2);
    }
}
