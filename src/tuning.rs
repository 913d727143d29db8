//! Game balance and scene geometry
//!
//! Every gameplay constant lives here so hosts can tweak the feel without
//! touching the simulation. Missing JSON fields fall back to [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scene ===
    pub scene_width: f32,
    pub scene_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub pipe_gap_height: f32,
    pub pipe_spacing: f32,
    pub pipe_pairs: usize,
    /// Gap offsets are drawn from [-ratio * pipe_height, 0]
    pub gap_offset_ratio: f32,

    // === Ground ===
    pub ground_height: f32,
    pub ground_tile_width: f32,

    /// Pixels per frame
    pub scroll_speed: f32,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    pub bird_start_x_ratio: f32,
    pub bird_start_y_ratio: f32,
    pub gravity: f32,
    pub flap_velocity: f32,

    // === Pitch (degrees) ===
    pub elevation_angle: f32,
    pub fall_angle: f32,
    pub decline_angle_delta: f32,

    // === Ready hover ===
    pub bob_amplitude: f32,
    pub bob_half_period: f32,

    /// Seconds spent in game over before restart is accepted
    pub restart_cooldown: f32,

    /// Run the built-in AABB checks each tick instead of waiting for
    /// the host to report collisions
    pub detect_collisions: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,

            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_gap_height: PIPE_GAP_HEIGHT,
            pipe_spacing: PIPE_SPACING,
            pipe_pairs: PIPE_PAIRS,
            gap_offset_ratio: GAP_OFFSET_RATIO,

            ground_height: GROUND_HEIGHT,
            ground_tile_width: GROUND_TILE_WIDTH,

            scroll_speed: GAME_SPEED,

            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            bird_start_x_ratio: BIRD_START_X_RATIO,
            bird_start_y_ratio: BIRD_START_Y_RATIO,
            gravity: BIRD_GRAVITY,
            flap_velocity: BIRD_FLAP_VELOCITY,

            elevation_angle: ELEVATION_ANGLE,
            fall_angle: FALL_ANGLE,
            decline_angle_delta: DECLINE_ANGLE_DELTA,

            bob_amplitude: BOB_AMPLITUDE,
            bob_half_period: BOB_HALF_PERIOD,

            restart_cooldown: RESTART_COOLDOWN,

            detect_collisions: false,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("scene_width", self.scene_width)?;
        positive("scene_height", self.scene_height)?;
        positive("pipe_width", self.pipe_width)?;
        positive("pipe_height", self.pipe_height)?;
        positive("pipe_gap_height", self.pipe_gap_height)?;
        positive("scroll_speed", self.scroll_speed)?;
        positive("bird_width", self.bird_width)?;
        positive("bird_height", self.bird_height)?;
        positive("bob_half_period", self.bob_half_period)?;

        if self.pipe_pairs == 0 {
            return Err(TuningError::Invalid {
                field: "pipe_pairs",
                reason: "pool needs at least one pair".to_string(),
            });
        }
        // A pair must be able to leave the screen before its slot is needed again
        if !(self.pipe_spacing.is_finite() && self.pipe_spacing > self.pipe_width) {
            return Err(TuningError::Invalid {
                field: "pipe_spacing",
                reason: format!(
                    "must exceed pipe_width ({}), got {}",
                    self.pipe_width, self.pipe_spacing
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.gap_offset_ratio) {
            return Err(TuningError::Invalid {
                field: "gap_offset_ratio",
                reason: format!("must be within [0, 1], got {}", self.gap_offset_ratio),
            });
        }
        if self.fall_angle < -self.elevation_angle {
            return Err(TuningError::Invalid {
                field: "fall_angle",
                reason: "must not be above the flap elevation".to_string(),
            });
        }
        if self.decline_angle_delta.is_nan() || self.decline_angle_delta < 0.0 {
            return Err(TuningError::Invalid {
                field: "decline_angle_delta",
                reason: format!("cannot be negative, got {}", self.decline_angle_delta),
            });
        }
        if self.restart_cooldown.is_nan() || self.restart_cooldown < 0.0 {
            return Err(TuningError::Invalid {
                field: "restart_cooldown",
                reason: format!("cannot be negative, got {}", self.restart_cooldown),
            });
        }
        Ok(())
    }

    /// Initial bird center
    pub fn bird_start(&self) -> Vec2 {
        Vec2::new(
            self.scene_width * self.bird_start_x_ratio,
            self.scene_height * self.bird_start_y_ratio,
        )
    }

    /// X of the first pooled pair at session start
    pub fn first_pipe_x(&self) -> f32 {
        self.scene_width + self.pipe_spacing
    }

    /// Lowest allowed gap offset (top pipe y)
    pub fn min_gap_offset(&self) -> f32 {
        -self.pipe_height * self.gap_offset_ratio
    }

    /// Y of the top edge of the ground strip
    pub fn ground_top(&self) -> f32 {
        // The ground tile is centered 30% of its height above the scene bottom
        let center = self.scene_height - self.ground_height * 0.3;
        center - self.ground_height * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "pipe_pairs": 4, "scroll_speed": 3.0 }"#).unwrap();
        assert_eq!(tuning.pipe_pairs, 4);
        assert_eq!(tuning.scroll_speed, 3.0);
        assert_eq!(tuning.pipe_spacing, PIPE_SPACING);
        assert!(!tuning.detect_collisions);
    }

    #[test]
    fn test_rejects_empty_pool() {
        let err = Tuning::from_json(r#"{ "pipe_pairs": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "pipe_pairs", .. }));
    }

    #[test]
    fn test_rejects_spacing_narrower_than_pipe() {
        let err = Tuning::from_json(r#"{ "pipe_spacing": 40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "pipe_spacing", .. }));
    }

    #[test]
    fn test_negative_cooldown_names_its_field() {
        let err = Tuning::from_json(r#"{ "restart_cooldown": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "restart_cooldown", .. }));

        let err = Tuning::from_json(r#"{ "decline_angle_delta": -2.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "decline_angle_delta", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_derived_geometry() {
        let tuning = Tuning::default();
        assert_eq!(tuning.bird_start(), Vec2::new(96.0, 300.0));
        assert_eq!(tuning.first_pipe_x(), 500.0);
        assert!((tuning.min_gap_offset() - (-224.0)).abs() < 1e-3);
        assert!((tuning.ground_top() - 510.4).abs() < 1e-3);
    }
}
