//! Data-driven gameplay balance
//!
//! Every designer-tunable number lives here so balance passes never touch
//! sim code. Loadable from JSON; the defaults are the shipped balance.

use serde::{Deserialize, Serialize};

/// Player movement tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed multiplier applied to the ramped move direction
    pub move_speed: f32,
    /// Horizontal ramp rate while grounded (direction units per second)
    pub acceleration: f32,
    /// Upward velocity granted by a full jump
    pub jump_power: f32,
    /// Fraction of jump power granted by the mid-air jump
    pub double_jump_mult: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            acceleration: 10.0,
            jump_power: 10.0,
            double_jump_mult: 0.5,
            gravity: 12.0,
        }
    }
}

/// Platform spawn tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Inclusive lower bound of the horizontal offset draw
    pub x_offset_min: i32,
    /// Exclusive upper bound of the horizontal offset draw
    pub x_offset_max: i32,
    /// World-unit scale applied to the drawn offset
    pub x_offset_scale: f32,
    /// Accumulated camera travel (world units) that triggers a spawn
    pub camera_delta_threshold: f32,
    /// Platform budget for a level-1 session; scales linearly with level
    pub starting_platform_count: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            x_offset_min: 2,
            x_offset_max: 4,
            x_offset_scale: 1.0,
            camera_delta_threshold: 4.0,
            starting_platform_count: 10,
        }
    }
}

/// Camera scroll and sky tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Upward scroll speed (world units per second)
    pub scroll_speed: f32,
    /// Parallax factor for the mid sky layer
    pub sky2_mult: f32,
    /// Parallax factor for the near sky layer
    pub sky3_mult: f32,
    /// Altitude over which the sky fades to its darkest value
    pub darken_distance: f32,
    /// Channel value the sky color converges to at full altitude
    pub dark_color_value: f32,
    /// Normalized progress per second of the return-to-start tween
    pub return_rate: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 1.0,
            sky2_mult: 0.1,
            sky3_mult: 0.2,
            darken_distance: 50.0,
            dark_color_value: 0.15,
            return_rate: 1.0,
        }
    }
}

/// Complete balance tree
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub camera: CameraTuning,
}

impl Tuning {
    /// Parse a tuning tree from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Fail fast on values the sim cannot run with. Called once at session
    /// construction; a bad config is a wiring bug, not a runtime condition.
    pub fn validate(&self) {
        assert!(
            self.spawn.camera_delta_threshold > 0.0,
            "spawn threshold must be positive"
        );
        assert!(
            self.spawn.x_offset_min < self.spawn.x_offset_max,
            "x offset range must be non-empty"
        );
        assert!(self.player.gravity > 0.0, "gravity must be positive");
        assert!(self.player.jump_power > 0.0, "jump power must be positive");
        assert!(
            self.camera.darken_distance > 0.0,
            "darken distance must be positive"
        );
        assert!(self.camera.return_rate > 0.0, "return rate must be positive");
    }
}
