//! Game balance and screen configuration
//!
//! Every constant the simulation reads lives here so balance changes are data.
//! Tuning can be loaded from JSON; missing fields fall back to the defaults
//! in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration. Raised once at session construction, never mid-tick.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("screen must be positive, got {width}x{height}")]
    NonPositiveScreen { width: f32, height: f32 },
    #[error("screen width {screen_width} cannot fit a {required}px wide entity")]
    ScreenTooNarrow { screen_width: f32, required: f32 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} must be non-zero")]
    Zero { field: &'static str },
    #[error("{field} range is inverted")]
    InvertedRange { field: &'static str },
    #[error("invalid tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,

    // === Player physics ===
    pub gravity: f32,
    /// Vertical velocity set on every bounce (negative is up)
    pub jump_strength: f32,
    pub acceleration: f32,
    /// Horizontal velocity multiplier applied after each move
    pub friction: f32,
    pub max_speed: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    /// Platforms placed above the start platform on reset
    pub seed_count: u32,
    /// Vertical step between seeded platforms
    pub seed_step: f32,

    // === Camera ===
    pub camera_deadzone: f32,
    pub camera_smooth: f32,

    // === Generator ===
    pub spawn_interval: u32,
    pub scatter_min: u32,
    pub scatter_max: u32,
    pub spawn_attempts: u32,
    /// Scattered platforms land in [camera.y - top, camera.y - bottom]
    pub scatter_band_top: f32,
    pub scatter_band_bottom: f32,
    pub min_gap_x: f32,
    pub min_gap_y: f32,
    pub spawn_locality: f32,
    /// A line platform spawns with probability 1 / line_chance
    pub line_chance: u32,
    pub line_band_top: f32,
    pub line_band_bottom: f32,
    /// Reject a line row if any nearby platform is vertically closer than this
    pub line_conflict_y: f32,
    /// Line platforms sit at center ± this many pixels
    pub line_jitter: i32,

    // === Rules ===
    pub collision_range: f32,
    pub game_over_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,

            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            seed_count: 6,
            seed_step: 100.0,

            camera_deadzone: CAMERA_DEADZONE,
            camera_smooth: CAMERA_SMOOTH,

            spawn_interval: SPAWN_INTERVAL,
            scatter_min: 2,
            scatter_max: 3,
            spawn_attempts: SPAWN_ATTEMPTS,
            scatter_band_top: 350.0,
            scatter_band_bottom: 80.0,
            min_gap_x: MIN_GAP_X,
            min_gap_y: MIN_GAP_Y,
            spawn_locality: SPAWN_LOCALITY,
            line_chance: 6,
            line_band_top: 250.0,
            line_band_bottom: 120.0,
            line_conflict_y: 40.0,
            line_jitter: 80,

            collision_range: COLLISION_RANGE,
            game_over_margin: GAME_OVER_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("gravity", self.gravity),
            ("jump_strength", self.jump_strength),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("max_speed", self.max_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("seed_step", self.seed_step),
            ("camera_deadzone", self.camera_deadzone),
            ("camera_smooth", self.camera_smooth),
            ("scatter_band_top", self.scatter_band_top),
            ("scatter_band_bottom", self.scatter_band_bottom),
            ("min_gap_x", self.min_gap_x),
            ("min_gap_y", self.min_gap_y),
            ("spawn_locality", self.spawn_locality),
            ("line_band_top", self.line_band_top),
            ("line_band_bottom", self.line_band_bottom),
            ("line_conflict_y", self.line_conflict_y),
            ("collision_range", self.collision_range),
            ("game_over_margin", self.game_over_margin),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite { field });
        }

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(TuningError::NonPositiveScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        let widest = self.platform_width.max(self.player_width);
        if self.screen_width < widest {
            return Err(TuningError::ScreenTooNarrow {
                screen_width: self.screen_width,
                required: widest,
            });
        }

        check_range("gravity", self.gravity, f32::EPSILON, f32::MAX)?;
        check_range("jump_strength", self.jump_strength, f32::MIN, -f32::EPSILON)?;
        check_range("friction", self.friction, 0.0, 1.0)?;
        check_range("camera_smooth", self.camera_smooth, f32::EPSILON, 1.0)?;
        check_range("camera_deadzone", self.camera_deadzone, 0.0, self.screen_height)?;
        check_range("max_speed", self.max_speed, f32::EPSILON, f32::MAX)?;
        check_range("acceleration", self.acceleration, 0.0, f32::MAX)?;
        check_range("player_width", self.player_width, f32::EPSILON, f32::MAX)?;
        check_range("player_height", self.player_height, f32::EPSILON, f32::MAX)?;
        check_range("platform_width", self.platform_width, f32::EPSILON, f32::MAX)?;
        check_range("platform_height", self.platform_height, f32::EPSILON, f32::MAX)?;
        check_range("collision_range", self.collision_range, 0.0, f32::MAX)?;
        check_range("spawn_locality", self.spawn_locality, 0.0, f32::MAX)?;
        check_range("seed_step", self.seed_step, 0.0, f32::MAX)?;
        check_range("min_gap_x", self.min_gap_x, 0.0, f32::MAX)?;
        check_range("min_gap_y", self.min_gap_y, 0.0, f32::MAX)?;
        check_range("line_conflict_y", self.line_conflict_y, 0.0, f32::MAX)?;
        check_range("game_over_margin", self.game_over_margin, 0.0, f32::MAX)?;

        if self.tick_rate == 0 {
            return Err(TuningError::Zero { field: "tick_rate" });
        }
        if self.spawn_interval == 0 {
            return Err(TuningError::Zero {
                field: "spawn_interval",
            });
        }
        if self.spawn_attempts == 0 {
            return Err(TuningError::Zero {
                field: "spawn_attempts",
            });
        }
        if self.line_chance == 0 {
            return Err(TuningError::Zero {
                field: "line_chance",
            });
        }
        if self.line_jitter < 0 {
            return Err(TuningError::InvertedRange {
                field: "line_jitter",
            });
        }
        if self.scatter_min > self.scatter_max {
            return Err(TuningError::InvertedRange {
                field: "scatter_min..scatter_max",
            });
        }
        if self.scatter_band_top < self.scatter_band_bottom {
            return Err(TuningError::InvertedRange {
                field: "scatter_band",
            });
        }
        if self.line_band_top < self.line_band_bottom {
            return Err(TuningError::InvertedRange { field: "line_band" });
        }

        Ok(())
    }

    /// Integer half of the screen width, as the layout math expects
    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.screen_width / 2.0).floor()
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.screen_height / 2.0).floor()
    }

    /// Largest x a platform may occupy and still be fully on screen
    #[inline]
    pub fn max_platform_x(&self) -> f32 {
        self.screen_width - self.platform_width
    }

    /// Player spawn point on reset
    pub fn player_start(&self) -> (f32, f32) {
        (
            self.half_width() - (self.player_width / 2.0).floor(),
            self.screen_height - 150.0,
        )
    }

    /// Start platform, centered below the player spawn
    pub fn start_platform(&self) -> (f32, f32) {
        (
            self.half_width() - (self.platform_width / 2.0).floor(),
            self.screen_height - 80.0,
        )
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    if value < min || value > max {
        return Err(TuningError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
