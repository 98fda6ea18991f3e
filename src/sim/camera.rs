//! Deadzone follow camera
//!
//! The camera only picks a new target once the player's on-screen position
//! leaves a band around screen center, then eases toward that target by a
//! fixed fraction every tick. `y` is the world y drawn at the top of the screen.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
    pub target_y: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadzone band in screen space as (top, bottom)
    pub fn deadzone(tuning: &Tuning) -> (f32, f32) {
        let center = tuning.half_height();
        let half = (tuning.camera_deadzone / 2.0).floor();
        (center - half, center + half)
    }

    /// Retarget if the player left the deadzone, then ease toward the target
    pub fn update(&mut self, player_y: f32, tuning: &Tuning) {
        let player_screen_y = player_y - self.y;
        let (top, bottom) = Self::deadzone(tuning);

        if player_screen_y < top {
            self.target_y = player_y - top;
        } else if player_screen_y > bottom {
            self.target_y = player_y - bottom;
        }

        self.y += (self.target_y - self.y) * tuning.camera_smooth;
    }

    #[inline]
    pub fn to_screen_y(&self, world_y: f32) -> f32 {
        world_y - self.y
    }

    /// World y below which platforms can no longer be reached
    pub fn prune_line(&self, tuning: &Tuning) -> f32 {
        let (_, bottom) = Self::deadzone(tuning);
        self.y + bottom + tuning.half_height()
    }
}
