//! Collision detection and response
//!
//! Axis-aligned rectangles only, resolved in one direction: a player falling
//! onto the top of a platform bounces off it and consumes it. Side and
//! underside contact is ignored so the player passes through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{PlatformArena, PlatformId};
use super::state::Player;
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open point test (left/top edges inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same rectangle shifted vertically (world -> screen)
    #[inline]
    pub fn offset_y(&self, dy: f32) -> Rect {
        Rect {
            y: self.y + dy,
            ..*self
        }
    }
}

/// Bounce the player off the first platform it is landing on this tick
///
/// Only platforms within `collision_range` of the player are tested. A hit
/// requires overlap, downward velocity and the player's top edge above the
/// platform's top edge. On a hit the player is snapped onto the platform,
/// relaunched, and the platform is removed. At most one platform is consumed
/// per call.
pub fn resolve_landing(
    player: &mut Player,
    platforms: &mut PlatformArena,
    tuning: &Tuning,
) -> Option<PlatformId> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let player_rect = player.rect();
    let (id, platform_y) = platforms
        .iter()
        .filter(|(_, p)| (p.pos.y - player.pos.y).abs() < tuning.collision_range)
        .find(|(_, p)| player_rect.intersects(&p.rect()) && player.pos.y < p.pos.y)
        .map(|(id, p)| (id, p.pos.y))?;

    player.pos.y = platform_y - player.size.y;
    player.jump(tuning);
    platforms.remove(id);
    Some(id)
}
