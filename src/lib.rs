//! Sky Hop - a vertical bounce-platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, camera, platform generation, game state)
//! - `tuning`: Data-driven game balance
//! - `ui`: Button hit regions and the per-frame draw list handed to a renderer
//! - `platform`: Input source / render sink / frame clock seams and the fixed-tick runner

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

/// Default balance constants (the values `Tuning::default()` starts from)
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions (portrait, mobile-like)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Physics, all per-tick quantities
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_STRENGTH: f32 = -20.0;
    pub const ACCELERATION: f32 = 1.5;
    pub const FRICTION: f32 = 0.85;
    pub const MAX_SPEED: f32 = 16.0;

    /// Entity sizes
    pub const PLAYER_SIZE: f32 = 25.0;
    pub const PLATFORM_WIDTH: f32 = 70.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;

    /// Camera deadzone height around screen center
    pub const CAMERA_DEADZONE: f32 = 200.0;
    /// Fraction of the remaining distance the camera covers each tick
    pub const CAMERA_SMOOTH: f32 = 0.08;

    /// Ticks between spawn cycles
    pub const SPAWN_INTERVAL: u32 = 25;
    /// Placement attempts per scattered platform
    pub const SPAWN_ATTEMPTS: u32 = 10;
    /// Two platforms closer than this on both axes overlap
    pub const MIN_GAP_X: f32 = 90.0;
    pub const MIN_GAP_Y: f32 = 60.0;
    /// Only platforms this close to the camera matter for placement
    pub const SPAWN_LOCALITY: f32 = 400.0;

    /// Only platforms this close to the player are collision-tested
    pub const COLLISION_RANGE: f32 = 100.0;
    /// How far below the screen bottom the player may fall before game over
    pub const GAME_OVER_MARGIN: f32 = 200.0;
}
