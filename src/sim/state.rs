//! Game state and core simulation types
//!
//! A `GameState` is one complete session: everything a reset recreates lives
//! here, along with the tuning it was built from and the RNG that feeds the
//! platform generator.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{PlatformArena, PlatformId};
use super::camera::Camera;
use super::collision::Rect;
use super::spawn;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began (from the menu or after game over)
    Started,
    /// Player bounced off a platform, consuming it
    Bounced { platform: PlatformId, score: u32 },
    /// Player fell out of view
    GameOver { score: u32 },
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Integrate one tick
    ///
    /// Horizontal moves with the pre-friction velocity, then friction decays
    /// it. Vertical applies gravity first, then moves. The asymmetry is part
    /// of the game feel.
    pub fn update(&mut self, tuning: &Tuning) {
        self.pos.x += self.vel.x;
        self.vel.x *= tuning.friction;

        let max_x = tuning.screen_width - self.size.x;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }

        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;
    }

    pub fn move_left(&mut self, tuning: &Tuning) {
        self.vel.x = (self.vel.x - tuning.acceleration).max(-tuning.max_speed);
    }

    pub fn move_right(&mut self, tuning: &Tuning) {
        self.vel.x = (self.vel.x + tuning.acceleration).min(tuning.max_speed);
    }

    pub fn jump(&mut self, tuning: &Tuning) {
        self.vel.y = tuning.jump_strength;
    }
}

/// A platform (immutable once placed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_tuning(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self::new(x, y, tuning.platform_width, tuning.platform_height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (0 for injected generators)
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub camera: Camera,
    pub platforms: PlatformArena,
    /// Successful bounces this run
    pub score: u32,
    /// Ticks since the last spawn cycle
    pub spawn_timer: u32,
    /// Playing ticks this run
    pub time_ticks: u64,
    /// Platform generator randomness. Survives resets so each run differs.
    pub rng: Pcg32,
}

impl GameState {
    /// Create a session in the menu phase with a seeded generator
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        let mut state = Self::with_rng(tuning, Pcg32::seed_from_u64(seed))?;
        state.seed = seed;
        Ok(state)
    }

    /// Create a session around an injected generator
    pub fn with_rng(tuning: Tuning, rng: Pcg32) -> Result<Self, TuningError> {
        tuning.validate()?;

        let (x, y) = tuning.player_start();
        let mut state = Self {
            seed: 0,
            player: Player::new(x, y, &tuning),
            tuning,
            phase: GamePhase::Menu,
            camera: Camera::new(),
            platforms: PlatformArena::new(),
            score: 0,
            spawn_timer: 0,
            time_ticks: 0,
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Throw away the current run and lay out a fresh one
    ///
    /// Phase is left alone; callers decide whether the new run is playing.
    pub fn reset(&mut self) {
        let (x, y) = self.tuning.player_start();
        self.player = Player::new(x, y, &self.tuning);
        self.camera = Camera::new();
        self.platforms.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.time_ticks = 0;

        let seeded = spawn::seed_initial(&mut self.platforms, &self.tuning, &mut self.rng);
        log::debug!("Session reset: {} platforms seeded", seeded);
    }

    /// Reset and enter the playing phase
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Run started");
    }

    /// Player rectangle in screen space
    pub fn player_screen_rect(&self) -> Rect {
        let rect = self.player.rect();
        Rect {
            y: self.camera.to_screen_y(rect.y),
            ..rect
        }
    }
}
