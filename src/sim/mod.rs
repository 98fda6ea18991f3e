//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{PlatformArena, PlatformId};
pub use camera::Camera;
pub use collision::{Rect, resolve_landing};
pub use spawn::{seed_initial, spawn_cycle, spawn_line, spawn_scattered};
pub use state::{GameEvent, GamePhase, GameState, Platform, Player};
pub use tick::{TickInput, tick};
