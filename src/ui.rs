//! Screen layout and the per-frame draw list
//!
//! The simulation never draws. Each frame a renderer receives a [`FrameView`]:
//! everything visible, already in screen space, plus the text-worthy state
//! (phase, score) and the active button.

use serde::Serialize;

use crate::sim::collision::Rect;
use crate::sim::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// RGBA, 0-1 per channel
pub type Color = [f32; 4];

pub const PLAYER_COLOR: Color = [0.0, 100.0 / 255.0, 1.0, 1.0];
pub const PLATFORM_COLOR: Color = [0.0, 200.0 / 255.0, 0.0, 1.0];
pub const BUTTON_COLOR: Color = PLATFORM_COLOR;
pub const MENU_BACKGROUND: Color = [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0];
pub const GAME_BACKGROUND: Color = [1.0, 1.0, 1.0, 1.0];

const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 50.0;
/// Platforms this far outside the screen are not drawn
const CULL_MARGIN: f32 = 50.0;

/// "Game Start" button on the title screen
pub fn start_button(tuning: &Tuning) -> Rect {
    Rect::new(
        tuning.half_width() - BUTTON_WIDTH / 2.0,
        tuning.half_height(),
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// "Restart" button on the game over screen (sits lower, under the score)
pub fn restart_button(tuning: &Tuning) -> Rect {
    start_button(tuning).offset_y(50.0)
}

/// A filled rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawRect {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub score: u32,
    pub background: Color,
    /// Present only while playing
    pub player: Option<DrawRect>,
    /// On-screen platforms while playing
    pub platforms: Vec<DrawRect>,
    /// Start / restart button on the menu and game over screens
    pub button: Option<Button>,
}

/// Build the draw list for the current state
pub fn frame_view(state: &GameState) -> FrameView {
    let tuning = &state.tuning;
    match state.phase {
        GamePhase::Menu => FrameView {
            phase: state.phase,
            score: state.score,
            background: MENU_BACKGROUND,
            player: None,
            platforms: Vec::new(),
            button: Some(Button {
                rect: start_button(tuning),
                label: "Game Start",
            }),
        },
        GamePhase::GameOver => FrameView {
            phase: state.phase,
            score: state.score,
            background: GAME_BACKGROUND,
            player: None,
            platforms: Vec::new(),
            button: Some(Button {
                rect: restart_button(tuning),
                label: "Restart",
            }),
        },
        GamePhase::Playing => {
            let platforms = state
                .platforms
                .iter()
                .map(|(_, p)| p.rect().offset_y(-state.camera.y))
                .filter(|r| r.y > -CULL_MARGIN && r.y < tuning.screen_height + CULL_MARGIN)
                .map(|rect| DrawRect {
                    rect,
                    color: PLATFORM_COLOR,
                })
                .collect();

            FrameView {
                phase: state.phase,
                score: state.score,
                background: GAME_BACKGROUND,
                player: Some(DrawRect {
                    rect: state.player_screen_rect(),
                    color: PLAYER_COLOR,
                }),
                platforms,
                button: None,
            }
        }
    }
}
