//! Fixed timestep simulation tick
//!
//! Drives the Menu -> Playing -> GameOver -> Playing cycle and advances the
//! physics exactly once per tick while playing.

use glam::Vec2;

use super::autopilot;
use super::collision::resolve_landing;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::ui;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Start key pressed this tick
    pub start: bool,
    /// Any non-quit key pressed this tick
    pub any_key: bool,
    /// Pointer press position this tick (screen space)
    pub click: Option<Vec2>,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    fn clicked(&self, rect: &super::collision::Rect) -> bool {
        self.click.is_some_and(|p| rect.contains(p))
    }
}

/// Advance the session by one tick
///
/// A tick that changes phase does nothing else, so a new run begins exactly
/// at its start position.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu => {
            if input.start || input.clicked(&ui::start_button(&state.tuning)) {
                state.start();
                events.push(GameEvent::Started);
            }
        }
        GamePhase::GameOver => {
            let restart = input.start
                || input.any_key
                || input.clicked(&ui::restart_button(&state.tuning));
            if restart {
                state.start();
                events.push(GameEvent::Started);
            }
        }
        GamePhase::Playing => step_playing(state, input, &mut events),
    }

    events
}

fn step_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;
    let tuning = &state.tuning;

    if input.left {
        state.player.move_left(tuning);
    }
    if input.right {
        state.player.move_right(tuning);
    }

    state.player.update(tuning);
    state.camera.update(state.player.pos.y, tuning);

    // The rest of this tick still runs; physics freezes from the next one
    let fall_line = state.camera.y + tuning.screen_height + tuning.game_over_margin;
    if state.player.pos.y > fall_line {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::GameOver { score: state.score });
    }

    if let Some(platform) = resolve_landing(&mut state.player, &mut state.platforms, tuning) {
        state.score += 1;
        events.push(GameEvent::Bounced {
            platform,
            score: state.score,
        });
    }

    state.spawn_timer += 1;
    if state.spawn_timer >= tuning.spawn_interval {
        spawn::spawn_cycle(&mut state.platforms, state.camera.y, tuning, &mut state.rng);
        state.spawn_timer = 0;
    }

    let prune_line = state.camera.prune_line(tuning);
    let pruned = state.platforms.retain(|p| p.pos.y < prune_line);
    if pruned > 0 {
        log::trace!("Pruned {} platforms below y {:.1}", pruned, prune_line);
    }
}
