//! Idle/demo mode steering
//!
//! Picks a platform to land on and holds left/right toward it. Good enough to
//! climb for a while; it makes no attempt to be optimal.

use super::state::{GamePhase, GameState, Platform};
use super::tick::TickInput;

/// Horizontal error (px) tolerated before steering
const DEADBAND: f32 = 6.0;
/// Ticks of current horizontal velocity to lead the aim by
const LEAD_TICKS: f32 = 4.0;

/// Overwrite `input` with the autopilot's choices for this tick
pub fn drive(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::GameOver => input.any_key = true,
        GamePhase::Playing => {
            let (left, right) = steer(state);
            input.left = left;
            input.right = right;
        }
    }
}

/// Platform the player should aim for, if any is in reach
pub fn pick_target(state: &GameState) -> Option<&Platform> {
    let player = &state.player;
    let tuning = &state.tuning;
    let feet = player.pos.y + player.size.y;

    // Highest point of the current arc
    let apex = if player.vel.y < 0.0 {
        player.pos.y - player.vel.y * player.vel.y / (2.0 * tuning.gravity)
    } else {
        player.pos.y
    };

    let below_feet = |p: &&Platform| p.pos.y >= feet;
    let platforms = state.platforms.iter().map(|(_, p)| p);

    if player.vel.y < 0.0 {
        // Rising: the highest platform the arc still clears
        platforms
            .filter(|p| p.pos.y > apex + player.size.y)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    } else {
        // Falling: the nearest platform underneath
        platforms
            .filter(below_feet)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }
}

fn steer(state: &GameState) -> (bool, bool) {
    let Some(target) = pick_target(state) else {
        return (false, false);
    };
    let player = &state.player;

    let aim = target.pos.x + target.size.x / 2.0;
    let predicted = player.pos.x + player.size.x / 2.0 + player.vel.x * LEAD_TICKS;
    let error = aim - predicted;

    if error < -DEADBAND {
        (true, false)
    } else if error > DEADBAND {
        (false, true)
    } else {
        (false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 21).unwrap();
        state.start();
        state.platforms.clear();
        state
    }

    #[test]
    fn test_starts_from_menus() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.start);

        state.phase = GamePhase::GameOver;
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.any_key);
    }

    #[test]
    fn test_falling_targets_nearest_below() {
        let mut state = playing_state();
        state.player.pos.y = 100.0;
        state.player.vel.y = 3.0;
        let tuning = state.tuning.clone();
        state.platforms.insert(Platform::from_tuning(10.0, 300.0, &tuning));
        state.platforms.insert(Platform::from_tuning(250.0, 180.0, &tuning));
        state.platforms.insert(Platform::from_tuning(100.0, 50.0, &tuning));

        let target = pick_target(&state).unwrap();
        assert_eq!(target.pos.y, 180.0);

        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_rising_targets_highest_reachable() {
        let mut state = playing_state();
        state.player.pos.y = 500.0;
        state.player.vel.y = -20.0;
        let tuning = state.tuning.clone();
        // Apex is about 222px up, at y ~278
        state.platforms.insert(Platform::from_tuning(0.0, 200.0, &tuning));
        state.platforms.insert(Platform::from_tuning(0.0, 350.0, &tuning));
        state.platforms.insert(Platform::from_tuning(0.0, 450.0, &tuning));

        assert_eq!(pick_target(&state).unwrap().pos.y, 350.0);

        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_no_target_no_keys() {
        let state = playing_state();
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(!input.left && !input.right);
    }
}
