//! Idle/demo mode flap policy
//!
//! Keeps the bird hovering around the middle of the next gap.

use super::bird::BirdStatus;
use super::collision::nearest_tube_ahead;
use super::state::{Game, RunState};

/// Height the bird should hold right now
pub fn target_height(game: &Game) -> f32 {
    match nearest_tube_ahead(&game.bird, &game.tubes) {
        Some(tube) => tube.gap_center(),
        None => game.ground.top() + game.settings.vertical_budget() / 2.0,
    }
}

/// Whether the autopilot flaps this tick
pub fn wants_flap(game: &Game) -> bool {
    match game.run_state {
        RunState::WaitingToRun => true,
        RunState::Running => {
            let bird = &game.bird;
            !bird.got_hit && bird.status != BirdStatus::Flying && bird.pos.y < target_height(game)
        }
        RunState::WaitingToRestart | RunState::Stopped => false,
    }
}
