//! Per-tick run state machine
//!
//! Each tick measures wall-clock dt since the previous one and dispatches
//! on the run state. Steps are variable length; `max_tick_dt` caps a
//! single step so a stalled loop cannot carry the bird through a tube.
//! Float drift from variable steps is accepted over a session.

use super::autopilot;
use super::bird::BirdStatus;
use super::collision::{bird_out_of_bounds, nearest_tube_ahead};
use super::state::{Game, GameEvent, INFO_CLICK_TO_BEGIN, RunState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// An activation (flap/click) happened since the last tick
    pub activate: bool,
    /// Idle/demo mode - the autopilot flaps
    pub idle_mode: bool,
}

/// Advance the game to wall-clock time `now` (seconds)
pub fn tick(game: &mut Game, input: &TickInput, now: f64) {
    // Not started yet, or done for good
    if game.run_state == RunState::Stopped {
        return;
    }

    let dt = step_dt(game, now);
    let activate = input.activate || (input.idle_mode && autopilot::wants_flap(game));

    match game.run_state {
        RunState::Running => update_running(game, dt, activate, now),
        RunState::WaitingToRestart => update_waiting_to_restart(game, now),
        RunState::WaitingToRun => {
            if activate {
                game.run_state = RunState::Running;
                game.show_info(Some(format!("Best score: {}", game.highest_score)));
                log::info!("Run started (best score {})", game.highest_score);
                game.push_event(GameEvent::Started);
            }
        }
        RunState::Stopped => {}
    }
}

/// Seconds since the previous tick, clamped to `max_tick_dt`
fn step_dt(game: &mut Game, now: f64) -> f32 {
    let dt = match game.last_tick {
        Some(last) => (now - last).max(0.0),
        None => 0.0,
    };
    game.last_tick = Some(now);
    (dt as f32).min(game.settings.max_tick_dt)
}

fn update_running(game: &mut Game, dt: f32, activate: bool, now: f64) {
    if !game.bird.got_hit {
        game.tubes.advance(dt);
        if activate {
            game.push_event(GameEvent::Flapped);
        }
    }

    if let Some(index) = game.bird.update(dt, activate, &game.ground, &game.tubes) {
        log::info!("Bird hit tube {}", index);
        game.push_event(GameEvent::HitTube { index });
    }

    if game.bird.status == BirdStatus::HitGround {
        game.push_event(GameEvent::HitGround);
        game.runs_finished += 1;
        let restart = game
            .settings
            .max_runs
            .is_none_or(|max| game.runs_finished < max);
        game.stop(now, restart);
    }

    if !game.out_of_bounds_seen && bird_out_of_bounds(&game.bird, game.settings.canvas_height) {
        log::warn!("Bird flew above the scene at y = {}", game.bird.pos.y);
        game.out_of_bounds_seen = true;
    }

    let score = nearest_tube_ahead(&game.bird, &game.tubes).map_or(0, |tube| tube.index);
    game.set_score(score);
}

fn update_waiting_to_restart(game: &mut Game, now: f64) {
    let wait = game.settings.restart_delay;
    let elapsed = game.time_since_stop(now).unwrap_or(wait);

    if elapsed >= wait {
        game.reset();
        game.run_state = RunState::WaitingToRun;
        game.show_info(Some(INFO_CLICK_TO_BEGIN.to_string()));
        log::info!("Scene reset, waiting for the next run");
        game.push_event(GameEvent::Restarted);
    } else {
        let remaining = (wait - elapsed.floor()).ceil() as u32;
        game.show_info(Some(format!("Game over ({})", remaining)));
    }
}
