//! Fixed-rate control loop
//!
//! One tick per iteration: poll input, step the simulation, hand the
//! finished frame to the renderer, then sleep off the rest of the tick
//! budget. The loop ends when the game stops without a restart.

use crate::platform::{ActivationSource, Clock};
use crate::renderer::{Frame, Renderer};
use crate::sim::{Game, GameEvent, TickInput, tick};

/// Loop options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Let the autopilot flap
    pub idle_mode: bool,
    /// Give up after this many ticks (None = until stopped)
    pub max_ticks: Option<u64>,
}

/// What a finished loop did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub runs_finished: u32,
    pub highest_score: u32,
    pub events: Vec<GameEvent>,
}

/// Drive `game` until it stops for good (or `max_ticks` runs out)
pub fn run<A, C, R>(
    game: &mut Game,
    activation: &mut A,
    clock: &C,
    renderer: &mut R,
    options: &RunOptions,
) -> RunSummary
where
    A: ActivationSource + ?Sized,
    C: Clock + ?Sized,
    R: Renderer + ?Sized,
{
    let budget = game.settings.tick_budget();
    let mut summary = RunSummary::default();

    game.start(clock.now());

    while !game.is_finished() {
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            log::warn!("Tick limit reached, leaving the loop");
            break;
        }

        let tick_start = clock.now();
        let input = TickInput {
            activate: activation.poll_activation(),
            idle_mode: options.idle_mode,
        };
        tick(game, &input, tick_start);
        summary.ticks += 1;
        summary.events.extend(game.drain_events());

        renderer.draw(&Frame::capture(game, tick_start));

        let spent = clock.now() - tick_start;
        clock.sleep(budget - spent);
    }

    summary.runs_finished = game.runs_finished;
    summary.highest_score = game.highest_score;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, NoActivation, ScriptedActivation};
    use crate::settings::Settings;
    use crate::sim::RunState;

    struct CountingRenderer {
        frames: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, _frame: &Frame) {
            self.frames += 1;
        }
    }

    #[test]
    fn test_loop_ends_after_max_runs() {
        let settings = Settings {
            max_runs: Some(1),
            ..Default::default()
        };
        let mut game = Game::with_seed(settings, 11).unwrap();
        let clock = ManualClock::new(0.0);
        let mut renderer = CountingRenderer { frames: 0 };
        let mut activation = ScriptedActivation::new([false, true]);

        let summary = run(
            &mut game,
            &mut activation,
            &clock,
            &mut renderer,
            &RunOptions::default(),
        );

        assert_eq!(game.run_state, RunState::Stopped);
        assert_eq!(summary.runs_finished, 1);
        assert_eq!(renderer.frames as u64, summary.ticks);
        assert!(summary.events.contains(&GameEvent::Started));
        assert!(summary.events.contains(&GameEvent::Stopped { restart: false }));
        // Paced at 30 Hz on the manual clock
        assert!((clock.now() - summary.ticks as f64 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_tick_limit_breaks_endless_session() {
        let mut game = Game::with_seed(Settings::default(), 11).unwrap();
        let clock = ManualClock::new(0.0);
        let mut renderer = CountingRenderer { frames: 0 };
        let options = RunOptions {
            idle_mode: false,
            max_ticks: Some(20),
        };

        let summary = run(&mut game, &mut NoActivation, &clock, &mut renderer, &options);
        assert_eq!(summary.ticks, 20);
        assert_eq!(game.run_state, RunState::WaitingToRun);
    }
}
