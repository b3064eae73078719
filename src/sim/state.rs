//! Game session state
//!
//! One `Game` owns the ground, the tube field and the bird for the whole
//! process session, plus the run state machine bookkeeping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::rect::Rect;
use super::tube::TubeField;
use crate::error::ConfigError;
use crate::settings::Settings;

/// The ground strip along the bottom of the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Ground {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.canvas_width, settings.ground_height),
        }
    }

    /// Surface the bird lands on
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Scene frozen until the player flaps
    WaitingToRun,
    /// Active gameplay
    Running,
    /// Game over countdown before the scene resets
    WaitingToRestart,
    /// No further runs
    #[default]
    Stopped,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    HitTube { index: u32 },
    HitGround,
    ScoreChanged { score: u32 },
    NewBest { score: u32 },
    Stopped { restart: bool },
    Restarted,
}

pub const INFO_CLICK_TO_BEGIN: &str = "Click to begin";

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game {
    pub settings: Settings,
    pub ground: Ground,
    pub tubes: TubeField,
    pub bird: Bird,
    pub run_state: RunState,
    pub score: u32,
    pub highest_score: u32,
    /// Status line shown next to the score
    pub info: Option<String>,
    /// Runs that ended on the ground
    pub runs_finished: u32,
    pub(crate) last_tick: Option<f64>,
    pub(crate) stop_time: Option<f64>,
    pub(crate) out_of_bounds_seen: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Build a session; the RNG seed comes from settings or is drawn at random
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let tubes = TubeField::new(&settings, seed)?;
        log::debug!("New game, tube seed {}", seed);
        Ok(Self {
            ground: Ground::new(&settings),
            bird: Bird::new(&settings),
            tubes,
            settings,
            run_state: RunState::Stopped,
            score: 0,
            highest_score: 0,
            info: None,
            runs_finished: 0,
            last_tick: None,
            stop_time: None,
            out_of_bounds_seen: false,
            events: Vec::new(),
        })
    }

    /// Begin accepting runs. No-op while already running or waiting to run.
    ///
    /// Starting again after the session stopped puts a fresh scene in place.
    pub fn start(&mut self, now: f64) {
        if matches!(self.run_state, RunState::Running | RunState::WaitingToRun) {
            return;
        }
        if self.is_finished() {
            log::info!("Session restarted after a final stop");
            self.reset();
        }
        self.run_state = RunState::WaitingToRun;
        self.last_tick = Some(now);
        self.stop_time = None;
        self.show_info(Some(INFO_CLICK_TO_BEGIN.to_string()));
    }

    /// End the current run. No-op unless running.
    pub fn stop(&mut self, now: f64, restart: bool) {
        if self.run_state != RunState::Running {
            return;
        }
        self.stop_time = Some(now);
        self.run_state = if restart {
            RunState::WaitingToRestart
        } else {
            RunState::Stopped
        };
        log::info!(
            "Run stopped with score {} (best {}){}",
            self.score,
            self.highest_score,
            if restart { ", restarting" } else { "" }
        );
        self.push_event(GameEvent::Stopped { restart });
    }

    /// Fresh bird, empty field, zero score
    pub fn reset(&mut self) {
        self.bird.reset();
        self.tubes.reset();
        self.out_of_bounds_seen = false;
        self.set_score(0);
    }

    /// Apply a newly computed score; only actual changes have side effects
    pub fn set_score(&mut self, score: u32) {
        if self.score == score {
            return;
        }
        self.score = score;
        self.push_event(GameEvent::ScoreChanged { score });
        if score > self.highest_score {
            self.highest_score = score;
            log::info!("New best score: {}", score);
            self.push_event(GameEvent::NewBest { score });
        }
    }

    pub fn show_info(&mut self, text: Option<String>) {
        self.info = text;
    }

    /// Whether a stop without restart has ended the session
    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Stopped && self.last_tick.is_some()
    }

    /// Seconds since the run stopped
    pub fn time_since_stop(&self, now: f64) -> Option<f64> {
        self.stop_time.map(|t| now - t)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
