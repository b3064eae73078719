//! Game settings and tuning
//!
//! Every constant the simulation reads lives here so a run can be
//! reproduced from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Loop ===
    /// Target ticks per second
    pub fps: u32,
    /// Cap on a single tick's dt (seconds), guards against stalls
    pub max_tick_dt: f32,
    /// Seconds from game over until the next run can begin
    pub restart_delay: f64,
    /// Stop for good after this many finished runs (None = forever)
    pub max_runs: Option<u32>,

    // === Scene ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_height: f32,

    // === Tubes ===
    pub tube_width: f32,
    pub tube_height_min: f32,
    pub tube_height_max: f32,
    pub tube_vertical_gap: f32,
    pub tube_spacing: f32,
    pub tube_speed: f32,
    pub tube_batch: usize,
    /// RNG seed for tube heights (random if unset)
    pub seed: Option<u64>,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    pub bird_flying_velocity: f32,
    pub bird_flying_acceleration: f32,
    pub bird_flying_time: f32,
    pub bird_falling_velocity: f32,
    pub bird_falling_acceleration: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            max_tick_dt: MAX_TICK_DT,
            restart_delay: RESTART_DELAY,
            max_runs: None,

            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,

            tube_width: TUBE_WIDTH,
            tube_height_min: TUBE_HEIGHT_RANGE.0,
            tube_height_max: TUBE_HEIGHT_RANGE.1,
            tube_vertical_gap: TUBE_VERTICAL_GAP,
            tube_spacing: TUBE_DISTANCE_BETWEEN,
            tube_speed: TUBE_VELOCITY,
            tube_batch: TUBE_BATCH,
            seed: None,

            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            bird_flying_velocity: BIRD_FLYING_VELOCITY,
            bird_flying_acceleration: BIRD_FLYING_ACCELERATION,
            bird_flying_time: BIRD_FLYING_TIME,
            bird_falling_velocity: BIRD_FALLING_VELOCITY,
            bird_falling_acceleration: BIRD_FALLING_ACCELERATION,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Height available between the ground and the top of the canvas
    pub fn vertical_budget(&self) -> f32 {
        self.canvas_height - self.ground_height
    }

    /// Seconds per tick at the target rate
    pub fn tick_budget(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::TickRateNotPositive { fps: self.fps });
        }
        // Negated comparisons so NaN is rejected too
        if !(self.tube_vertical_gap > 0.0) {
            return Err(ConfigError::GapNotPositive {
                gap: self.tube_vertical_gap,
            });
        }
        if !(self.tube_spacing > 0.0) {
            return Err(ConfigError::SpacingNotPositive {
                spacing: self.tube_spacing,
            });
        }
        if !self.restart_delay.is_finite() || self.restart_delay < 0.0 {
            return Err(ConfigError::InvalidRestartDelay {
                delay: self.restart_delay,
            });
        }

        let positive = [
            ("max_tick_dt", self.max_tick_dt),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ground_height", self.ground_height),
            ("tube_width", self.tube_width),
            ("tube_speed", self.tube_speed),
            ("tube_batch", self.tube_batch as f32),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("bird_flying_time", self.bird_flying_time),
            ("bird_flying_velocity", self.bird_flying_velocity),
            ("bird_falling_velocity", self.bird_falling_velocity),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.tube_height_min < 0.0 || self.tube_height_min >= self.tube_height_max {
            return Err(ConfigError::EmptyHeightRange {
                min: self.tube_height_min,
                max: self.tube_height_max,
            });
        }

        let budget = self.vertical_budget();
        if self.tube_height_max + self.tube_vertical_gap > budget {
            return Err(ConfigError::VerticalBudgetExceeded {
                max_lower: self.tube_height_max,
                gap: self.tube_vertical_gap,
                budget,
            });
        }

        Ok(())
    }
}
