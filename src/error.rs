//! Configuration errors
//!
//! The simulation itself has no failure surface; everything that can go
//! wrong is a bad tuning value caught before a game is built.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    TickRateNotPositive { fps: u32 },
    GapNotPositive { gap: f32 },
    SpacingNotPositive { spacing: f32 },
    NotPositive { field: &'static str, value: f32 },
    InvalidRestartDelay { delay: f64 },
    EmptyHeightRange { min: f32, max: f32 },
    VerticalBudgetExceeded { max_lower: f32, gap: f32, budget: f32 },
    Parse { message: String },
    Read { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickRateNotPositive { fps } => {
                write!(f, "tick rate must be positive, got {fps}")
            }
            Self::GapNotPositive { gap } => {
                write!(f, "tube vertical gap must be positive, got {gap}")
            }
            Self::SpacingNotPositive { spacing } => {
                write!(f, "tube spacing must be positive, got {spacing}")
            }
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::InvalidRestartDelay { delay } => {
                write!(f, "restart delay must be a finite number >= 0, got {delay}")
            }
            Self::EmptyHeightRange { min, max } => {
                write!(f, "tube height range is empty: [{min}, {max})")
            }
            Self::VerticalBudgetExceeded {
                max_lower,
                gap,
                budget,
            } => write!(
                f,
                "tallest lower tube ({max_lower}) plus gap ({gap}) exceeds vertical space {budget}"
            ),
            Self::Parse { message } => write!(f, "invalid settings: {message}"),
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
