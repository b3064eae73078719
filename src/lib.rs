//! Flappy Demo - a side-scrolling tube-dodging game simulation
//!
//! Core modules:
//! - `sim`: Simulation (bird kinematics, tube field, collisions, run state machine)
//! - `renderer`: Per-tick frame snapshot and renderer sinks
//! - `platform`: Clock and activation input contracts
//! - `runner`: Fixed-rate control loop
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Default game configuration constants
pub mod consts {
    /// Target control loop frequency
    pub const FPS: u32 = 30;
    /// Largest dt fed to the simulation in a single tick (seconds)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Visible area dimensions
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 650.0;

    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Tube defaults
    pub const TUBE_WIDTH: f32 = 100.0;
    /// Lower tube height is drawn from [min, max)
    pub const TUBE_HEIGHT_RANGE: (f32, f32) = (100.0, 400.0);
    pub const TUBE_VERTICAL_GAP: f32 = 170.0;
    pub const TUBE_DISTANCE_BETWEEN: f32 = 350.0;
    /// Horizontal pixels per second
    pub const TUBE_VELOCITY: f32 = 200.0;
    /// Tubes spawned each time the field runs short
    pub const TUBE_BATCH: usize = 5;

    /// Bird defaults
    pub const BIRD_WIDTH: f32 = 50.0;
    pub const BIRD_HEIGHT: f32 = 50.0;
    /// Vertical pixels per second at the start of a flap
    pub const BIRD_FLYING_VELOCITY: f32 = 250.0;
    /// Fraction of the base flying speed added per tick (negative: decays)
    pub const BIRD_FLYING_ACCELERATION: f32 = -0.1;
    /// Seconds a single flap keeps the bird rising
    pub const BIRD_FLYING_TIME: f32 = 0.4;
    /// Vertical pixels per second at the start of a fall
    pub const BIRD_FALLING_VELOCITY: f32 = 100.0;
    /// Fraction of the base falling speed added per tick
    pub const BIRD_FALLING_ACCELERATION: f32 = 0.1;

    /// Seconds between game over and the next run becoming available
    pub const RESTART_DELAY: f64 = 3.0;
}
