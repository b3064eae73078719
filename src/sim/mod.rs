//! Simulation module
//!
//! All gameplay logic lives here:
//! - Bird kinematics and hit resolution
//! - Tube spawning, scrolling and removal
//! - Collision queries
//! - Run state machine, stepped once per loop iteration
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tube;

pub use bird::{Bird, BirdStatus, Motion, next_status};
pub use collision::{bird_hit_ground, bird_hit_tube, bird_out_of_bounds, nearest_tube_ahead};
pub use rect::Rect;
pub use state::{Game, GameEvent, Ground, RunState};
pub use tick::{TickInput, tick};
pub use tube::{Tube, TubeField};
