//! Frame snapshots for renderers
//!
//! Everything a renderer needs to draw one tick, copied out of the game
//! so the sink never touches live simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BirdStatus, Game, Rect, RunState};

/// Lower and upper tube rectangles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TubeShape {
    pub index: u32,
    pub lower: Rect,
    pub upper: Rect,
}

/// The bird is drawn as a sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdShape {
    pub center: Vec2,
    pub radius: f32,
    pub status: BirdStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Simulation time of the tick (seconds)
    pub time: f64,
    pub ground: Rect,
    pub tubes: Vec<TubeShape>,
    pub bird: BirdShape,
    pub score: u32,
    pub highest_score: u32,
    pub info: Option<String>,
    pub run_state: RunState,
}

impl Frame {
    pub fn capture(game: &Game, time: f64) -> Self {
        let tubes = game
            .tubes
            .iter()
            .map(|tube| TubeShape {
                index: tube.index,
                lower: tube.lower,
                upper: tube.upper,
            })
            .collect();

        Self {
            time,
            ground: game.ground.rect(),
            tubes,
            bird: BirdShape {
                center: game.bird.pos,
                radius: game.bird.size.x / 2.0,
                status: game.bird.status,
            },
            score: game.score,
            highest_score: game.highest_score,
            info: game.info.clone(),
            run_state: game.run_state,
        }
    }

    /// Short status text, e.g. "score 3 | falling | Best score: 5"
    pub fn status_line(&self) -> String {
        let mut line = format!("score {} | {}", self.score, self.bird.status.as_str());
        if let Some(info) = &self.info {
            line.push_str(" | ");
            line.push_str(info);
        }
        line
    }
}
