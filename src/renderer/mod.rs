//! Rendering sinks
//!
//! Drawing is external: the loop hands a `Frame` to a `Renderer` once per
//! tick after the tick's state is final. Two headless sinks ship here.

pub mod frame;

use std::io::Write;

pub use frame::{BirdShape, Frame, TubeShape};

/// Receives one frame per tick
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Logs status text changes instead of drawing
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_info: Option<String>,
    last_score: u32,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        if frame.info != self.last_info {
            if let Some(info) = &frame.info {
                log::info!("{}", info);
            }
            self.last_info = frame.info.clone();
        }
        if frame.score != self.last_score {
            log::debug!("Score: {}", frame.score);
            self.last_score = frame.score;
        }
        log::trace!(
            "t={:.3} bird=({:.1}, {:.1}) tubes={} {}",
            frame.time,
            frame.bird.center.x,
            frame.bird.center.y,
            frame.tubes.len(),
            frame.status_line()
        );
    }
}

/// Writes each frame as one JSON line
pub struct JsonRenderer<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn draw(&mut self, frame: &Frame) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            log::warn!("Frame output failed, disabling JSON renderer: {}", e);
            self.failed = true;
        }
    }
}
