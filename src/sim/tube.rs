//! Tubes and the scrolling tube field
//!
//! The field is a queue: tubes are appended at the tail (right) and
//! removed from the head (left), so index order and x order always agree.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::ConfigError;
use crate::settings::Settings;

/// A lower/upper pair of tubes with a vertical gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tube {
    pub index: u32,
    pub lower: Rect,
    pub upper: Rect,
}

impl Tube {
    /// Lower tube stands on the ground at `pos`, upper tube hangs from the canvas top
    pub fn new(index: u32, pos: Vec2, lower_size: Vec2, upper_size: Vec2, canvas_height: f32) -> Self {
        let upper_pos = Vec2::new(pos.x, canvas_height - upper_size.y);
        Self {
            index,
            lower: Rect::new(pos, lower_size),
            upper: Rect::new(upper_pos, upper_size),
        }
    }

    /// Lower-left corner of the lower tube
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.lower.pos
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.lower.left()
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.lower.right()
    }

    /// Top of the lower tube
    pub fn gap_bottom(&self) -> f32 {
        self.lower.top()
    }

    /// Bottom of the upper tube
    pub fn gap_top(&self) -> f32 {
        self.upper.bottom()
    }

    pub fn vertical_gap(&self) -> f32 {
        self.upper.pos.y - self.lower.pos.y - self.lower.size.y
    }

    pub fn gap_center(&self) -> f32 {
        (self.gap_bottom() + self.gap_top()) / 2.0
    }

    pub fn translate_x(&mut self, dx: f32) {
        self.lower.translate_x(dx);
        self.upper.translate_x(dx);
    }
}

/// Owns the live tubes; spawns ahead, scrolls left, drops what left the scene
#[derive(Debug, Clone)]
pub struct TubeField {
    tubes: VecDeque<Tube>,
    rng: Pcg32,
    next_index: u32,
    width: f32,
    height_range: (f32, f32),
    vertical_gap: f32,
    spacing: f32,
    speed: f32,
    batch: usize,
    canvas_width: f32,
    canvas_height: f32,
    ground_height: f32,
}

impl TubeField {
    /// Create an empty field; tunings are validated here rather than per spawn
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            tubes: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_index: 0,
            width: settings.tube_width,
            height_range: (settings.tube_height_min, settings.tube_height_max),
            vertical_gap: settings.tube_vertical_gap,
            spacing: settings.tube_spacing,
            speed: settings.tube_speed,
            batch: settings.tube_batch,
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            ground_height: settings.ground_height,
        })
    }

    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }

    /// Head-to-tail (increasing x)
    pub fn iter(&self) -> impl Iterator<Item = &Tube> {
        self.tubes.iter()
    }

    pub fn first(&self) -> Option<&Tube> {
        self.tubes.front()
    }

    pub fn last(&self) -> Option<&Tube> {
        self.tubes.back()
    }

    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    /// Space a tube pair plus its gap must fill
    pub fn vertical_budget(&self) -> f32 {
        self.canvas_height - self.ground_height
    }

    fn random_tube_height(&mut self) -> f32 {
        self.rng.random_range(self.height_range.0..self.height_range.1)
    }

    /// Append `count` tubes to the tail
    pub fn add_tubes(&mut self, count: usize) {
        log::debug!("Adding {} tube(s) at the tail", count);
        for _ in 0..count {
            let x = match self.tubes.back() {
                Some(last) => last.left() + self.spacing,
                None => self.canvas_width,
            };
            let lower_h = self.random_tube_height();
            let upper_h = self.vertical_budget() - lower_h - self.vertical_gap;

            let tube = Tube::new(
                self.next_index,
                Vec2::new(x, self.ground_height),
                Vec2::new(self.width, lower_h),
                Vec2::new(self.width, upper_h),
                self.canvas_height,
            );
            self.next_index += 1;
            self.tubes.push_back(tube);
        }
    }

    /// Spawn a batch when empty or when the tail has scrolled into view
    pub fn spawn_if_needed(&mut self) {
        let needs_more = match self.tubes.back() {
            None => true,
            Some(last) => last.right() < self.canvas_width,
        };
        if needs_more {
            self.add_tubes(self.batch);
        }
    }

    /// Drop head tubes whose trailing edge has left the scene
    pub fn despawn_offscreen(&mut self) {
        while let Some(first) = self.tubes.front() {
            if first.right() >= 0.0 {
                break;
            }
            log::debug!("Removing tube {} from the head", first.index);
            self.tubes.pop_front();
        }
    }

    /// Move every tube left at the constant field speed
    pub fn scroll(&mut self, dt: f32) {
        let dx = -dt * self.speed;
        for tube in &mut self.tubes {
            tube.translate_x(dx);
        }
    }

    /// Spawn, despawn, then move - in that order
    pub fn advance(&mut self, dt: f32) {
        self.spawn_if_needed();
        self.despawn_offscreen();
        self.scroll(dt);
    }

    /// Remove every tube and restart indices at 0
    pub fn reset(&mut self) {
        self.tubes.clear();
        self.next_index = 0;
    }

    #[cfg(test)]
    pub(crate) fn push_tube(&mut self, tube: Tube) {
        self.next_index = tube.index + 1;
        self.tubes.push_back(tube);
    }
}
