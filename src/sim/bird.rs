//! Bird kinematics
//!
//! Two speed accumulators, one for flying (after a flap) and one for
//! falling. Only the one matching the current status moves the bird, and
//! any status change puts both back at their base speeds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::rect::Rect;
use super::state::Ground;
use super::tube::TubeField;
use crate::settings::Settings;

/// What the bird is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BirdStatus {
    /// Fresh run, nothing has happened yet
    #[default]
    Idle,
    /// Rising after a flap
    Flying,
    /// Gravity-driven descent
    Falling,
    HitTube,
    HitGround,
}

impl BirdStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, BirdStatus::HitTube | BirdStatus::HitGround)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BirdStatus::Idle => "idle",
            BirdStatus::Flying => "flying",
            BirdStatus::Falling => "falling",
            BirdStatus::HitTube => "hit_tube",
            BirdStatus::HitGround => "hit_ground",
        }
    }
}

/// Motion regime picked for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Fly,
    Fall,
}

/// Status after applying `motion`.
///
/// A bird that has been hit keeps its hit status while it drops.
pub fn next_status(current: BirdStatus, got_hit: bool, motion: Motion) -> BirdStatus {
    if got_hit && current.is_hit() {
        return current;
    }
    match motion {
        Motion::Fly => BirdStatus::Flying,
        Motion::Fall => BirdStatus::Falling,
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BirdStatus,
    pub got_hit: bool,
    /// Seconds since the last flap
    pub flying_time: f32,
    pub current_flying_velocity: f32,
    pub current_falling_velocity: f32,

    flying_velocity: f32,
    flying_acceleration: f32,
    flying_duration: f32,
    falling_velocity: f32,
    falling_acceleration: f32,
    home: Vec2,
}

impl Bird {
    pub fn new(settings: &Settings) -> Self {
        let home = Vec2::new(settings.canvas_width / 2.0, settings.canvas_height / 2.0);
        let mut bird = Self {
            pos: home,
            size: Vec2::new(settings.bird_width, settings.bird_height),
            status: BirdStatus::Idle,
            got_hit: false,
            flying_time: 0.0,
            current_flying_velocity: settings.bird_flying_velocity,
            current_falling_velocity: settings.bird_falling_velocity,
            flying_velocity: settings.bird_flying_velocity,
            flying_acceleration: settings.bird_flying_acceleration,
            flying_duration: settings.bird_flying_time,
            falling_velocity: settings.bird_falling_velocity,
            falling_acceleration: settings.bird_falling_acceleration,
            home,
        };
        bird.reset();
        bird
    }

    /// Back to the center of the scene, unhurt and idle
    pub fn reset(&mut self) {
        self.status = BirdStatus::Idle;
        self.got_hit = false;
        self.flying_time = 0.0;
        self.current_flying_velocity = self.flying_velocity;
        self.current_falling_velocity = self.falling_velocity;
        self.pos = self.home;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    fn inc_speed(velocity: f32, base: f32, acceleration: f32) -> f32 {
        velocity + base * acceleration
    }

    fn set_status(&mut self, status: BirdStatus) {
        if self.status != status {
            log::debug!("Bird status: {} -> {}", self.status.as_str(), status.as_str());
            self.status = status;
            self.current_flying_velocity = self.flying_velocity;
            self.current_falling_velocity = self.falling_velocity;
        }
    }

    fn fly(&mut self, dt: f32, flap: bool) {
        self.set_status(next_status(self.status, self.got_hit, Motion::Fly));
        let mut velocity = self.current_flying_velocity;
        if flap {
            self.flying_time = 0.0;
            velocity = self.flying_velocity;
        }
        velocity = Self::inc_speed(velocity, self.flying_velocity, self.flying_acceleration);
        self.pos.y += dt * velocity;
        self.flying_time += dt;
        self.current_flying_velocity = velocity;
    }

    fn fall(&mut self, dt: f32) {
        self.set_status(next_status(self.status, self.got_hit, Motion::Fall));
        let velocity = Self::inc_speed(
            self.current_falling_velocity,
            self.falling_velocity,
            self.falling_acceleration,
        );
        self.pos.y -= dt * velocity;
        self.current_falling_velocity = velocity;
    }

    /// Regime for this tick given the flap input
    pub fn motion_for(&self, flap: bool) -> Motion {
        if self.got_hit {
            return Motion::Fall;
        }
        let still_rising =
            self.status == BirdStatus::Flying && self.flying_time < self.flying_duration;
        if flap || still_rising {
            Motion::Fly
        } else {
            Motion::Fall
        }
    }

    /// Snap onto the ground surface so the bird never sinks into it
    pub fn rest_on(&mut self, ground: &Ground) {
        self.pos.y = ground.top() + self.size.y / 2.0;
    }

    /// Advance one tick, then resolve tube and ground hits.
    ///
    /// Returns the index of the tube hit this tick, if any.
    pub fn update(&mut self, dt: f32, flap: bool, ground: &Ground, tubes: &TubeField) -> Option<u32> {
        match self.motion_for(flap) {
            Motion::Fly => self.fly(dt, flap),
            Motion::Fall => self.fall(dt),
        }

        let mut hit_tube = None;
        if !self.got_hit {
            if let Some(tube) = collision::bird_hit_tube(self, tubes) {
                self.set_status(BirdStatus::HitTube);
                self.got_hit = true;
                hit_tube = Some(tube.index);
            }
        }

        // Ground always wins over a tube hit in the same tick
        if collision::bird_hit_ground(self, ground) {
            self.set_status(BirdStatus::HitGround);
            self.got_hit = true;
            self.rest_on(ground);
        }

        hit_tube
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tube::Tube;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 30.0;

    fn setup() -> (Bird, Ground, TubeField) {
        let settings = Settings::default();
        (
            Bird::new(&settings),
            Ground::new(&settings),
            TubeField::new(&settings, 1).unwrap(),
        )
    }

    #[test]
    fn test_reset_centers_bird() {
        let (mut bird, ground, tubes) = setup();
        bird.update(DT, true, &ground, &tubes);
        bird.reset();
        assert_eq!(bird.pos, Vec2::new(500.0, 325.0));
        assert_eq!(bird.status, BirdStatus::Idle);
        assert!(!bird.got_hit);
        assert_eq!(bird.current_flying_velocity, 250.0);
        assert_eq!(bird.current_falling_velocity, 100.0);
    }

    #[test]
    fn test_flap_rises_with_decaying_speed() {
        let (mut bird, ground, tubes) = setup();
        let y0 = bird.pos.y;
        bird.update(DT, true, &ground, &tubes);
        assert_eq!(bird.status, BirdStatus::Flying);
        // 250 + 250 * -0.1
        assert!((bird.current_flying_velocity - 225.0).abs() < 1e-4);
        assert!((bird.pos.y - (y0 + 225.0 * DT)).abs() < 1e-3);

        bird.update(DT, false, &ground, &tubes);
        assert!((bird.current_flying_velocity - 200.0).abs() < 1e-4);
        assert!((bird.flying_time - 2.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_new_flap_overrides_decay() {
        let (mut bird, ground, tubes) = setup();
        bird.update(DT, true, &ground, &tubes);
        bird.update(DT, false, &ground, &tubes);
        bird.update(DT, true, &ground, &tubes);
        assert!((bird.current_flying_velocity - 225.0).abs() < 1e-4);
        assert!((bird.flying_time - DT).abs() < 1e-6);
    }

    #[test]
    fn test_flight_expires_into_single_fall_transition() {
        let (mut bird, ground, tubes) = setup();
        bird.update(0.1, true, &ground, &tubes);

        let mut transitions = 0;
        let mut previous = bird.status;
        for _ in 0..6 {
            bird.update(0.1, false, &ground, &tubes);
            if previous == BirdStatus::Flying && bird.status == BirdStatus::Falling {
                transitions += 1;
                // Reset to base, then one increment
                assert!((bird.current_falling_velocity - 110.0).abs() < 1e-4);
            }
            previous = bird.status;
        }
        assert_eq!(transitions, 1);
        assert_eq!(bird.status, BirdStatus::Falling);
    }

    #[test]
    fn test_fall_speed_accumulates() {
        let (mut bird, ground, tubes) = setup();
        bird.update(DT, false, &ground, &tubes);
        bird.update(DT, false, &ground, &tubes);
        bird.update(DT, false, &ground, &tubes);
        assert!((bird.current_falling_velocity - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_hit_ground_snaps_on_surface() {
        let (mut bird, ground, tubes) = setup();
        bird.pos.y = 60.0;
        bird.update(DT, false, &ground, &tubes);
        assert_eq!(bird.status, BirdStatus::HitGround);
        assert!(bird.got_hit);
        assert_eq!(bird.pos.y, 75.0);
    }

    #[test]
    fn test_ground_correction_is_idempotent() {
        let (mut bird, ground, _) = setup();
        bird.pos.y = 10.0;
        bird.rest_on(&ground);
        let y = bird.pos.y;
        bird.rest_on(&ground);
        assert_eq!(bird.pos.y, y);
    }

    #[test]
    fn test_hit_tube_and_flaps_ignored() {
        let (mut bird, ground, mut tubes) = setup();
        let settings = Settings::default();
        // Lower tube reaches well above the bird
        tubes.push_tube(Tube::new(
            0,
            Vec2::new(490.0, 50.0),
            Vec2::new(100.0, 400.0),
            Vec2::new(100.0, 30.0),
            settings.canvas_height,
        ));
        let hit = bird.update(DT, false, &ground, &tubes);
        assert_eq!(hit, Some(0));
        assert_eq!(bird.status, BirdStatus::HitTube);

        let y = bird.pos.y;
        bird.update(DT, true, &ground, &tubes);
        assert!(bird.pos.y < y);
        assert_eq!(bird.status, BirdStatus::HitTube);
    }

    #[test]
    fn test_next_status() {
        assert_eq!(
            next_status(BirdStatus::Idle, false, Motion::Fly),
            BirdStatus::Flying
        );
        assert_eq!(
            next_status(BirdStatus::Flying, false, Motion::Fall),
            BirdStatus::Falling
        );
        assert_eq!(
            next_status(BirdStatus::HitTube, true, Motion::Fall),
            BirdStatus::HitTube
        );
    }

    proptest! {
        #[test]
        fn prop_hit_bird_never_flies_again(flaps in prop::collection::vec(any::<bool>(), 1..60)) {
            let (mut bird, ground, tubes) = setup();
            bird.pos.y = 76.0;
            bird.update(DT, false, &ground, &tubes);
            prop_assert!(bird.got_hit);
            for flap in flaps {
                bird.update(DT, flap, &ground, &tubes);
                prop_assert_ne!(bird.status, BirdStatus::Flying);
                prop_assert!(bird.pos.y >= ground.top() + bird.size.y / 2.0);
            }
        }
    }
}
