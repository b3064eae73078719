//! Collision queries between the bird, the tubes and the ground
//!
//! Stateless: every query takes the objects it looks at by reference.
//! Boxes are axis-aligned; the bird's box is centered on its position.

use super::bird::Bird;
use super::state::Ground;
use super::tube::{Tube, TubeField};

/// First tube (head to tail) the bird has not fully passed yet
pub fn nearest_tube_ahead<'a>(bird: &Bird, tubes: &'a TubeField) -> Option<&'a Tube> {
    tubes.iter().find(|tube| bird.pos.x < tube.right())
}

/// The tube the bird ran into, if any.
///
/// Only the nearest tube ahead is tested.
pub fn bird_hit_tube<'a>(bird: &Bird, tubes: &'a TubeField) -> Option<&'a Tube> {
    let tube = nearest_tube_ahead(bird, tubes)?;
    let bird_box = bird.bounds();

    if bird_box.right() < tube.left() {
        return None;
    }

    if bird_box.bottom() <= tube.gap_bottom() {
        log::debug!("Bird hit lower tube {}", tube.index);
        return Some(tube);
    }

    if bird_box.top() >= tube.gap_top() {
        log::debug!("Bird hit upper tube {}", tube.index);
        return Some(tube);
    }

    None
}

/// Bird's lower edge is at or below the ground surface
pub fn bird_hit_ground(bird: &Bird, ground: &Ground) -> bool {
    bird.bounds().bottom() <= ground.top()
}

/// Bird flew entirely above the visible area
pub fn bird_out_of_bounds(bird: &Bird, canvas_height: f32) -> bool {
    bird.bounds().bottom() > canvas_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    fn setup() -> (Bird, Ground, TubeField) {
        let settings = Settings::default();
        (
            Bird::new(&settings),
            Ground::new(&settings),
            TubeField::new(&settings, 9).unwrap(),
        )
    }

    /// Tube at `x` whose gap spans 250..420
    fn tube_at(index: u32, x: f32) -> Tube {
        Tube::new(
            index,
            Vec2::new(x, 50.0),
            Vec2::new(100.0, 200.0),
            Vec2::new(100.0, 230.0),
            650.0,
        )
    }

    #[test]
    fn test_empty_field_has_no_nearest_and_no_hit() {
        let (bird, _, tubes) = setup();
        assert!(nearest_tube_ahead(&bird, &tubes).is_none());
        assert!(bird_hit_tube(&bird, &tubes).is_none());
    }

    #[test]
    fn test_nearest_skips_passed_tubes() {
        let (bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 300.0)); // right edge 400 < 500
        tubes.push_tube(tube_at(1, 450.0)); // right edge 550 > 500
        tubes.push_tube(tube_at(2, 800.0));
        assert_eq!(nearest_tube_ahead(&bird, &tubes).map(|t| t.index), Some(1));
    }

    #[test]
    fn test_nearest_none_when_all_passed() {
        let (bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 100.0));
        tubes.push_tube(tube_at(1, 300.0));
        assert!(nearest_tube_ahead(&bird, &tubes).is_none());
    }

    #[test]
    fn test_trailing_edge_equal_to_bird_x_counts_as_passed() {
        let (bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 400.0)); // right edge exactly 500
        assert!(nearest_tube_ahead(&bird, &tubes).is_none());
    }

    #[test]
    fn test_bird_in_gap_clears_tube() {
        let (mut bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 525.0)); // left edge meets bird's right edge
        bird.pos.y = 335.0; // box 310..360 inside 250..420
        assert!(bird_hit_tube(&bird, &tubes).is_none());
    }

    #[test]
    fn test_bird_hits_lower_and_upper_tube() {
        let (mut bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 520.0));

        bird.pos.y = 270.0; // bottom 245 <= 250
        assert_eq!(bird_hit_tube(&bird, &tubes).map(|t| t.index), Some(0));

        bird.pos.y = 400.0; // top 425 >= 420
        assert_eq!(bird_hit_tube(&bird, &tubes).map(|t| t.index), Some(0));
    }

    #[test]
    fn test_no_hit_before_reaching_tube() {
        let (mut bird, _, mut tubes) = setup();
        tubes.push_tube(tube_at(0, 600.0));
        bird.pos.y = 100.0;
        assert!(bird_hit_tube(&bird, &tubes).is_none());
    }

    #[test]
    fn test_only_nearest_tube_is_tested() {
        let (mut bird, _, mut tubes) = setup();
        // Nearest tube has a gap at the bird, the next one is a wall but far away
        tubes.push_tube(tube_at(0, 450.0));
        tubes.push_tube(Tube::new(
            1,
            Vec2::new(510.0, 50.0),
            Vec2::new(100.0, 500.0),
            Vec2::new(100.0, 0.0),
            650.0,
        ));
        bird.pos.y = 335.0;
        assert!(bird_hit_tube(&bird, &tubes).is_none());
    }

    #[test]
    fn test_ground_contact() {
        let (mut bird, ground, _) = setup();
        bird.pos.y = ground.pos.y + ground.size.y;
        assert!(bird_hit_ground(&bird, &ground));

        bird.pos.y = 75.0; // resting exactly on top
        assert!(bird_hit_ground(&bird, &ground));

        bird.pos.y = 75.5;
        assert!(!bird_hit_ground(&bird, &ground));
    }

    #[test]
    fn test_out_of_bounds() {
        let (mut bird, _, _) = setup();
        assert!(!bird_out_of_bounds(&bird, 650.0));
        bird.pos.y = 676.0;
        assert!(bird_out_of_bounds(&bird, 650.0));
    }
}
