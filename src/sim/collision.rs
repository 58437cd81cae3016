//! Collision engine
//!
//! Runs the per-tick checks in a fixed order: obstacles, then the snake's own
//! body, then the apple. The first fatal hit wins so a tick can trigger at
//! most one reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, GeometryError, Shape, overlaps};
use super::trail::TrailStore;
use crate::settings::Settings;

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalCause {
    /// Index into the obstacle list
    Obstacle(usize),
    /// Body segment this many trail entries behind the head
    SelfBody { age: usize },
}

/// Result of the collision checks for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    None,
    Fatal(FatalCause),
    Pickup,
}

/// Collision circle of a segment whose top-left corner is `pos`
#[inline]
pub fn segment_circle(pos: Vec2, size: f32) -> Circle {
    let radius = size / 2.0;
    Circle::new(pos + Vec2::splat(radius), radius)
}

/// Check the head (newest trail entry) against everything it can hit
pub fn detect(
    settings: &Settings,
    trail: &TrailStore,
    target: Vec2,
) -> Result<CollisionOutcome, GeometryError> {
    let Some(head) = trail.newest() else {
        return Ok(CollisionOutcome::None);
    };
    let size = settings.segment_size;
    let head_circle = segment_circle(head, size);
    let forgiving: Shape = head_circle.shrink(settings.clearance).into();

    for (i, obstacle) in settings.obstacles.iter().enumerate() {
        if overlaps(&forgiving, &obstacle.rect().into())? {
            return Ok(CollisionOutcome::Fatal(FatalCause::Obstacle(i)));
        }
    }

    // Segments right behind the head always overlap it
    let buffer = settings.self_collision_buffer.max(1);
    for segment in trail.sampled_segments(settings.spacing) {
        if segment.age < buffer {
            continue;
        }
        let body: Shape = segment_circle(segment.pos, size).into();
        if overlaps(&forgiving, &body)? {
            return Ok(CollisionOutcome::Fatal(FatalCause::SelfBody { age: segment.age }));
        }
    }

    let apple: Shape = segment_circle(target, size).into();
    if overlaps(&head_circle.into(), &apple)? {
        return Ok(CollisionOutcome::Pickup);
    }

    Ok(CollisionOutcome::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kinematics::integrate;
    use crate::sim::state::Obstacle;

    fn open_arena() -> Settings {
        Settings {
            obstacles: Vec::new(),
            ..Default::default()
        }
    }

    fn far_target() -> Vec2 {
        Vec2::new(10_000.0, 10_000.0)
    }

    /// Trail of `n` appends of the same point
    fn parked_trail(n: usize, pos: Vec2) -> TrailStore {
        let mut trail = TrailStore::with_capacity(n);
        for _ in 0..n {
            trail.append(pos);
        }
        trail
    }

    #[test]
    fn test_obstacle_hit_with_clearance() {
        let settings = Settings {
            obstacles: vec![Obstacle::new(300.0, 300.0, 30.0, 30.0)],
            ..Default::default()
        };
        // Head center at (305, 305)
        let trail = parked_trail(1, Vec2::new(290.0, 290.0));
        assert_eq!(
            detect(&settings, &trail, far_target()).unwrap(),
            CollisionOutcome::Fatal(FatalCause::Obstacle(0))
        );
    }

    #[test]
    fn test_clearance_forgives_grazing() {
        let settings = Settings {
            obstacles: vec![Obstacle::new(300.0, 300.0, 30.0, 30.0)],
            ..Default::default()
        };
        // Head center 12 units left of the obstacle: inside the full radius,
        // outside the shrunk one
        let trail = parked_trail(1, Vec2::new(273.0, 300.0));
        assert_eq!(
            detect(&settings, &trail, far_target()).unwrap(),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_clear_path_default_obstacles() {
        let settings = Settings::default();
        let trail = parked_trail(1, Vec2::new(543.0, 360.0));
        assert_eq!(
            detect(&settings, &trail, far_target()).unwrap(),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_straight_line_never_hits_itself() {
        let settings = open_arena();
        for len in 1..=45 {
            let mut trail = TrailStore::with_capacity(len);
            let mut pos = Vec2::new(100.0, 100.0);
            for _ in 0..len {
                pos = integrate(pos, 0.0, settings.speed);
                trail.append(pos);
            }
            assert_eq!(
                detect(&settings, &trail, far_target()).unwrap(),
                CollisionOutcome::None,
                "false positive at length {len}"
            );
        }
    }

    #[test]
    fn test_self_hit_respects_buffer_boundary() {
        let settings = open_arena();
        let pos = Vec2::new(100.0, 100.0);

        // 10 entries: only sampled segment is index 0, age 9 < buffer 10
        let trail = parked_trail(10, pos);
        assert_eq!(
            detect(&settings, &trail, far_target()).unwrap(),
            CollisionOutcome::None
        );

        // 11 entries: segment at index 0 has age 10
        let trail = parked_trail(11, pos);
        assert_eq!(
            detect(&settings, &trail, far_target()).unwrap(),
            CollisionOutcome::Fatal(FatalCause::SelfBody { age: 10 })
        );
    }

    #[test]
    fn test_self_hit_stride_one() {
        let settings = Settings {
            spacing: 1,
            self_collision_buffer: 1,
            ..open_arena()
        };
        let pos = Vec2::new(100.0, 100.0);
        assert_eq!(
            detect(&settings, &parked_trail(1, pos), far_target()).unwrap(),
            CollisionOutcome::None
        );
        assert_eq!(
            detect(&settings, &parked_trail(2, pos), far_target()).unwrap(),
            CollisionOutcome::Fatal(FatalCause::SelfBody { age: 1 })
        );
    }

    #[test]
    fn test_wider_buffer_skips_more() {
        let settings = Settings {
            self_collision_buffer: 20,
            ..open_arena()
        };
        let pos = Vec2::new(100.0, 100.0);
        // ages 0, 10, 20
        assert_eq!(
            detect(&settings, &parked_trail(21, pos), far_target()).unwrap(),
            CollisionOutcome::Fatal(FatalCause::SelfBody { age: 20 })
        );
        // ages 9, 19
        assert_eq!(
            detect(&settings, &parked_trail(20, pos), far_target()).unwrap(),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_pickup_exact_bounds() {
        let settings = open_arena();
        let trail = parked_trail(1, Vec2::new(100.0, 100.0));

        // Centers 29 apart: radii sum to 30
        assert_eq!(
            detect(&settings, &trail, Vec2::new(129.0, 100.0)).unwrap(),
            CollisionOutcome::Pickup
        );
        assert_eq!(
            detect(&settings, &trail, Vec2::new(130.0, 100.0)).unwrap(),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_fatal_beats_pickup() {
        let settings = Settings {
            obstacles: vec![Obstacle::new(100.0, 100.0, 30.0, 30.0)],
            ..Default::default()
        };
        let trail = parked_trail(1, Vec2::new(100.0, 100.0));
        assert_eq!(
            detect(&settings, &trail, Vec2::new(100.0, 100.0)).unwrap(),
            CollisionOutcome::Fatal(FatalCause::Obstacle(0))
        );
    }

    #[test]
    fn test_bad_obstacle_is_an_error() {
        let settings = Settings {
            obstacles: vec![Obstacle::new(0.0, 0.0, f32::NAN, 1.0)],
            ..Default::default()
        };
        let trail = parked_trail(1, Vec2::new(100.0, 100.0));
        assert!(detect(&settings, &trail, far_target()).is_err());
    }
}
