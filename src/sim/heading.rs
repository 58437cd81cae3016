//! Heading controller
//!
//! Turns absolute encoder positions into a desired facing angle and moves the
//! actual facing angle toward it at a bounded rate. The only memory between
//! samples is the calibration offset captured from the first sample after a
//! reset.

use serde::{Deserialize, Serialize};

use crate::consts::ENCODER_STEPS_PER_TURN;
use crate::{normalize_degrees, shortest_delta_degrees};

/// Facing state of the snake head (degrees, counterclockwise, y-down screen)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Current facing angle in [0, 360)
    pub angle: f32,
    /// Last resolved target angle in [0, 360)
    pub target: f32,
    /// Encoder position that maps to angle 0
    calibration: Option<i64>,
}

impl Heading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calibration(&self) -> Option<i64> {
        self.calibration
    }

    /// Forget the zero offset; the next sample becomes the new zero
    pub fn clear_calibration(&mut self) {
        self.calibration = None;
    }

    /// Encoder steps travelled since calibration, calibrating on first use
    pub fn calibrated_delta(&mut self, raw: i64) -> i64 {
        let offset = *self.calibration.get_or_insert(raw);
        raw.wrapping_sub(offset)
    }

    /// Map a raw encoder position to a target angle and remember it
    pub fn resolve_target_angle(&mut self, raw: i64, sensitivity: f32) -> f32 {
        let delta = self.calibrated_delta(raw) as f64;
        let steps = ENCODER_STEPS_PER_TURN as f64;
        let sensitivity = sensitivity as f64;

        // One snake revolution every `steps / sensitivity` encoder steps
        let position = delta.rem_euclid(steps / sensitivity);
        let angle = -(position / steps * sensitivity) * 360.0;

        self.target = normalize_degrees(angle as f32);
        self.target
    }

    /// Rotate toward the stored target by at most `max_turn_rate`
    pub fn steer(&mut self, max_turn_rate: f32) -> f32 {
        self.angle = advance_heading(self.angle, self.target, max_turn_rate);
        self.angle
    }
}

/// Step `current` toward `target` along the shorter arc, never more than
/// `max_turn_rate` degrees. Snaps to `target` once within reach.
pub fn advance_heading(current: f32, target: f32, max_turn_rate: f32) -> f32 {
    let diff = shortest_delta_degrees(current, target);
    let next = if diff.abs() > max_turn_rate {
        current + max_turn_rate.copysign(diff)
    } else {
        target
    };
    normalize_degrees(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SENSITIVITY;
    use proptest::prelude::*;

    #[test]
    fn test_first_sample_calibrates_to_zero() {
        let mut heading = Heading::new();
        assert_eq!(heading.resolve_target_angle(1234, SENSITIVITY), 0.0);
        assert_eq!(heading.calibration(), Some(1234));
    }

    #[test]
    fn test_target_angle_mapping() {
        let mut heading = Heading::new();
        heading.resolve_target_angle(100, SENSITIVITY);

        // One step clockwise on the dial turns the snake 9.6 degrees clockwise
        let a = heading.resolve_target_angle(101, SENSITIVITY);
        assert!((a - 350.4).abs() < 1e-3, "got {a}");

        // One step back from zero wraps the other way
        let a = heading.resolve_target_angle(99, SENSITIVITY);
        assert!((a - 9.6).abs() < 1e-3, "got {a}");

        // A full period maps back to zero
        let a = heading.resolve_target_angle(100 + 75, SENSITIVITY);
        assert!(a.abs() < 1e-3 || (a - 360.0).abs() < 1e-3, "got {a}");
        assert!(a < 360.0);
    }

    #[test]
    fn test_clear_calibration() {
        let mut heading = Heading::new();
        heading.resolve_target_angle(10, SENSITIVITY);
        heading.clear_calibration();
        assert_eq!(heading.calibration(), None);
        assert_eq!(heading.resolve_target_angle(500, SENSITIVITY), 0.0);
        assert_eq!(heading.calibrated_delta(503), 3);
    }

    #[test]
    fn test_advance_heading_limits_rate() {
        assert_eq!(advance_heading(0.0, 90.0, 5.0), 5.0);
        assert_eq!(advance_heading(0.0, 270.0, 5.0), 355.0);
        assert_eq!(advance_heading(0.0, 3.0, 5.0), 3.0);
        assert_eq!(advance_heading(2.0, 358.0, 5.0), 358.0);
        assert_eq!(advance_heading(357.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_steer_uses_stored_target() {
        let mut heading = Heading::new();
        heading.target = 20.0;
        assert_eq!(heading.steer(5.0), 5.0);
        assert_eq!(heading.steer(5.0), 10.0);
        heading.steer(5.0);
        heading.steer(5.0);
        assert_eq!(heading.steer(5.0), 20.0);
    }

    proptest! {
        #[test]
        fn heading_stays_normalized(
            cur in -1000.0f32..1000.0, target in -1000.0f32..1000.0, rate in 0.0f32..45.0,
        ) {
            let next = advance_heading(cur, target, rate);
            prop_assert!((0.0..360.0).contains(&next));
        }

        #[test]
        fn turn_rate_is_bounded(
            cur in 0.0f32..360.0, target in 0.0f32..360.0, rate in 0.0f32..45.0,
        ) {
            let next = advance_heading(cur, target, rate);
            let moved = shortest_delta_degrees(cur, next).abs();
            prop_assert!(moved <= rate + 1e-3);
            if shortest_delta_degrees(cur, target).abs() <= rate {
                prop_assert_eq!(next, target);
            }
        }

        #[test]
        fn resolved_target_is_normalized(start in -10_000i64..10_000, raw in -10_000i64..10_000) {
            let mut heading = Heading::new();
            heading.resolve_target_angle(start, SENSITIVITY);
            let angle = heading.resolve_target_angle(raw, SENSITIVITY);
            prop_assert!((0.0..360.0).contains(&angle));
        }
    }
}
