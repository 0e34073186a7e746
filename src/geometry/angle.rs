//! Joint angle from three pixel points.

use crate::pose::{Coord, Pixel};

/// Returns the angle at `vertex` swept from ray `vertex → first` to ray
/// `vertex → last`, in degrees folded into `[0, 360)`.
///
/// This is a signed sweep, not the interior angle: a knee bent forward and the
/// same knee bent backward give `θ` and `360 - θ`. A straight leg reads 180.
/// Rep thresholds are calibrated against this convention.
///
/// Coincident points are not an error: `atan2(0, 0)` is 0, so a collapsed
/// ray contributes a zero direction and the result is still in range.
/// Non-finite input produces a non-finite result.
pub fn angle_at(first: Coord<Pixel>, vertex: Coord<Pixel>, last: Coord<Pixel>) -> f64 {
    let to_last = (last.y - vertex.y).atan2(last.x - vertex.x);
    let to_first = (first.y - vertex.y).atan2(first.x - vertex.x);

    let mut degrees = (to_last - to_first).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // A tiny negative sweep rounds up to exactly 360 after the fold.
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(x: f64, y: f64) -> Coord<Pixel> {
        Coord::new(x, y)
    }

    #[test]
    fn test_straight_leg_is_180() {
        let hip = px(100.0, 100.0);
        let knee = px(100.0, 200.0);
        let ankle = px(100.0, 300.0);
        assert!((angle_at(hip, knee, ankle) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_direction_matters() {
        let vertex = px(0.0, 0.0);
        let right = px(1.0, 0.0);
        let down = px(0.0, 1.0);
        // Image coordinates: +y points down, so right → down is +90.
        assert!((angle_at(right, vertex, down) - 90.0).abs() < 1e-9);
        assert!((angle_at(down, vertex, right) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_points_are_defined() {
        let p = px(42.0, 42.0);
        let angle = angle_at(p, p, p);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_one_collapsed_ray() {
        let knee = px(10.0, 10.0);
        let ankle = px(10.0, 20.0);
        let angle = angle_at(knee, knee, ankle);
        assert!((0.0..360.0).contains(&angle));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_never_reaches_360() {
        let vertex = px(0.0, 0.0);
        let first = px(1.0, 1e-300);
        let last = px(1.0, 0.0);
        let angle = angle_at(first, vertex, last);
        assert!((0.0..360.0).contains(&angle), "angle = {}", angle);
    }

    #[test]
    fn test_nan_propagates() {
        let angle = angle_at(px(f64::NAN, 0.0), px(0.0, 0.0), px(1.0, 0.0));
        assert!(angle.is_nan());
    }
}
