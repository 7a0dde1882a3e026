//! Landmark geometry.

use crate::error::{ScoringError, ScoringResult};

/// Angle at vertex `b` formed by points `a` and `c`, in degrees.
///
/// Computes `acos(BA·BC / (|BA||BC|))`. The cosine is clamped to [-1, 1]
/// before the inverse cosine, so colinear or nearly coincident points still
/// yield a value in [0, 180] instead of NaN.
///
/// # Errors
/// `Degenerate` when `a` or `c` coincides with `b` (the angle is undefined).
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> ScoringResult<f64> {
    let ba = (a.0 - b.0, a.1 - b.1);
    let bc = (c.0 - b.0, c.1 - b.1);

    let norm_ba = ba.0.hypot(ba.1);
    let norm_bc = bc.0.hypot(bc.1);

    if norm_ba == 0.0 || norm_bc == 0.0 {
        return Err(ScoringError::degenerate(format!(
            "zero-length segment at vertex ({}, {})",
            b.0, b.1
        )));
    }

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let cosine = (dot / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    let degrees = cosine.acos().to_degrees();

    if !degrees.is_finite() {
        return Err(ScoringError::non_finite(format!(
            "angle from cosine {}",
            cosine
        )));
    }

    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle((0.0, 1.0), (0.0, 0.0), (1.0, 0.0)).unwrap();
        assert!(approx(angle, 90.0));
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = joint_angle((-5.0, 0.0), (0.0, 0.0), (7.0, 0.0)).unwrap();
        assert!(approx(angle, 180.0));
    }

    #[test]
    fn test_folded_back_is_0() {
        let angle = joint_angle((3.0, 3.0), (0.0, 0.0), (9.0, 9.0)).unwrap();
        assert!(approx(angle, 0.0));
    }

    #[test]
    fn test_colinear_points_stay_in_range() {
        // Large coordinates on a shallow diagonal push the cosine a hair past 1.0
        // without clamping.
        let cases = [
            ((1e8, 1e8 + 1.0), (0.0, 0.0), (-3e8, -3e8 - 3.0)),
            ((0.1, 0.3), (0.2, 0.6), (0.3, 0.9)),
            ((1.0, 1.0), (1.0 + 1e-12, 1.0), (1.0 + 2e-12, 1.0)),
            ((640.0, 480.0), (320.0, 240.0), (0.0, 0.0)),
        ];

        for (a, b, c) in cases {
            let angle = joint_angle(a, b, c).unwrap();
            assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
        }
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        assert!(matches!(
            joint_angle((1.0, 1.0), (1.0, 1.0), (2.0, 2.0)),
            Err(ScoringError::Degenerate(_))
        ));
        assert!(matches!(
            joint_angle((0.0, 0.0), (1.0, 1.0), (1.0, 1.0)),
            Err(ScoringError::Degenerate(_))
        ));
    }

    #[test]
    fn test_outer_points_may_coincide() {
        // A == C is a valid (zero) angle, only the vertex must be distinct.
        let angle = joint_angle((2.0, 0.0), (0.0, 0.0), (2.0, 0.0)).unwrap();
        assert!(approx(angle, 0.0));
    }
}
