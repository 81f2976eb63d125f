//! Input sampling and stick conditioning.
//!
//! Raw pad input passes through a radial dead-zone filter and a response
//! curve before anything downstream sees it. Conditioning preserves stick
//! direction and only reshapes magnitude, so diagonal input never skews.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::InputConfig;
use crate::curve::ResponseCurve;

/// One frame of sampled player input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Left stick, raw. x = strafe, y = forward.
    pub movement: Vec2,
    /// Right stick, raw. x = yaw, y = pitch.
    pub aim: Vec2,
    /// Right trigger, `0..=1`.
    pub fire_value: f32,
    /// Left trigger, `0..=1`.
    pub ads_value: f32,
    /// Edge-triggered this frame.
    pub jump_pressed: bool,
    /// Edge-triggered this frame.
    pub crouch_pressed: bool,
    /// Edge-triggered this frame.
    pub sprint_pressed: bool,
}

/// Applies the radial dead zone to a raw stick vector.
///
/// Below the inner zone the output is zero; at or above the outer zone the
/// output is the unit direction; between, magnitude is remapped linearly
/// onto `[0, 1]`. Output is continuous across both boundaries.
pub fn apply_dead_zone(raw: Vec2, inner: f32, outer: f32) -> Vec2 {
    let magnitude = raw.length();
    if magnitude <= inner {
        return Vec2::ZERO;
    }
    let direction = raw / magnitude;
    if magnitude >= outer {
        return direction;
    }
    direction * ((magnitude - inner) / (outer - inner))
}

/// Full stick conditioning: dead zone, then the response curve on magnitude.
///
/// The curve is required to be monotonic (checked at config validation), so
/// a harder deflection never produces a smaller output.
pub fn condition(raw: Vec2, config: &InputConfig) -> Vec2 {
    condition_with(
        raw,
        config.inner_dead_zone,
        config.outer_dead_zone,
        &config.stick_curve,
    )
}

fn condition_with(raw: Vec2, inner: f32, outer: f32, curve: &ResponseCurve) -> Vec2 {
    let filtered = apply_dead_zone(raw, inner, outer);
    let magnitude = filtered.length();
    if magnitude <= f32::EPSILON {
        return Vec2::ZERO;
    }
    (filtered / magnitude) * curve.sample(magnitude.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: f32 = 0.08;
    const OUTER: f32 = 0.98;

    #[test]
    fn test_inside_inner_zone_is_zero() {
        assert_eq!(apply_dead_zone(Vec2::new(0.05, 0.0), INNER, OUTER), Vec2::ZERO);
        assert_eq!(apply_dead_zone(Vec2::new(0.04, 0.04), INNER, OUTER), Vec2::ZERO);
        assert_eq!(apply_dead_zone(Vec2::ZERO, INNER, OUTER), Vec2::ZERO);
    }

    #[test]
    fn test_beyond_outer_zone_saturates() {
        let out = apply_dead_zone(Vec2::new(0.99, 0.0), INNER, OUTER);
        assert!((out.length() - 1.0).abs() < 1e-6);
        let diagonal = apply_dead_zone(Vec2::new(0.8, 0.8), INNER, OUTER);
        assert!((diagonal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_continuous_at_inner_boundary() {
        let just_below = apply_dead_zone(Vec2::new(INNER - 1e-4, 0.0), INNER, OUTER);
        let just_above = apply_dead_zone(Vec2::new(INNER + 1e-4, 0.0), INNER, OUTER);
        assert!(just_below.length() < 1e-3);
        assert!(just_above.length() < 1e-3);
    }

    #[test]
    fn test_continuous_at_outer_boundary() {
        let just_below = apply_dead_zone(Vec2::new(OUTER - 1e-4, 0.0), INNER, OUTER);
        let just_above = apply_dead_zone(Vec2::new(OUTER + 1e-4, 0.0), INNER, OUTER);
        assert!((just_below.length() - just_above.length()).abs() < 1e-3);
    }

    #[test]
    fn test_monotonic_in_magnitude() {
        let mut previous = 0.0_f32;
        for step in 0..=100 {
            let magnitude = step as f32 / 100.0;
            let out = apply_dead_zone(Vec2::new(magnitude, 0.0), INNER, OUTER).length();
            assert!(
                out + 1e-6 >= previous,
                "magnitude {magnitude} produced {out} < {previous}"
            );
            previous = out;
        }
    }

    #[test]
    fn test_direction_preserved() {
        let raw = Vec2::new(0.3, 0.5);
        let out = apply_dead_zone(raw, INNER, OUTER);
        let cross = raw.x * out.y - raw.y * out.x;
        assert!(cross.abs() < 1e-6);
        assert!(out.dot(raw) > 0.0);
    }

    #[test]
    fn test_curve_applies_to_magnitude_only() {
        let curve = ResponseCurve::new(vec![(0.0, 0.0), (1.0, 0.5)]);
        let config = InputConfig {
            inner_dead_zone: INNER,
            outer_dead_zone: OUTER,
            stick_curve: curve,
            trigger_dead_zone: 0.3,
        };
        let out = condition(Vec2::new(1.0, 0.0), &config);
        assert!((out.x - 0.5).abs() < 1e-6);
        assert_eq!(out.y, 0.0);
    }
}
