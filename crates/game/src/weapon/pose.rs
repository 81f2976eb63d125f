//! Viewmodel pose: sway, recoil offset, and the position blend.
//!
//! All values are in camera-local space; rendering composes them onto the
//! camera transform. Sway is a small rotation proportional to aim input,
//! recoil is a curve-driven pull back along the weapon's forward, and the
//! anchor position blends between hipfire, ADS, and sprint poses with a
//! critically damped spring.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::WeaponConfig;

/// Critically damped move toward a target, matching the classic smooth-damp
/// formulation (approximated exponential decay plus an overshoot guard).
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    delta_time: f32,
) -> Vec3 {
    let omega = 2.0 / smooth_time.max(1e-4);
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * delta_time;
    *velocity = (*velocity - temp * omega) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}

/// Current viewmodel pose state, advanced once per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponPose {
    /// Sway rotation in degrees: x tilts with horizontal aim, y with vertical.
    pub sway: Vec2,
    /// Offset along the weapon's local forward; negative while kicked back.
    pub recoil_offset: f32,
    /// Anchor position in camera-local space.
    pub position: Vec3,

    position_velocity: Vec3,
    recoil_timer: f32,
}

impl WeaponPose {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            sway: Vec2::ZERO,
            recoil_offset: 0.0,
            position: Vec3::from_array(config.hipfire_pose),
            position_velocity: Vec3::ZERO,
            // Start fully recovered.
            recoil_timer: config.recoil_duration,
        }
    }

    /// Restart the recoil cycle. Called whenever a shot fires, so sustained
    /// fire holds the weapon kicked instead of letting it settle.
    pub fn on_fired(&mut self) {
        self.recoil_timer = 0.0;
    }

    /// Advance sway, recoil, and the pose blend by one frame.
    ///
    /// `aim` is the conditioned aim stick.
    pub fn update(
        &mut self,
        aim: Vec2,
        ads: bool,
        sprinting: bool,
        config: &WeaponConfig,
        delta_time: f32,
    ) {
        let bound = if ads {
            config.sway_bound_ads
        } else {
            config.sway_bound_hipfire
        };
        let normalized = aim / config.sway_max_input;
        self.sway = Vec2::new(
            normalized.x.clamp(-1.0, 1.0),
            normalized.y.clamp(-1.0, 1.0),
        ) * bound;

        self.recoil_timer = (self.recoil_timer + delta_time).min(config.recoil_duration);
        let t = self.recoil_timer / config.recoil_duration;
        self.recoil_offset = -config.recoil_curve.sample(t) * config.recoil_force;

        let target = Vec3::from_array(if sprinting {
            config.sprint_pose
        } else if ads {
            config.ads_pose
        } else {
            config.hipfire_pose
        });
        self.position = smooth_damp(
            self.position,
            target,
            &mut self.position_velocity,
            config.pose_smooth_time,
            delta_time,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeaponConfig {
        WeaponConfig::default()
    }

    #[test]
    fn test_sway_proportional_and_clamped() {
        let config = config();
        let mut pose = WeaponPose::new(&config);

        pose.update(Vec2::new(0.4, 0.0), false, false, &config, 0.016);
        let half = pose.sway.x;
        pose.update(Vec2::new(0.8, 0.0), false, false, &config, 0.016);
        assert!((pose.sway.x - half * 2.0).abs() < 1e-5);

        // Past the saturation input the sway stays at the bound.
        pose.update(Vec2::new(5.0, -5.0), false, false, &config, 0.016);
        assert_eq!(pose.sway.x, config.sway_bound_hipfire);
        assert_eq!(pose.sway.y, -config.sway_bound_hipfire);
    }

    #[test]
    fn test_ads_tightens_sway() {
        let config = config();
        let mut pose = WeaponPose::new(&config);
        pose.update(Vec2::new(1.0, 0.0), true, false, &config, 0.016);
        assert_eq!(pose.sway.x, config.sway_bound_ads);
        assert!(config.sway_bound_ads < config.sway_bound_hipfire);
    }

    #[test]
    fn test_recoil_kicks_then_recovers() {
        let config = config();
        let mut pose = WeaponPose::new(&config);

        // Fully recovered before any shot.
        pose.update(Vec2::ZERO, false, false, &config, 0.016);
        assert_eq!(pose.recoil_offset, 0.0);

        pose.on_fired();
        pose.update(Vec2::ZERO, false, false, &config, 0.016);
        let kicked = pose.recoil_offset;
        assert!(kicked < 0.0);

        // After the full duration the offset returns to zero.
        for _ in 0..60 {
            pose.update(Vec2::ZERO, false, false, &config, 0.016);
        }
        assert_eq!(pose.recoil_offset, 0.0);
    }

    #[test]
    fn test_firing_restarts_recoil_mid_recovery() {
        let config = config();
        let mut pose = WeaponPose::new(&config);
        pose.on_fired();
        for _ in 0..8 {
            pose.update(Vec2::ZERO, false, false, &config, 0.016);
        }
        let recovering = pose.recoil_offset;
        pose.on_fired();
        pose.update(Vec2::ZERO, false, false, &config, 0.016);
        assert!(pose.recoil_offset < recovering);
    }

    #[test]
    fn test_pose_blend_converges_to_ads() {
        let config = config();
        let mut pose = WeaponPose::new(&config);
        for _ in 0..120 {
            pose.update(Vec2::ZERO, true, false, &config, 0.016);
        }
        let target = Vec3::from_array(config.ads_pose);
        assert!((pose.position - target).length() < 1e-3);
    }

    #[test]
    fn test_sprint_pose_wins_over_ads() {
        let config = config();
        let mut pose = WeaponPose::new(&config);
        for _ in 0..120 {
            pose.update(Vec2::ZERO, true, true, &config, 0.016);
        }
        let target = Vec3::from_array(config.sprint_pose);
        assert!((pose.position - target).length() < 1e-3);
    }

    #[test]
    fn test_smooth_damp_reaches_target_without_oscillation() {
        let mut velocity = Vec3::ZERO;
        let mut current = Vec3::ZERO;
        let target = Vec3::new(1.0, 0.0, 0.0);
        let mut last_distance = f32::INFINITY;
        for _ in 0..200 {
            current = smooth_damp(current, target, &mut velocity, 0.1, 0.016);
            let distance = (current - target).length();
            assert!(distance <= last_distance + 1e-6);
            last_distance = distance;
        }
        assert!(last_distance < 1e-3);
    }
}
