//! Shootable range targets.
//!
//! A target latches permanently on its first hit and tips over toward its
//! configured fallen pose at a configured angular speed. Repeat hits are
//! ignored. Placement and knock-down tuning come from [`TargetConfig`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::TargetConfig;

/// A knock-down target tied to a world brush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Brush id in the query world that shots resolve against.
    pub brush: u32,
    /// Current pose as Euler angles in degrees.
    pub rotation: Vec3,
    fallen_rotation: Vec3,
    fall_speed: f32,
    is_hit: bool,
}

impl Target {
    pub fn new(brush: u32, config: &TargetConfig) -> Self {
        Self {
            brush,
            rotation: Vec3::ZERO,
            fallen_rotation: Vec3::from_array(config.fallen_rotation),
            fall_speed: config.fall_speed,
            is_hit: false,
        }
    }

    /// Latch the hit. Idempotent.
    pub fn hit(&mut self) {
        self.is_hit = true;
    }

    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// Whether the target has finished tipping over.
    pub fn is_fallen(&self) -> bool {
        self.is_hit && (self.rotation - self.fallen_rotation).length() < 1e-3
    }

    /// Rotate toward the fallen pose while hit.
    pub fn update(&mut self, delta_time: f32) {
        if !self.is_hit {
            return;
        }
        let step = self.fall_speed * delta_time;
        for axis in 0..3 {
            let delta = self.fallen_rotation[axis] - self.rotation[axis];
            if delta.abs() <= step {
                self.rotation[axis] = self.fallen_rotation[axis];
            } else {
                self.rotation[axis] += step * delta.signum();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::new(0, &TargetConfig::default())
    }

    #[test]
    fn test_unhit_target_stays_upright() {
        let mut target = target();
        for _ in 0..100 {
            target.update(0.016);
        }
        assert_eq!(target.rotation, Vec3::ZERO);
        assert!(!target.is_fallen());
    }

    #[test]
    fn test_hit_target_tips_to_fallen_pose() {
        let mut target = target();
        target.hit();
        let mut last = 0.0_f32;
        for _ in 0..60 {
            target.update(0.016);
            assert!(target.rotation.x >= last);
            last = target.rotation.x;
        }
        assert!(target.is_fallen());
        assert_eq!(target.rotation.x, 90.0);
    }

    #[test]
    fn test_hit_latches() {
        let mut target = target();
        target.hit();
        target.update(0.016);
        let partway = target.rotation;
        // A second hit does not restart the fall.
        target.hit();
        target.update(0.016);
        assert!(target.rotation.x > partway.x);
    }

    #[test]
    fn test_fall_tuning_comes_from_config() {
        let config = TargetConfig {
            fallen_rotation: [0.0, 0.0, -45.0],
            fall_speed: 90.0,
            ..Default::default()
        };
        let mut target = Target::new(0, &config);
        target.hit();
        target.update(0.25);
        assert!((target.rotation.z - (-22.5)).abs() < 1e-4);
        target.update(0.25);
        assert!(target.is_fallen());
        assert_eq!(target.rotation, Vec3::new(0.0, 0.0, -45.0));
    }
}
