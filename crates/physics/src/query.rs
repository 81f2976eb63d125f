//! Probe results.
//!
//! A probe that finds nothing returns `None`; callers treat that as an
//! ordinary branch, never an error.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Result of a successful probe (ray cast or box cast).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProbeHit {
    /// World-space impact point. For box casts this is the center of the
    /// swept box at the moment of contact.
    pub point: Vec3,

    /// Surface normal at the impact, pointing back toward the probe origin
    /// side of the surface.
    pub normal: Vec3,

    /// How far along the probe path the hit occurred (0.0 = at origin,
    /// 1.0 = at maximum distance).
    pub fraction: f32,

    /// Id of the brush that was hit.
    pub brush: u32,

    /// Content flags of the hit brush.
    pub contents: ContentFlags,
}

impl ProbeHit {
    /// Travelled distance given the probe's maximum distance.
    #[inline]
    pub fn distance(&self, max_distance: f32) -> f32 {
        self.fraction * max_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_fraction() {
        let hit = ProbeHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            fraction: 0.25,
            brush: 0,
            contents: ContentFlags::SOLID,
        };
        assert_eq!(hit.distance(8.0), 2.0);
    }
}
