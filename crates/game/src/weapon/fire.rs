//! Hitscan fire control.
//!
//! The trigger is gated by a dead zone and a fire-rate countdown. Each shot
//! samples a point in a disk to perturb the camera's look direction, then
//! ray casts from the eye. Hitting anything shows the hit marker at the
//! impact point; hitting a target additionally flashes the cross-hit marker
//! for a short duration. A miss hides both.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use ironsight_physics::{ContentFlags, QueryWorld};

use crate::aim::CameraOrientation;
use crate::config::WeaponConfig;
use crate::random::SeededRandom;

/// What a shot hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotHit {
    pub point: Vec3,
    pub brush: u32,
    /// True when the hit brush is a shootable target.
    pub is_target: bool,
}

/// A shot fired this frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotEvent {
    pub origin: Vec3,
    pub direction: Vec3,
    pub hit: Option<ShotHit>,
}

/// Fire gate and hit-feedback timers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireControl {
    fire_timer: f32,
    x_hit_timer: f32,
    /// Impact point of the most recent shot that hit anything.
    pub hit_marker: Option<Vec3>,
}

impl FireControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cross-hit marker is currently showing.
    pub fn x_hit_visible(&self) -> bool {
        self.x_hit_timer > 0.0
    }

    /// Advance timers and fire if the trigger is pulled and the gate is open.
    ///
    /// Returns the shot fired this frame, if any. The caller restarts the
    /// recoil cycle when it sees one.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        fire_value: f32,
        trigger_dead_zone: f32,
        ads: bool,
        eye: Vec3,
        camera: &CameraOrientation,
        world: &QueryWorld,
        rng: &mut SeededRandom,
        config: &WeaponConfig,
        delta_time: f32,
    ) -> Option<ShotEvent> {
        self.fire_timer = (self.fire_timer - delta_time).max(0.0);
        self.x_hit_timer = (self.x_hit_timer - delta_time).max(0.0);

        if fire_value <= trigger_dead_zone || self.fire_timer > 0.0 {
            return None;
        }
        self.fire_timer = config.fire_interval;

        let radius = if ads {
            config.spread_radius_ads
        } else {
            config.spread_radius_hipfire
        };
        let offset = rng.in_unit_disk() * radius;
        let direction = (camera.look()
            + camera.flat_right() * offset.x
            + camera.up() * offset.y)
            .normalize();

        let hit = world.raycast(eye, direction, config.max_range, ContentFlags::MASK_SHOT);
        match &hit {
            Some(probe) => {
                self.hit_marker = Some(probe.point);
                if probe.contents.contains(ContentFlags::TARGET) {
                    self.x_hit_timer = config.x_hit_duration;
                } else {
                    self.x_hit_timer = 0.0;
                }
                debug!(
                    "shot hit brush {} at {:?} (target: {})",
                    probe.brush,
                    probe.point,
                    probe.contents.contains(ContentFlags::TARGET)
                );
            }
            None => {
                self.hit_marker = None;
                self.x_hit_timer = 0.0;
            }
        }

        Some(ShotEvent {
            origin: eye,
            direction,
            hit: hit.map(|probe| ShotHit {
                point: probe.point,
                brush: probe.brush,
                is_target: probe.contents.contains(ContentFlags::TARGET),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIGGER: f32 = 0.3;

    fn range_world() -> QueryWorld {
        let mut world = QueryWorld::new();
        // Back wall at x=20
        world.add_box(
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(0.5, 20.0, 20.0),
            ContentFlags::SOLID,
        );
        world
    }

    fn fire_once(
        control: &mut FireControl,
        world: &QueryWorld,
        rng: &mut SeededRandom,
        config: &WeaponConfig,
        dt: f32,
    ) -> Option<ShotEvent> {
        let camera = CameraOrientation::default();
        control.update(1.0, TRIGGER, false, Vec3::ZERO, &camera, world, rng, config, dt)
    }

    #[test]
    fn test_trigger_below_dead_zone_never_fires() {
        let world = range_world();
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(1);
        let camera = CameraOrientation::default();
        let shot = control.update(
            TRIGGER, TRIGGER, false, Vec3::ZERO, &camera, &world, &mut rng, &config, 0.016,
        );
        assert!(shot.is_none());
    }

    #[test]
    fn test_fire_rate_gate() {
        let world = range_world();
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(1);

        assert!(fire_once(&mut control, &world, &mut rng, &config, 0.016).is_some());
        // Held trigger inside the interval is rejected.
        assert!(fire_once(&mut control, &world, &mut rng, &config, 0.016).is_none());
        assert!(fire_once(&mut control, &world, &mut rng, &config, 0.016).is_none());
        // Once the interval elapses the next shot goes through.
        assert!(fire_once(&mut control, &world, &mut rng, &config, config.fire_interval).is_some());
    }

    #[test]
    fn test_spread_stays_inside_cone() {
        let world = range_world();
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(99);
        let camera = CameraOrientation::default();

        let max_angle = config.spread_radius_hipfire.atan();
        for _ in 0..200 {
            let shot = control
                .update(
                    1.0,
                    TRIGGER,
                    false,
                    Vec3::ZERO,
                    &camera,
                    &world,
                    &mut rng,
                    &config,
                    config.fire_interval,
                )
                .unwrap();
            let angle = shot.direction.dot(camera.look()).clamp(-1.0, 1.0).acos();
            assert!(angle <= max_angle + 1e-4, "spread angle {angle} too wide");
        }
    }

    #[test]
    fn test_hit_marker_at_impact_point() {
        let world = range_world();
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(1);

        let shot = fire_once(&mut control, &world, &mut rng, &config, 0.016).unwrap();
        let hit = shot.hit.unwrap();
        assert!(!hit.is_target);
        assert!((hit.point.x - 19.5).abs() < 0.1);
        assert_eq!(control.hit_marker, Some(hit.point));
        assert!(!control.x_hit_visible());
    }

    #[test]
    fn test_target_hit_flashes_cross_marker() {
        let mut world = range_world();
        world.add_box(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.3, 2.0, 2.0),
            ContentFlags::TARGET,
        );
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(1);

        let shot = fire_once(&mut control, &world, &mut rng, &config, 0.016).unwrap();
        assert!(shot.hit.unwrap().is_target);
        assert!(control.x_hit_visible());

        // Marker expires on its own.
        let camera = CameraOrientation::default();
        control.update(
            0.0,
            TRIGGER,
            false,
            Vec3::ZERO,
            &camera,
            &world,
            &mut rng,
            &config,
            config.x_hit_duration + 0.01,
        );
        assert!(!control.x_hit_visible());
    }

    #[test]
    fn test_miss_hides_both_markers() {
        let mut world = range_world();
        world.add_box(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.3, 2.0, 2.0),
            ContentFlags::TARGET,
        );
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(1);

        // First shot hits the target.
        assert!(fire_once(&mut control, &world, &mut rng, &config, 0.016).is_some());
        assert!(control.hit_marker.is_some());
        assert!(control.x_hit_visible());

        // Turn around and shoot into open space.
        let camera = CameraOrientation { yaw: 180.0, pitch: 0.0 };
        let shot = control.update(
            1.0,
            TRIGGER,
            false,
            Vec3::ZERO,
            &camera,
            &world,
            &mut rng,
            &config,
            config.fire_interval,
        );
        assert!(shot.unwrap().hit.is_none());
        assert!(control.hit_marker.is_none());
        assert!(!control.x_hit_visible());
    }

    #[test]
    fn test_ads_narrows_spread() {
        let world = range_world();
        let config = WeaponConfig::default();
        let mut control = FireControl::new();
        let mut rng = SeededRandom::new(7);
        let camera = CameraOrientation::default();

        let max_angle = config.spread_radius_ads.atan();
        for _ in 0..100 {
            let shot = control
                .update(
                    1.0,
                    TRIGGER,
                    true,
                    Vec3::ZERO,
                    &camera,
                    &world,
                    &mut rng,
                    &config,
                    config.fire_interval,
                )
                .unwrap();
            let angle = shot.direction.dot(camera.look()).clamp(-1.0, 1.0).acos();
            assert!(angle <= max_angle + 1e-4);
        }
    }
}
