//! Camera aim: rotation speeds, ramp-up, pitch clamp, and ADS zoom.
//!
//! Angles are degrees throughout. Yaw accumulates and wraps to `[0, 360)`;
//! pitch clamps to the configured window. Holding the aim stick pinned past
//! a delay blends in extra turn speed over the ramp-up time, so flick aim
//! stays precise while sustained turns speed up.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{AimConfig, AimProfile};

/// Conditioned aim magnitude at or above this counts as pinned.
const STICK_PINNED: f32 = 0.9999;

// ===== Ramp =====

/// Tracks how long the aim stick has been held at full deflection.
///
/// The first pinned frame only latches; accumulation starts the frame
/// after. When the delay threshold is crossed mid-frame, the overshoot
/// past the threshold seeds the ramp so no time is lost to quantization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimRamp {
    stick_at_max: bool,
    delay_timer: f32,
    ramp_timer: f32,
}

impl AimRamp {
    /// Advance the ramp by one frame.
    pub fn update(&mut self, pinned: bool, ramp_delay: f32, delta_time: f32) {
        if !pinned {
            self.reset();
            return;
        }
        if !self.stick_at_max {
            self.stick_at_max = true;
            return;
        }
        self.delay_timer += delta_time;
        if self.delay_timer >= ramp_delay {
            if self.ramp_timer == 0.0 {
                self.ramp_timer = self.delay_timer - ramp_delay;
            } else {
                self.ramp_timer += delta_time;
            }
        }
    }

    /// Fraction of the extra aim speed currently blended in, `0..=1`.
    pub fn boost(&self, ramp_up_time: f32) -> f32 {
        (self.ramp_timer / ramp_up_time).clamp(0.0, 1.0)
    }

    /// Drop back to no boost.
    pub fn reset(&mut self) {
        self.stick_at_max = false;
        self.delay_timer = 0.0;
        self.ramp_timer = 0.0;
    }
}

// ===== Orientation =====

/// Camera orientation as yaw/pitch Euler angles in degrees.
///
/// Yaw 0 looks down +X; yaw increases toward +Z. Positive pitch looks up.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraOrientation {
    /// Forward on the ground plane, ignoring pitch.
    pub fn flat_forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Right on the ground plane.
    pub fn flat_right(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(-yaw.sin(), 0.0, yaw.cos())
    }

    /// Full look direction including pitch.
    pub fn look(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
    }

    /// Camera-space up, perpendicular to both the look direction and the
    /// flat right axis (the camera never rolls).
    pub fn up(&self) -> Vec3 {
        self.flat_right().cross(self.look())
    }
}

// ===== Model =====

/// The full aim model: orientation, ramp state, and FOV blend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimModel {
    orientation: CameraOrientation,
    ramp: AimRamp,
    current_fov: f32,
    was_ads: bool,
}

impl AimModel {
    pub fn new(config: &AimConfig) -> Self {
        Self {
            orientation: CameraOrientation::default(),
            ramp: AimRamp::default(),
            current_fov: config.hipfire_fov,
            was_ads: false,
        }
    }

    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    pub fn fov(&self) -> f32 {
        self.current_fov
    }

    /// Advance one frame. `aim` is the conditioned aim stick.
    pub fn update(&mut self, aim: Vec2, ads: bool, config: &AimConfig, delta_time: f32) {
        if ads != self.was_ads {
            // A stance change re-earns the boost from scratch.
            self.ramp.reset();
            self.was_ads = ads;
        }
        let profile: &AimProfile = if ads { &config.ads } else { &config.hipfire };

        let pinned = aim.length() >= STICK_PINNED;
        self.ramp.update(pinned, profile.ramp_up_delay, delta_time);
        let boost = self.ramp.boost(profile.ramp_up_time);

        let mut yaw_speed = profile.yaw_speed + profile.extra_yaw_speed * boost;
        let mut pitch_speed = profile.pitch_speed + profile.extra_pitch_speed * boost;
        if ads {
            let scale = config.fov_ratio();
            yaw_speed *= scale;
            pitch_speed *= scale;
        }

        self.orientation.yaw =
            (self.orientation.yaw + aim.x * yaw_speed * delta_time).rem_euclid(360.0);
        self.orientation.pitch = (self.orientation.pitch + aim.y * pitch_speed * delta_time)
            .clamp(config.max_down_angle, config.max_up_angle);

        self.update_fov(ads, config, delta_time);
    }

    fn update_fov(&mut self, ads: bool, config: &AimConfig, delta_time: f32) {
        let target = if ads { config.ads_fov } else { config.hipfire_fov };
        let rate = (config.hipfire_fov - config.ads_fov).abs() / config.ads_transition_time;
        let delta = target - self.current_fov;
        let step = rate * delta_time;
        if delta.abs() <= step {
            self.current_fov = target;
        } else {
            self.current_fov += step * delta.signum();
        }
    }
}
