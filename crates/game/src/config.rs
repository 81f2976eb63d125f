//! Controller configuration.
//!
//! All tunables live here as plain data so a whole controller setup can be
//! serialized, diffed, and swapped without touching code. `validate` runs
//! once at startup and rejects configurations that would make the controller
//! misbehave silently (inverted dead zones, zero-length timers, a stick
//! curve that reorders inputs).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::ResponseCurve;

/// Configuration validation failure. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} range is inverted ({min} > {max})")]
    RangeInverted {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("dead zones must satisfy 0 <= inner < outer <= 1 (inner {inner}, outer {outer})")]
    DeadZoneOrder { inner: f32, outer: f32 },

    #[error("trigger dead zone must be in (0, 1) (got {value})")]
    TriggerDeadZone { value: f32 },

    #[error("stick response curve must be monotonically non-decreasing")]
    CurveNotMonotonic,

    #[error("pitch clamp is inverted (down {down} must be below up {up})")]
    PitchClampInverted { down: f32, up: f32 },

    #[error("sprint speed {sprint} must not be below max walk speed {walk}")]
    SprintSlowerThanWalk { sprint: f32, walk: f32 },
}

fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn require_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

// ===== Input =====

/// Stick and trigger conditioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Radial magnitude below which stick input reads as zero.
    pub inner_dead_zone: f32,
    /// Radial magnitude at and above which stick input reads as full.
    pub outer_dead_zone: f32,
    /// Remap applied to the normalized stick magnitude. Must be monotonic.
    pub stick_curve: ResponseCurve,
    /// Analog trigger value above which the trigger counts as pulled.
    pub trigger_dead_zone: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            inner_dead_zone: 0.08,
            outer_dead_zone: 0.98,
            stick_curve: ResponseCurve::identity(),
            trigger_dead_zone: 0.3,
        }
    }
}

// ===== Aim =====

/// Per-stance aim speeds and ramp-up tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimProfile {
    /// Base yaw speed in degrees/second.
    pub yaw_speed: f32,
    /// Base pitch speed in degrees/second.
    pub pitch_speed: f32,
    /// Extra yaw speed in degrees/second, blended in by the ramp.
    pub extra_yaw_speed: f32,
    /// Extra pitch speed in degrees/second, blended in by the ramp.
    pub extra_pitch_speed: f32,
    /// Seconds of pinned input before the extra speed starts ramping.
    pub ramp_up_delay: f32,
    /// Seconds for the extra speed to ramp from zero to full.
    pub ramp_up_time: f32,
}

/// Camera aim configuration: hipfire and ADS profiles plus clamps and zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimConfig {
    pub hipfire: AimProfile,
    pub ads: AimProfile,
    /// Pitch clamp, degrees. `max_down` is negative for looking below level.
    pub max_up_angle: f32,
    pub max_down_angle: f32,
    /// Field of view, degrees.
    pub hipfire_fov: f32,
    pub ads_fov: f32,
    /// Seconds for the FOV to travel between hipfire and ADS.
    pub ads_transition_time: f32,
}

impl AimConfig {
    /// Sensitivity multiplier applied while aiming down sights, so the same
    /// stick deflection covers the same fraction of the zoomed view.
    pub fn fov_ratio(&self) -> f32 {
        self.ads_fov / self.hipfire_fov
    }
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            hipfire: AimProfile {
                yaw_speed: 160.0,
                pitch_speed: 120.0,
                extra_yaw_speed: 220.0,
                extra_pitch_speed: 0.0,
                ramp_up_delay: 0.1,
                ramp_up_time: 0.33,
            },
            ads: AimProfile {
                yaw_speed: 90.0,
                pitch_speed: 70.0,
                extra_yaw_speed: 0.0,
                extra_pitch_speed: 0.0,
                ramp_up_delay: 0.1,
                ramp_up_time: 0.33,
            },
            max_up_angle: 90.0,
            max_down_angle: -90.0,
            hipfire_fov: 60.0,
            ads_fov: 40.0,
            ads_transition_time: 0.15,
        }
    }
}

// ===== Movement =====

/// Locomotion tuning: speeds, jump, climbing, and probe geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Walk speed at the inner dead zone edge, meters/second.
    pub min_move_speed: f32,
    /// Walk speed at full stick deflection, meters/second.
    pub max_move_speed: f32,
    /// Sprint speed, meters/second.
    pub sprint_speed: f32,
    /// Half-angle of the forward cone (degrees) the stick must stay inside
    /// for sprint to engage and persist.
    pub sprint_cone_angle: f32,
    /// Upward velocity applied on jump, meters/second.
    pub jump_impulse: f32,
    /// Downward acceleration, meters/second squared (positive).
    pub gravity: f32,

    /// Collision half-width of the body.
    pub body_radius: f32,
    /// Full standing height of the body.
    pub body_height: f32,
    /// Eye height above the feet.
    pub eye_height: f32,
    /// How far below the feet the ground probe reaches.
    pub ground_cast_distance: f32,

    /// How far forward the chest probe sweeps when looking for a ledge.
    pub ledge_reach: f32,
    /// Height above the wall contact the downward edge probe starts from.
    pub ledge_probe_height: f32,
    /// Horizontal inset past the wall face for edge probes.
    pub ledge_edge_inset: f32,
    /// Horizontal gap between the wall and the hanging body.
    pub hang_depth: f32,
    /// How far below the grabbed edge the feet hang.
    pub hang_height: f32,
    /// Sideways speed while shimmying, meters/second.
    pub shimmy_speed: f32,
    /// How far sideways the continuation probe looks while shimmying.
    pub shimmy_probe_offset: f32,
    /// Camera must stay within this many degrees of facing the wall to
    /// shimmy; beyond it, shimmy movement locks.
    pub facing_lock_angle: f32,
    /// Looking more than this many degrees away from the wall turns a ledge
    /// jump into a jump-away instead of a climb.
    pub jump_away_angle: f32,
    /// Horizontal speed away from the wall on jump-away.
    pub jump_away_impulse: f32,
    /// Vertical speed on jump-away.
    pub jump_away_vertical_impulse: f32,
    /// Vertical speed on a climb-up when the mantle space is blocked.
    pub climb_up_impulse: f32,
    /// How far onto the ledge surface a mantle lands.
    pub mantle_depth: f32,
    /// Seconds after dropping from a ledge before another grab can start.
    pub ledge_regrab_delay: f32,
    /// Seconds after a climb-up before another grab can start.
    pub climb_regrab_delay: f32,

    /// Vertical climb speed on a pipe, meters/second.
    pub pipe_climb_speed: f32,
    /// Horizontal offset applied to the top-exit mantle point.
    pub pipe_exit_offset: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            min_move_speed: 1.5,
            max_move_speed: 5.0,
            sprint_speed: 8.0,
            sprint_cone_angle: 35.0,
            jump_impulse: 5.0,
            gravity: 19.6,

            body_radius: 0.4,
            body_height: 1.8,
            eye_height: 1.65,
            ground_cast_distance: 0.15,

            ledge_reach: 0.75,
            ledge_probe_height: 1.2,
            ledge_edge_inset: 0.15,
            hang_depth: 0.35,
            hang_height: 1.5,
            shimmy_speed: 1.2,
            shimmy_probe_offset: 0.4,
            facing_lock_angle: 75.0,
            jump_away_angle: 120.0,
            jump_away_impulse: 4.0,
            jump_away_vertical_impulse: 3.5,
            climb_up_impulse: 6.0,
            mantle_depth: 0.3,
            ledge_regrab_delay: 0.5,
            climb_regrab_delay: 0.3,

            pipe_climb_speed: 2.0,
            pipe_exit_offset: 0.5,
        }
    }
}

// ===== Weapon =====

/// Firing, spread, recoil, sway, and viewmodel pose tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Minimum seconds between shots.
    pub fire_interval: f32,
    /// Hitscan range, meters.
    pub max_range: f32,
    /// Spread disk radius at one meter, hipfire.
    pub spread_radius_hipfire: f32,
    /// Spread disk radius at one meter, aiming down sights.
    pub spread_radius_ads: f32,
    /// Seconds the cross-hit marker stays on screen after hitting a target.
    pub x_hit_duration: f32,

    /// Kick strength sampled from the recoil curve, meters along the
    /// weapon's local forward.
    pub recoil_force: f32,
    /// Seconds from shot to full recovery.
    pub recoil_duration: f32,
    /// Kick-then-recover shape, sampled at `elapsed / recoil_duration`.
    pub recoil_curve: ResponseCurve,

    /// Aim input magnitude that produces maximum sway.
    pub sway_max_input: f32,
    /// Sway rotation bound in degrees, hipfire.
    pub sway_bound_hipfire: f32,
    /// Sway rotation bound in degrees, aiming down sights.
    pub sway_bound_ads: f32,

    /// Viewmodel anchor offsets from the camera, local space.
    pub hipfire_pose: [f32; 3],
    pub ads_pose: [f32; 3],
    pub sprint_pose: [f32; 3],
    /// Smooth time for the pose blend, seconds.
    pub pose_smooth_time: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_interval: 0.12,
            max_range: 150.0,
            spread_radius_hipfire: 0.035,
            spread_radius_ads: 0.008,
            x_hit_duration: 0.4,

            recoil_force: 0.06,
            recoil_duration: 0.25,
            recoil_curve: ResponseCurve::new(vec![(0.0, 0.0), (0.12, 1.0), (1.0, 0.0)]),

            sway_max_input: 0.8,
            sway_bound_hipfire: 4.0,
            sway_bound_ads: 1.2,

            hipfire_pose: [0.22, -0.18, 0.45],
            ads_pose: [0.0, -0.09, 0.3],
            sprint_pose: [0.28, -0.26, 0.4],
            pose_smooth_time: 0.08,
        }
    }
}

// ===== Targets =====

/// Range-target placement and knock-down tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// How many targets to place.
    pub count: usize,
    /// Spawn position ranges, `[min, max]` per axis.
    pub x_range: [f32; 2],
    pub y_range: [f32; 2],
    pub z_range: [f32; 2],
    /// Pose a hit target tips toward, Euler degrees.
    pub fallen_rotation: [f32; 3],
    /// Degrees per second a hit target rotates toward the fallen pose.
    pub fall_speed: f32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            count: 3,
            x_range: [12.0, 18.0],
            y_range: [2.0, 2.0],
            z_range: [-2.0, 2.0],
            fallen_rotation: [90.0, 0.0, 0.0],
            fall_speed: 240.0,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("fall_speed", self.fall_speed)?;
        for (name, range) in [
            ("x_range", self.x_range),
            ("y_range", self.y_range),
            ("z_range", self.z_range),
        ] {
            if range[0] > range[1] {
                return Err(ConfigError::RangeInverted {
                    name,
                    min: range[0],
                    max: range[1],
                });
            }
        }
        Ok(())
    }
}

// ===== Controller =====

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub input: InputConfig,
    pub aim: AimConfig,
    pub movement: MovementConfig,
    pub weapon: WeaponConfig,
}

impl ControllerConfig {
    /// Checks every invariant the runtime relies on. Called once before the
    /// first update; a failure here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let input = &self.input;
        if !(0.0..1.0).contains(&input.inner_dead_zone)
            || input.outer_dead_zone <= input.inner_dead_zone
            || input.outer_dead_zone > 1.0
        {
            return Err(ConfigError::DeadZoneOrder {
                inner: input.inner_dead_zone,
                outer: input.outer_dead_zone,
            });
        }
        if !(input.trigger_dead_zone > 0.0 && input.trigger_dead_zone < 1.0) {
            return Err(ConfigError::TriggerDeadZone {
                value: input.trigger_dead_zone,
            });
        }
        if !input.stick_curve.is_monotonic() {
            return Err(ConfigError::CurveNotMonotonic);
        }

        let aim = &self.aim;
        for profile in [&aim.hipfire, &aim.ads] {
            require_positive("ramp_up_time", profile.ramp_up_time)?;
            require_non_negative("ramp_up_delay", profile.ramp_up_delay)?;
            require_positive("yaw_speed", profile.yaw_speed)?;
            require_positive("pitch_speed", profile.pitch_speed)?;
        }
        if aim.max_down_angle >= aim.max_up_angle {
            return Err(ConfigError::PitchClampInverted {
                down: aim.max_down_angle,
                up: aim.max_up_angle,
            });
        }
        require_positive("hipfire_fov", aim.hipfire_fov)?;
        require_positive("ads_fov", aim.ads_fov)?;
        require_positive("ads_transition_time", aim.ads_transition_time)?;

        let movement = &self.movement;
        require_positive("min_move_speed", movement.min_move_speed)?;
        require_positive("max_move_speed", movement.max_move_speed)?;
        require_positive("sprint_speed", movement.sprint_speed)?;
        if movement.sprint_speed < movement.max_move_speed {
            return Err(ConfigError::SprintSlowerThanWalk {
                sprint: movement.sprint_speed,
                walk: movement.max_move_speed,
            });
        }
        require_positive("gravity", movement.gravity)?;
        require_positive("body_radius", movement.body_radius)?;
        require_positive("body_height", movement.body_height)?;
        require_positive("eye_height", movement.eye_height)?;
        require_positive("ground_cast_distance", movement.ground_cast_distance)?;
        require_positive("shimmy_speed", movement.shimmy_speed)?;
        require_positive("pipe_climb_speed", movement.pipe_climb_speed)?;

        let weapon = &self.weapon;
        require_positive("fire_interval", weapon.fire_interval)?;
        require_positive("max_range", weapon.max_range)?;
        require_positive("recoil_duration", weapon.recoil_duration)?;
        require_positive("pose_smooth_time", weapon.pose_smooth_time)?;
        require_positive("sway_max_input", weapon.sway_max_input)?;
        require_positive("x_hit_duration", weapon.x_hit_duration)?;
        require_non_negative("spread_radius_hipfire", weapon.spread_radius_hipfire)?;
        require_non_negative("spread_radius_ads", weapon.spread_radius_ads)?;
        require_non_negative("recoil_force", weapon.recoil_force)?;
        require_non_negative("sway_bound_hipfire", weapon.sway_bound_hipfire)?;
        require_non_negative("sway_bound_ads", weapon.sway_bound_ads)?;

        Ok(())
    }
}
