//! Locomotion state machine.
//!
//! One mode is active per frame: ground movement (walking or sprinting),
//! airborne, hanging from a ledge, or climbing a pipe. Climbing modes own
//! the body while active: they disable gravity on entry and every exit path
//! re-enables it. All position jumps go through `RigidBody::teleport`, which
//! zeroes velocity in the same update.

mod probes;

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use ironsight_physics::{QueryWorld, RigidBody};

use crate::aim::CameraOrientation;
use crate::config::{ControllerConfig, MovementConfig};
use crate::input::InputState;

/// An acquired ledge: the point on the top edge and the outward wall normal
/// (pointing back at the player).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgeGrab {
    pub grab_point: Vec3,
    pub normal: Vec3,
}

/// An acquired pipe: its brush id, vertical extent, and horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeGrab {
    pub brush: u32,
    /// Pipe center on the ground plane (world x, world z).
    pub axis: Vec2,
    pub top: f32,
    pub bottom: f32,
    /// Where the body was when it attached.
    pub entry_point: Vec3,
}

/// The active movement mode. Climbing modes carry their grab state in the
/// variant so a mode can never outlive its grab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    Grounded,
    Sprinting,
    Airborne,
    LedgeShimmy(LedgeGrab),
    PipeClimb(PipeGrab),
}

/// Locomotion state advanced once per frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Locomotion {
    pub mode: MovementMode,
    /// Counts down after a ledge release before another grab can start.
    /// Landing clears it outright.
    regrab_timer: f32,
    /// Pipe released this airtime; cannot be re-grabbed until landing.
    ignored_pipe: Option<u32>,
}

impl Locomotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame. `movement` is the conditioned move stick; the raw
    /// stick is read from `input` where gating needs pre-conditioned
    /// magnitudes.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &InputState,
        movement: Vec2,
        camera: &CameraOrientation,
        ads: bool,
        world: &QueryWorld,
        body: &mut RigidBody,
        config: &ControllerConfig,
        delta_time: f32,
    ) {
        self.regrab_timer = (self.regrab_timer - delta_time).max(0.0);

        match self.mode {
            MovementMode::LedgeShimmy(grab) => {
                self.update_ledge(&grab, input, movement, camera, world, body, &config.movement)
            }
            MovementMode::PipeClimb(grab) => {
                self.update_pipe(&grab, input, movement, camera, body, &config.movement, delta_time)
            }
            _ => self.update_free(input, movement, camera, ads, world, body, config),
        }
    }

    // ===== Ground and air =====

    #[allow(clippy::too_many_arguments)]
    fn update_free(
        &mut self,
        input: &InputState,
        movement: Vec2,
        camera: &CameraOrientation,
        ads: bool,
        world: &QueryWorld,
        body: &mut RigidBody,
        config: &ControllerConfig,
    ) {
        let movement_config = &config.movement;
        let ground = probes::ground_hit(world, movement_config, body.position)
            .filter(|_| body.velocity.y <= 0.1);

        let Some(ground) = ground else {
            if self.mode != MovementMode::Airborne {
                self.mode = MovementMode::Airborne;
            }
            self.try_acquire_climb(camera, world, body, movement_config);
            return;
        };

        if self.mode == MovementMode::Airborne {
            debug!("landed at {:?}", body.position);
            self.regrab_timer = 0.0;
            self.ignored_pipe = None;
        }

        // Stick to the surface.
        body.position.y = ground.point.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }

        let sprinting = self.resolve_sprint(input, config);

        let magnitude = movement.length();
        if magnitude <= f32::EPSILON {
            // Stop horizontally; vertical velocity is not touched.
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        } else {
            let speed = if sprinting {
                movement_config.sprint_speed
            } else {
                let walk = movement_config.min_move_speed
                    + (movement_config.max_move_speed - movement_config.min_move_speed)
                        * magnitude.min(1.0);
                if ads {
                    walk * config.aim.fov_ratio()
                } else {
                    walk
                }
            };
            let direction = (camera.flat_forward() * movement.y
                + camera.flat_right() * movement.x)
                .normalize_or_zero();
            body.velocity.x = direction.x * speed;
            body.velocity.z = direction.z * speed;
        }

        self.mode = if sprinting {
            MovementMode::Sprinting
        } else {
            MovementMode::Grounded
        };

        if input.jump_pressed {
            body.velocity.y = movement_config.jump_impulse;
            self.mode = MovementMode::Airborne;
        }
    }

    /// Sprint gating on the raw stick: the magnitude check runs before the
    /// cone check, both for entering and staying in sprint.
    fn resolve_sprint(&self, input: &InputState, config: &ControllerConfig) -> bool {
        let raw = input.movement;
        let magnitude = raw.length();
        if magnitude < config.input.outer_dead_zone {
            return false;
        }
        if forward_angle(raw) > config.movement.sprint_cone_angle {
            return false;
        }
        self.mode == MovementMode::Sprinting || input.sprint_pressed
    }

    fn try_acquire_climb(
        &mut self,
        camera: &CameraOrientation,
        world: &QueryWorld,
        body: &mut RigidBody,
        config: &MovementConfig,
    ) {
        if self.regrab_timer <= 0.0 {
            if let Some(grab) =
                probes::find_ledge(world, config, body.position, camera.flat_forward())
            {
                self.attach_ledge(grab, body, config);
                return;
            }
        }
        if let Some(id) = probes::pipe_overlap(world, config, body.position) {
            if self.ignored_pipe != Some(id) {
                self.attach_pipe(id, world, body);
            }
        }
    }

    // ===== Ledge =====

    fn attach_ledge(&mut self, grab: LedgeGrab, body: &mut RigidBody, config: &MovementConfig) {
        let hang = Vec3::new(
            grab.grab_point.x + grab.normal.x * config.hang_depth,
            grab.grab_point.y - config.hang_height,
            grab.grab_point.z + grab.normal.z * config.hang_depth,
        );
        body.teleport(hang);
        body.gravity_enabled = false;
        self.mode = MovementMode::LedgeShimmy(grab);
        debug!("grabbed ledge at {:?}", grab.grab_point);
    }

    #[allow(clippy::too_many_arguments)]
    fn update_ledge(
        &mut self,
        grab: &LedgeGrab,
        input: &InputState,
        movement: Vec2,
        camera: &CameraOrientation,
        world: &QueryWorld,
        body: &mut RigidBody,
        config: &MovementConfig,
    ) {
        if input.jump_pressed {
            let away = flat_angle_between(camera.flat_forward(), -grab.normal);
            if away > config.jump_away_angle {
                // Facing away from the wall: launch off it. Eligible to grab
                // again right away.
                body.velocity = grab.normal * config.jump_away_impulse
                    + Vec3::Y * config.jump_away_vertical_impulse;
                body.gravity_enabled = true;
                self.mode = MovementMode::Airborne;
                self.regrab_timer = 0.0;
                debug!("ledge jump-away");
            } else if probes::mantle_clear(world, config, grab) {
                self.mantle(grab, body, config);
            } else {
                // Not enough room to mantle; boost straight up instead.
                body.velocity = Vec3::Y * config.climb_up_impulse;
                body.gravity_enabled = true;
                self.mode = MovementMode::Airborne;
                self.regrab_timer = config.climb_regrab_delay;
                debug!("ledge climb-up");
            }
            return;
        }

        if input.crouch_pressed {
            body.halt();
            body.gravity_enabled = true;
            self.mode = MovementMode::Airborne;
            self.regrab_timer = config.ledge_regrab_delay;
            debug!("dropped from ledge");
            return;
        }

        // Looking too far away from the wall locks shimmy movement.
        let facing = flat_angle_between(camera.flat_forward(), -grab.normal);
        if facing > config.facing_lock_angle {
            body.halt();
            return;
        }

        let lateral = movement.x;
        if lateral.abs() <= f32::EPSILON {
            body.halt();
            return;
        }

        let tangent = Vec3::Y.cross(grab.normal).normalize_or_zero();
        let side = tangent * lateral.signum();
        if probes::ledge_continues(world, config, grab, body.position, side) {
            body.velocity = tangent * (lateral * config.shimmy_speed);
        } else {
            // Edge ends here.
            body.halt();
        }
    }

    fn mantle(&mut self, grab: &LedgeGrab, body: &mut RigidBody, config: &MovementConfig) {
        body.teleport(probes::mantle_destination(config, grab));
        body.gravity_enabled = true;
        self.mode = MovementMode::Airborne;
        self.regrab_timer = config.climb_regrab_delay;
        debug!("mantled to {:?}", body.position);
    }

    // ===== Pipe =====

    fn attach_pipe(&mut self, id: u32, world: &QueryWorld, body: &mut RigidBody) {
        let Some((min, max)) = world.brush_bounds(id) else {
            return;
        };
        let axis = Vec2::new((min.x + max.x) * 0.5, (min.z + max.z) * 0.5);
        let grab = PipeGrab {
            brush: id,
            axis,
            top: max.y,
            bottom: min.y,
            entry_point: body.position,
        };
        let snapped = Vec3::new(
            axis.x,
            body.position.y.clamp(grab.bottom, grab.top),
            axis.y,
        );
        body.teleport(snapped);
        body.gravity_enabled = false;
        self.mode = MovementMode::PipeClimb(grab);
        debug!("grabbed pipe {id}");
    }

    #[allow(clippy::too_many_arguments)]
    fn update_pipe(
        &mut self,
        grab: &PipeGrab,
        input: &InputState,
        movement: Vec2,
        camera: &CameraOrientation,
        body: &mut RigidBody,
        config: &MovementConfig,
        delta_time: f32,
    ) {
        if input.jump_pressed || input.crouch_pressed {
            body.halt();
            body.gravity_enabled = true;
            self.mode = MovementMode::Airborne;
            self.ignored_pipe = Some(grab.brush);
            debug!("released pipe {}", grab.brush);
            return;
        }

        let climb = movement.y;
        body.velocity = Vec3::new(0.0, climb * config.pipe_climb_speed, 0.0);

        if body.position.y >= grab.top - config.body_height * 0.5 {
            // Reached the top: mantle off toward the camera facing.
            let exit = Vec3::new(grab.axis.x, grab.top, grab.axis.y)
                + camera.flat_forward() * config.pipe_exit_offset;
            body.teleport(exit);
            body.gravity_enabled = true;
            self.mode = MovementMode::Airborne;
            self.ignored_pipe = Some(grab.brush);
            debug!("exited pipe {} at top", grab.brush);
        } else if body.position.y + body.velocity.y * delta_time < grab.bottom {
            // Clamp the descent so integration lands exactly on the bottom.
            body.velocity.y = (grab.bottom - body.position.y) / delta_time;
        }
    }
}

// ===== Angle helpers =====

/// Angle in degrees between two directions projected onto the ground plane.
fn flat_angle_between(a: Vec3, b: Vec3) -> f32 {
    let a = Vec3::new(a.x, 0.0, a.z).normalize_or_zero();
    let b = Vec3::new(b.x, 0.0, b.z).normalize_or_zero();
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle in degrees of the move stick away from straight forward.
fn forward_angle(stick: Vec2) -> f32 {
    let magnitude = stick.length();
    if magnitude <= f32::EPSILON {
        return 180.0;
    }
    (stick.y / magnitude).clamp(-1.0, 1.0).acos().to_degrees()
}
