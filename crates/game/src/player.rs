//! The player controller facade.
//!
//! Owns every per-player subsystem (aim, locomotion, fire control, weapon
//! pose) and advances them in a fixed order each frame: condition input,
//! rotate the camera, move the body, fire, then settle the viewmodel. The
//! caller integrates the body afterwards.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use ironsight_physics::{QueryWorld, RigidBody};

use crate::aim::{AimModel, CameraOrientation};
use crate::config::{ConfigError, ControllerConfig};
use crate::input::{self, InputState};
use crate::locomotion::{Locomotion, MovementMode};
use crate::random::SeededRandom;
use crate::weapon::{FireControl, ShotEvent, WeaponPose};

/// Everything a renderer or test needs from one controller frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutput {
    pub camera: CameraOrientation,
    pub fov: f32,
    pub eye_position: Vec3,
    pub mode: MovementMode,
    pub weapon_position: Vec3,
    pub weapon_sway: Vec2,
    pub weapon_recoil: f32,
    pub hit_marker: Option<Vec3>,
    pub x_hit_visible: bool,
    pub shot: Option<ShotEvent>,
}

/// Per-player state machine over all controller subsystems.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: ControllerConfig,
    aim: AimModel,
    locomotion: Locomotion,
    fire: FireControl,
    pose: WeaponPose,
    rng: SeededRandom,
}

impl PlayerController {
    /// Build a controller. The configuration is validated here; a bad config
    /// is fatal before the first frame runs.
    pub fn new(config: ControllerConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            aim: AimModel::new(&config.aim),
            locomotion: Locomotion::new(),
            fire: FireControl::new(),
            pose: WeaponPose::new(&config.weapon),
            rng: SeededRandom::new(seed),
            config,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn mode(&self) -> MovementMode {
        self.locomotion.mode
    }

    /// Advance the controller by one frame.
    pub fn update(
        &mut self,
        input: &InputState,
        world: &QueryWorld,
        body: &mut RigidBody,
        delta_time: f32,
    ) -> FrameOutput {
        let aim_stick = input::condition(input.aim, &self.config.input);
        let move_stick = input::condition(input.movement, &self.config.input);
        let ads = input.ads_value > self.config.input.trigger_dead_zone;

        self.aim.update(aim_stick, ads, &self.config.aim, delta_time);
        let camera = self.aim.orientation();

        self.locomotion.update(
            input, move_stick, &camera, ads, world, body, &self.config, delta_time,
        );
        let sprinting = self.locomotion.mode == MovementMode::Sprinting;

        let eye = body.position + Vec3::Y * self.config.movement.eye_height;
        let shot = self.fire.update(
            input.fire_value,
            self.config.input.trigger_dead_zone,
            ads,
            eye,
            &camera,
            world,
            &mut self.rng,
            &self.config.weapon,
            delta_time,
        );
        if shot.is_some() {
            self.pose.on_fired();
        }
        self.pose
            .update(aim_stick, ads, sprinting, &self.config.weapon, delta_time);

        FrameOutput {
            camera,
            fov: self.aim.fov(),
            eye_position: eye,
            mode: self.locomotion.mode,
            weapon_position: self.pose.position,
            weapon_sway: self.pose.sway,
            weapon_recoil: self.pose.recoil_offset,
            hit_marker: self.fire.hit_marker,
            x_hit_visible: self.fire.x_hit_visible(),
            shot,
        }
    }
}
