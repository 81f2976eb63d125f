//! Headless simulation: a fixed-rate loop over one player in a test arena.
//!
//! Each tick runs the controller, integrates the body, resolves shot events
//! against the registered targets, and advances target animation. Given the
//! same seed and input script, every run is bitwise identical.

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use ironsight_physics::{ContentFlags, QueryWorld, RigidBody};

use crate::config::{ConfigError, ControllerConfig, TargetConfig};
use crate::input::InputState;
use crate::player::{FrameOutput, PlayerController};
use crate::random::SeededRandom;
use crate::target::Target;

/// Fixed-step loop parameters and arena-level tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Seed for the controller's spread RNG and target placement.
    pub seed: u32,
    /// Target placement and knock-down tuning.
    pub targets: TargetConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            seed: 0x5EED,
            targets: TargetConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// One player in a static arena.
pub struct Simulation {
    config: SimulationConfig,
    world: QueryWorld,
    body: RigidBody,
    controller: PlayerController,
    targets: Vec<Target>,
    frame: u64,
}

impl Simulation {
    /// Build the test arena: a floor, a climbable ledge wall, a pipe, and
    /// knock-down targets placed inside the configured spawn ranges.
    pub fn new(
        controller_config: ControllerConfig,
        config: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        config.targets.validate()?;
        let controller = PlayerController::new(controller_config, config.seed)?;

        let mut world = QueryWorld::new();
        let mut targets = Vec::new();

        // Floor with its top at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            ContentFlags::SOLID,
        );

        // Ledge wall off to the left of the range
        world.add_box(
            Vec3::new(5.0, 1.5, -8.0),
            Vec3::new(0.5, 1.5, 4.0),
            ContentFlags::SOLID,
        );

        // Climbing pipe behind the spawn
        world.add_box(
            Vec3::new(-6.0, 3.0, 0.0),
            Vec3::new(0.15, 3.0, 0.15),
            ContentFlags::PIPE,
        );

        // Targets at seeded random positions inside the spawn ranges
        let mut spawn_rng = SeededRandom::new(config.seed);
        let tuning = &config.targets;
        for _ in 0..tuning.count {
            let position = Vec3::new(
                spawn_rng.next_range(tuning.x_range[0], tuning.x_range[1]),
                spawn_rng.next_range(tuning.y_range[0], tuning.y_range[1]),
                spawn_rng.next_range(tuning.z_range[0], tuning.z_range[1]),
            );
            let brush = world.add_box(position, Vec3::new(0.2, 2.0, 0.6), ContentFlags::TARGET);
            targets.push(Target::new(brush, tuning));
        }

        info!(
            "arena ready: {} brushes, {} targets",
            world.brush_count(),
            targets.len()
        );

        Ok(Self {
            config,
            world,
            body: RigidBody::new(Vec3::ZERO),
            controller,
            targets,
            frame: 0,
        })
    }

    pub fn world(&self) -> &QueryWorld {
        &self.world
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one fixed-step tick.
    pub fn tick(&mut self, input: &InputState) -> FrameOutput {
        let delta_time = self.config.delta_time();

        let output = self
            .controller
            .update(input, &self.world, &mut self.body, delta_time);
        self.body
            .integrate(self.controller.config().movement.gravity, delta_time);

        if let Some(hit) = output.shot.and_then(|shot| shot.hit) {
            if hit.is_target {
                if let Some(target) = self.targets.iter_mut().find(|t| t.brush == hit.brush) {
                    target.hit();
                    info!("frame {}: target {} down", self.frame, hit.brush);
                }
            }
        }
        for target in &mut self.targets {
            target.update(delta_time);
        }

        self.frame += 1;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn simulation() -> Simulation {
        Simulation::new(ControllerConfig::default(), SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_walk_forward_moves_down_range() {
        let mut sim = simulation();
        let input = InputState {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        for _ in 0..60 {
            sim.tick(&input);
        }
        // Yaw 0 faces +X; one second at max walk speed
        let expected = sim.controller.config().movement.max_move_speed;
        assert!((sim.body().position.x - expected).abs() < 0.2);
        assert!(sim.body().position.z.abs() < 1e-3);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut sim = simulation();
        let jump = InputState {
            jump_pressed: true,
            ..Default::default()
        };
        sim.tick(&jump);
        let mut peak = 0.0_f32;
        for _ in 0..120 {
            let out = sim.tick(&InputState::default());
            peak = peak.max(sim.body().position.y);
            if out.mode == crate::locomotion::MovementMode::Grounded {
                break;
            }
        }
        assert!(peak > 0.3);
        assert!(sim.body().position.y.abs() < 0.05);
    }

    #[test]
    fn test_shooting_knocks_down_target() {
        // Pin a single target straight down the lane.
        let config = SimulationConfig {
            targets: TargetConfig {
                count: 1,
                x_range: [15.0, 15.0],
                y_range: [2.0, 2.0],
                z_range: [0.0, 0.0],
                ..Default::default()
            },
            ..Default::default()
        };
        let mut sim = Simulation::new(ControllerConfig::default(), config).unwrap();

        let fire = InputState {
            fire_value: 1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            sim.tick(&fire);
        }
        assert!(sim.targets()[0].is_hit());

        // Let it finish falling.
        for _ in 0..60 {
            sim.tick(&InputState::default());
        }
        assert!(sim.targets()[0].is_fallen());
    }

    #[test]
    fn test_targets_spawn_inside_configured_ranges() {
        let config = SimulationConfig {
            targets: TargetConfig {
                count: 8,
                x_range: [10.0, 20.0],
                y_range: [1.0, 3.0],
                z_range: [-4.0, 4.0],
                ..Default::default()
            },
            ..Default::default()
        };
        let sim = Simulation::new(ControllerConfig::default(), config).unwrap();
        assert_eq!(sim.targets().len(), 8);

        for target in sim.targets() {
            let (min, max) = sim.world().brush_bounds(target.brush).unwrap();
            let center = (min + max) * 0.5;
            assert!((10.0..=20.0).contains(&center.x), "x {}", center.x);
            assert!((1.0..=3.0).contains(&center.y), "y {}", center.y);
            assert!((-4.0..=4.0).contains(&center.z), "z {}", center.z);
        }
    }

    #[test]
    fn test_inverted_spawn_range_is_fatal() {
        let config = SimulationConfig {
            targets: TargetConfig {
                x_range: [5.0, 1.0],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Simulation::new(ControllerConfig::default(), config).is_err());
    }

    #[test]
    fn test_identical_scripts_replay_identically() {
        let script: Vec<InputState> = (0..240)
            .map(|frame| InputState {
                movement: Vec2::new(0.0, 1.0),
                aim: Vec2::new(if frame > 60 { 1.0 } else { 0.0 }, 0.0),
                fire_value: if frame % 3 == 0 { 1.0 } else { 0.0 },
                jump_pressed: frame == 120,
                sprint_pressed: frame == 10,
                ..Default::default()
            })
            .collect();

        let mut a = simulation();
        let mut b = simulation();
        let mut last_a = None;
        let mut last_b = None;
        for input in &script {
            last_a = Some(a.tick(input));
            last_b = Some(b.tick(input));
        }

        assert_eq!(a.body().position, b.body().position);
        assert_eq!(a.body().velocity, b.body().velocity);
        let (last_a, last_b) = (last_a.unwrap(), last_b.unwrap());
        assert_eq!(last_a.camera.yaw, last_b.camera.yaw);
        assert_eq!(last_a.camera.pitch, last_b.camera.pitch);
        assert_eq!(last_a.weapon_position, last_b.weapon_position);
    }
}
