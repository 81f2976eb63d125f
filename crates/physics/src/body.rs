//! The controller's kinematic body.
//!
//! Position is at the feet (bottom-center of the collision volume). The
//! controller writes velocity and occasionally teleports the position; the
//! simulation integrates once per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single kinematic rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    /// Feet position in world space.
    pub position: Vec3,

    /// Velocity in meters/second.
    pub velocity: Vec3,

    /// Whether gravity applies during integration. Climbing modes switch
    /// this off and must switch it back on when they exit.
    pub gravity_enabled: bool,
}

impl RigidBody {
    /// Create a body at rest at the given position, gravity on.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            gravity_enabled: true,
        }
    }

    /// Add an instantaneous velocity change (unit mass).
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }

    /// Move the body to a new position, zeroing velocity.
    ///
    /// Every teleport zeroes velocity in the same update so no residual
    /// motion carries across the jump in position.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }

    /// Zero all velocity.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Advance position by one time step.
    pub fn integrate(&mut self, gravity: f32, delta_time: f32) {
        if self.gravity_enabled {
            self.velocity.y -= gravity * delta_time;
        }
        self.position += self.velocity * delta_time;
    }

    /// Current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}
