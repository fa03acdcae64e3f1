//! Rigid body handle
//!
//! The slice of physics-engine state the game reads and writes: velocities,
//! the rotation flag, and impulse application. Integration happens elsewhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub velocity: Vec2,
    /// rad/s
    pub angular_velocity: f32,
    pub allows_rotation: bool,
    pub mass: f32,
    pub moment_of_inertia: f32,
}

impl RigidBody {
    pub fn new(mass: f32, moment_of_inertia: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            allows_rotation: true,
            mass,
            moment_of_inertia,
        }
    }

    /// Instantaneous change in linear momentum
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    /// Instantaneous change in angular momentum (ignored when rotation is locked)
    #[inline]
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.allows_rotation {
            self.angular_velocity += impulse / self.moment_of_inertia;
        }
    }
}
