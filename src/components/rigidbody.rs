//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity written by controller systems and
//! integrated by [`crate::systems::movement::movement`]. Pawns walk on the
//! ground plane; bodies with `gravity` set are pulled down while airborne and
//! come to rest at `z = 0`.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Downward acceleration in world units per second squared.
pub const GRAVITY: f32 = 980.0;

/// Kinematic body storing velocity and a pending one-shot launch impulse.
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Velocity change applied once on the next movement step (dash, jump).
    pub impulse: Vec3,
    /// Whether gravity applies while above the ground plane.
    pub gravity: bool,
    /// Deceleration applied to horizontal speed above the walk limit, per second.
    pub braking: f32,
    /// When true, movement skips this body entirely.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a floating body with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            impulse: Vec3::ZERO,
            gravity: false,
            braking: 0.0,
            frozen: false,
        }
    }

    /// Create a body affected by gravity with the given horizontal braking.
    pub fn grounded(braking: f32) -> Self {
        Self {
            gravity: true,
            braking,
            ..Self::new()
        }
    }

    /// Queue a velocity change, like launching a character.
    pub fn launch(&mut self, delta_v: Vec3) {
        self.impulse += delta_v;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}
