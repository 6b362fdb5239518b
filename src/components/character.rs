//! Pawn tags.
//!
//! Overlap triggers only react to [`Character`] entities, and input is
//! routed to whichever pawn carries [`Possessed`].

use bevy_ecs::prelude::Component;

/// Tag for player characters. Only these collect pickups by touch.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Character;

/// Tag for the pawn currently receiving player input.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Possessed;

/// Control rotation of the player controller driving a pawn.
///
/// Look input accumulates here; movement input is expressed relative to its
/// yaw.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    /// Pitch limit in degrees, either direction.
    pub const PITCH_LIMIT: f32 = 89.0;

    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = crate::components::rotation::normalize_degrees(self.yaw + degrees);
    }

    pub fn add_pitch(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }
}
