//! Time-to-live component for delayed entity removal.
//!
//! Collected pickups get a short [`Ttl`] so feedback can play before the
//! entity disappears. The [`ttl_system`](crate::systems::ttl::ttl_system)
//! counts it down and despawns the entity when it reaches zero.

use bevy_ecs::prelude::Component;

/// Time-to-live component that despawns its entity after a duration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
