//! Enemy patrol events.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// A patrolling enemy reached its waypoint.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveCompletedEvent {
    pub enemy: Entity,
    pub position: Vec3,
}
