//! Enemy patrol stub.
//!
//! An [`Enemy`] with a [`Patrol`] walks in a straight line to a randomly
//! chosen waypoint; on arrival it raises
//! [`MoveCompletedEvent`](crate::events::enemy::MoveCompletedEvent) and picks
//! another one. There is no path finding.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use smallvec::SmallVec;

/// Tag for hostile characters. Touching the possessed hero fails the level.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

#[derive(Component, Debug, Clone)]
pub struct Patrol {
    pub waypoints: SmallVec<[Vec3; 8]>,
    /// Index into `waypoints` currently walked toward.
    pub target: Option<usize>,
    /// Index of the waypoint the enemy last arrived at.
    pub reached: Option<usize>,
    pub speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub acceptance_radius: f32,
}

impl Patrol {
    pub fn new(waypoints: impl IntoIterator<Item = Vec3>, speed: f32) -> Self {
        Self {
            waypoints: waypoints.into_iter().collect(),
            target: None,
            reached: None,
            speed,
            acceptance_radius: 10.0,
        }
    }

    pub fn target_point(&self) -> Option<Vec3> {
        self.target.and_then(|i| self.waypoints.get(i).copied())
    }
}
