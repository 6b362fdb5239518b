//! Sphere collider used for overlap triggers and interaction ray probes.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct SphereCollider {
    pub radius: f32,
    pub offset: Vec3,
}

impl SphereCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Center of the sphere for an entity at `position`.
    pub fn center(&self, position: Vec3) -> Vec3 {
        position + self.offset
    }

    /// Sphere vs sphere overlap test. Touching spheres do not overlap.
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        let reach = self.radius.abs() + other.radius.abs();
        self.center(position)
            .distance_squared(other.center(other_position))
            < reach * reach
    }

    /// Distance along a ray to the first intersection with this sphere.
    ///
    /// `direction` must be normalized. Returns `None` when the ray misses or
    /// the hit lies beyond `max_distance`. A ray starting inside the sphere
    /// hits at distance zero.
    pub fn ray_hit(
        &self,
        position: Vec3,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<f32> {
        let to_center = self.center(position) - origin;
        let r2 = self.radius * self.radius;
        if to_center.length_squared() <= r2 {
            return Some(0.0);
        }
        let along = to_center.dot(direction);
        if along < 0.0 {
            return None;
        }
        let perp2 = to_center.length_squared() - along * along;
        if perp2 > r2 {
            return None;
        }
        let hit = along - (r2 - perp2).sqrt();
        (hit <= max_distance).then_some(hit)
    }
}
