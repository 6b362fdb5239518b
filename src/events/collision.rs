//! Begin-overlap notifications.
//!
//! [`crate::systems::overlap::overlap_detector`] triggers an
//! [`OverlapEvent`] on the first tick two sphere colliders overlap. The
//! pair is not re-reported until they separate and meet again.

use bevy_ecs::prelude::*;

/// Two entities started overlapping. No ordering between `a` and `b`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    pub a: Entity,
    pub b: Entity,
}

impl OverlapEvent {
    /// The participant that is not `entity`, if `entity` is one of the two.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}
