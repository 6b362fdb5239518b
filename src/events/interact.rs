//! Hero interaction results.

use bevy_ecs::prelude::*;

/// The hero interacted with `target`. `collected` is set when the target
/// was a pickup that got collected by this interaction.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractEvent {
    pub actor: Entity,
    pub target: Entity,
    pub collected: bool,
}
