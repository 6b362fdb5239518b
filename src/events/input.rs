//! Input events.
//!
//! An [`InputEvent`] is raw input: an action and the phase it fired in,
//! plus a 2D axis value for Move/Look. The dispatcher in
//! [`crate::systems::input`] looks the pair up in
//! [`InputBindings`](crate::resources::input::InputBindings) and triggers a
//! [`PawnCommandEvent`] for the possessed pawn.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::resources::input::{InputAction, PawnCommand, TriggerPhase};

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub action: InputAction,
    pub phase: TriggerPhase,
    pub axis: Vec2,
}

impl InputEvent {
    pub fn new(action: InputAction, phase: TriggerPhase) -> Self {
        InputEvent {
            action,
            phase,
            axis: Vec2::ZERO,
        }
    }

    pub fn with_axis(mut self, axis: Vec2) -> Self {
        self.axis = axis;
        self
    }
}

/// A bound command addressed to a pawn.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PawnCommandEvent {
    pub pawn: Entity,
    pub command: PawnCommand,
    pub axis: Vec2,
}
