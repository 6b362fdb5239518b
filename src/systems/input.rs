//! Input systems.
//!
//! - [`replay_input_script`] feeds the [`InputScript`] into the world as
//!   [`InputEvent`]s, one frame at a time.
//! - [`observe_input_event`] routes an input through [`InputBindings`] to
//!   the entity carrying [`Possessed`] as a [`PawnCommandEvent`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{trace, warn};

use crate::components::character::Possessed;
use crate::events::input::{InputEvent, PawnCommandEvent};
use crate::resources::input::{InputBindings, InputScript};
use crate::resources::worldtime::WorldTime;

/// Trigger every scripted input due on the current frame.
pub fn replay_input_script(
    script: Res<InputScript>,
    world_time: Res<WorldTime>,
    mut commands: Commands,
) {
    for input in script.due(world_time.frame_count) {
        commands.trigger(InputEvent {
            action: input.action,
            phase: input.phase,
            axis: input.axis,
        });
    }
}

/// Translate an input into the bound pawn command.
///
/// Unbound pairs are ignored. Without a possessed pawn the input is dropped
/// with a warning.
pub fn observe_input_event(
    trigger: On<InputEvent>,
    mut commands: Commands,
    bindings: Res<InputBindings>,
    possessed: Query<Entity, With<Possessed>>,
) {
    let input = *trigger.event();
    let Some(command) = bindings.command_for(input.action, input.phase) else {
        trace!("No binding for {:?} {:?}", input.action, input.phase);
        return;
    };
    let Some(pawn) = possessed.iter().next() else {
        warn!("Input {:?} dropped, no pawn is possessed", input.action);
        return;
    };
    commands.trigger(PawnCommandEvent {
        pawn,
        command,
        axis: input.axis,
    });
}
