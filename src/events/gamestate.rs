//! Game state transition event and observer.
//!
//! Systems request a change by setting [`NextGameState`].
//! `check_pending_state` then triggers [`GameStateChangedEvent`], and
//! [`observe_gamestate_change_event`] applies the transition and runs the
//! enter hook registered for the new state in [`SystemsStore`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;

#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Apply a pending transition.
///
/// - Reads the intent from [`NextGameState`]; nothing happens if unchanged.
/// - Copies the new value into [`GameState`] and clears the request.
/// - Runs the enter hook named by [`GameStates::enter_hook`], if registered.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
    systems_store: Res<SystemsStore>,
) {
    match next_game_state.get() {
        Pending(new_state) => {
            let old_state = game_state.get();
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state);
            next_game_state.reset();
            on_state_enter(new_state, &mut commands, &systems_store);
        }
        Unchanged => debug!("No state change pending."),
    }
}

fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let Some(hook) = state.enter_hook() else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.get(hook) {
        Some(id) => {
            commands.run_system(id);
        }
        None => warn!("No '{}' system registered for {:?}", hook, state),
    }
}
