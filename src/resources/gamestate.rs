//! Session state resources.
//!
//! [`GameState`] holds the state the session is in; [`NextGameState`] holds
//! a transition requested by a system. The transition is applied by
//! `crate::events::gamestate::observe_gamestate_change_event`, which also
//! runs the enter hooks registered in the systems store.

use bevy_ecs::prelude::Resource;

/// Discrete states of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Level is being spawned.
    Setup,
    Playing,
    /// A level result has been recorded. Simulation keeps ticking.
    Completed,
}

impl GameStates {
    /// Name of the enter hook in the systems store, if the state has one.
    pub fn enter_hook(&self) -> Option<&'static str> {
        match self {
            GameStates::None => None,
            GameStates::Setup => Some("setup"),
            GameStates::Playing => Some("enter_play"),
            GameStates::Completed => Some("enter_completed"),
        }
    }
}

/// A requested transition, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> GameStates {
        self.current
    }

    /// Overwrite the state without running hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> NextGameStates {
        self.next
    }

    /// Mark `next` as pending. `check_pending_state` picks it up.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_transition_round_trip() {
        let mut next = NextGameState::new();
        assert_eq!(next.get(), NextGameStates::Unchanged);
        next.set(GameStates::Playing);
        assert_eq!(next.get(), NextGameStates::Pending(GameStates::Playing));
        next.reset();
        assert_eq!(next.get(), NextGameStates::Unchanged);
    }

    #[test]
    fn only_none_has_no_hook() {
        assert_eq!(GameStates::None.enter_hook(), None);
        assert_eq!(GameStates::Completed.enter_hook(), Some("enter_completed"));
    }
}
