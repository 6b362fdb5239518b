//! Input dispatch resources.
//!
//! Raw input arrives as [`InputEvent`](crate::events::input::InputEvent)s
//! carrying an [`InputAction`] and the [`TriggerPhase`] it fired in. The
//! [`InputBindings`] table maps each pair to a [`PawnCommand`] which the
//! possessed pawn then executes. Headless sessions feed input through an
//! [`InputScript`] loaded with the level.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::gameconfig::ConfigError;

/// Abstract input actions a pawn can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    Jump,
    Move,
    Look,
    Interact,
    Sprint,
    Crouch,
    Dash,
}

/// Phase of an input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    Started,
    Triggered,
    Completed,
}

/// Commands a pawn controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PawnCommand {
    Jump,
    StopJumping,
    Move,
    Look,
    Interact,
    StartSprint,
    StopSprint,
    StartCrouch,
    StopCrouch,
    Dash,
}

/// Table of `(action, phase) -> command`.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputBindings {
    map: FxHashMap<(InputAction, TriggerPhase), PawnCommand>,
}

impl InputBindings {
    /// Default bindings for the hero character.
    pub fn default_hero() -> Self {
        use InputAction as A;
        use PawnCommand as C;
        use TriggerPhase as P;
        let mut bindings = Self::default();
        bindings
            .bind(A::Jump, P::Triggered, C::Jump)
            .bind(A::Jump, P::Completed, C::StopJumping)
            .bind(A::Move, P::Triggered, C::Move)
            .bind(A::Look, P::Triggered, C::Look)
            .bind(A::Interact, P::Triggered, C::Interact)
            .bind(A::Sprint, P::Started, C::StartSprint)
            .bind(A::Sprint, P::Completed, C::StopSprint)
            .bind(A::Crouch, P::Started, C::StartCrouch)
            .bind(A::Crouch, P::Completed, C::StopCrouch)
            .bind(A::Dash, P::Triggered, C::Dash);
        bindings
    }

    pub fn bind(&mut self, action: InputAction, phase: TriggerPhase, command: PawnCommand) -> &mut Self {
        self.map.insert((action, phase), command);
        self
    }

    pub fn unbind(&mut self, action: InputAction, phase: TriggerPhase) -> Option<PawnCommand> {
        self.map.remove(&(action, phase))
    }

    pub fn command_for(&self, action: InputAction, phase: TriggerPhase) -> Option<PawnCommand> {
        self.map.get(&(action, phase)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Check that every required `(action, phase)` pair has a binding.
    ///
    /// Returns the first missing pair as [`ConfigError::MissingInputAction`].
    pub fn validate(&self, required: &[(InputAction, TriggerPhase)]) -> Result<(), ConfigError> {
        for (action, phase) in required {
            if !self.map.contains_key(&(*action, *phase)) {
                return Err(ConfigError::MissingInputAction {
                    action: format!("{:?}", action),
                    phase: format!("{:?}", phase),
                });
            }
        }
        Ok(())
    }
}

/// Pairs the hero cannot be driven without.
pub const REQUIRED_HERO_BINDINGS: &[(InputAction, TriggerPhase)] = &[
    (InputAction::Move, TriggerPhase::Triggered),
    (InputAction::Look, TriggerPhase::Triggered),
    (InputAction::Jump, TriggerPhase::Triggered),
    (InputAction::Interact, TriggerPhase::Triggered),
];

/// One scripted input. Fires on `frame`, and on every frame up to `until`
/// when set (a held input).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub frame: u64,
    #[serde(default)]
    pub until: Option<u64>,
    pub action: InputAction,
    pub phase: TriggerPhase,
    #[serde(default)]
    pub axis: Vec2,
}

impl ScriptedInput {
    pub fn last_frame(&self) -> u64 {
        self.until.unwrap_or(self.frame).max(self.frame)
    }

    pub fn is_active(&self, frame: u64) -> bool {
        frame >= self.frame && frame <= self.last_frame()
    }
}

/// Input timeline replayed by the headless runner.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputScript {
    inputs: Vec<ScriptedInput>,
}

impl InputScript {
    pub fn new(mut inputs: Vec<ScriptedInput>) -> Self {
        inputs.sort_by_key(|i| i.frame);
        InputScript { inputs }
    }

    /// Inputs firing on `frame`, in script order.
    pub fn due(&self, frame: u64) -> impl Iterator<Item = &ScriptedInput> {
        self.inputs.iter().filter(move |i| i.is_active(frame))
    }

    /// True once no input fires on `frame` or later.
    pub fn is_finished(&self, frame: u64) -> bool {
        self.inputs.iter().all(|i| i.last_frame() < frame)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hero_bindings() {
        let b = InputBindings::default_hero();
        assert_eq!(
            b.command_for(InputAction::Jump, TriggerPhase::Triggered),
            Some(PawnCommand::Jump)
        );
        assert_eq!(
            b.command_for(InputAction::Jump, TriggerPhase::Completed),
            Some(PawnCommand::StopJumping)
        );
        assert_eq!(
            b.command_for(InputAction::Sprint, TriggerPhase::Started),
            Some(PawnCommand::StartSprint)
        );
        assert_eq!(
            b.command_for(InputAction::Crouch, TriggerPhase::Completed),
            Some(PawnCommand::StopCrouch)
        );
        assert_eq!(b.command_for(InputAction::Dash, TriggerPhase::Started), None);
        assert!(b.validate(REQUIRED_HERO_BINDINGS).is_ok());
    }

    #[test]
    fn missing_required_binding_is_an_error() {
        let mut b = InputBindings::default_hero();
        b.unbind(InputAction::Move, TriggerPhase::Triggered);
        let err = b.validate(REQUIRED_HERO_BINDINGS).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingInputAction {
                action: "Move".into(),
                phase: "Triggered".into()
            }
        );
    }

    fn scripted(frame: u64, until: Option<u64>, action: InputAction) -> ScriptedInput {
        ScriptedInput {
            frame,
            until,
            action,
            phase: TriggerPhase::Triggered,
            axis: Vec2::ZERO,
        }
    }

    #[test]
    fn script_fires_on_frame_and_while_held() {
        let script = InputScript::new(vec![
            scripted(5, None, InputAction::Dash),
            scripted(1, Some(3), InputAction::Move),
        ]);
        assert_eq!(script.due(0).count(), 0);
        for frame in 1..=3 {
            let due: Vec<_> = script.due(frame).map(|i| i.action).collect();
            assert_eq!(due, vec![InputAction::Move]);
        }
        assert_eq!(script.due(4).count(), 0);
        let due: Vec<_> = script.due(5).map(|i| i.action).collect();
        assert_eq!(due, vec![InputAction::Dash]);
        assert!(!script.is_finished(5));
        assert!(script.is_finished(6));
    }

    #[test]
    fn scripted_input_parses_from_json() {
        let json = r#"{"frame": 2, "action": "move", "phase": "triggered", "axis": [0.0, 1.0]}"#;
        let input: ScriptedInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.action, InputAction::Move);
        assert_eq!(input.until, None);
        assert_eq!(input.axis, Vec2::new(0.0, 1.0));
    }
}
