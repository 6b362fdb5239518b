//! Hero character movement and interaction state.
//!
//! [`HeroController`] holds the tunables and the sprint/crouch/dash state of
//! the player character. The transition methods enforce the movement rules
//! and report whether anything changed; systems in
//! [`crate::systems::hero`] translate commands into calls on it and apply
//! the resulting speeds to the [`RigidBody`](super::rigidbody::RigidBody).
//!
//! Rules:
//! - sprint and crouch are mutually exclusive; starting one while the other
//!   is active does nothing
//! - dash is gated by `can_dash`, which a cooldown timer restores

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::resources::gameconfig::HeroSettings;

/// Timer signal used for the dash cooldown.
pub const DASH_COOLDOWN_SIGNAL: &str = "dash_cooldown";

/// Speed and capsule factor applied while crouching.
pub const CROUCH_FACTOR: f32 = 0.5;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct HeroController {
    /// Base walking speed in units per second.
    pub walk_speed: f32,
    pub sprint_multiplier: f32,
    pub dash_distance: f32,
    /// Seconds before another dash is allowed.
    pub dash_cooldown: f32,
    pub jump_z_velocity: f32,
    /// Base air control.
    pub air_control: f32,
    pub air_control_multiplier: f32,
    pub interaction_range: f32,
    /// Capsule half height while standing.
    pub capsule_half_height: f32,
    /// Movement input accumulated since the last locomotion step.
    pub pending_input: Vec3,

    is_sprinting: bool,
    is_crouching: bool,
    can_dash: bool,
    wants_jump: bool,
    air_control_boosted: bool,
}

impl Default for HeroController {
    fn default() -> Self {
        Self::from_settings(&HeroSettings::default())
    }
}

impl HeroController {
    pub fn from_settings(settings: &HeroSettings) -> Self {
        Self {
            walk_speed: settings.walk_speed,
            sprint_multiplier: settings.sprint_multiplier,
            dash_distance: settings.dash_distance,
            dash_cooldown: settings.dash_cooldown,
            jump_z_velocity: settings.jump_z_velocity,
            air_control: settings.air_control,
            air_control_multiplier: settings.air_control_multiplier,
            interaction_range: settings.interaction_range,
            capsule_half_height: settings.capsule_half_height,
            pending_input: Vec3::ZERO,
            is_sprinting: false,
            is_crouching: false,
            can_dash: true,
            wants_jump: false,
            air_control_boosted: false,
        }
    }

    pub fn is_sprinting(&self) -> bool {
        self.is_sprinting
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    pub fn can_dash(&self) -> bool {
        self.can_dash
    }

    pub fn wants_jump(&self) -> bool {
        self.wants_jump
    }

    /// Returns true if sprinting started.
    pub fn start_sprint(&mut self) -> bool {
        if self.is_sprinting || self.is_crouching {
            return false;
        }
        self.is_sprinting = true;
        true
    }

    pub fn stop_sprint(&mut self) -> bool {
        if !self.is_sprinting {
            return false;
        }
        self.is_sprinting = false;
        true
    }

    /// Returns true if crouching started.
    pub fn start_crouch(&mut self) -> bool {
        if self.is_crouching || self.is_sprinting {
            return false;
        }
        self.is_crouching = true;
        true
    }

    pub fn stop_crouch(&mut self) -> bool {
        if !self.is_crouching {
            return false;
        }
        self.is_crouching = false;
        true
    }

    /// Consume the dash if available.
    ///
    /// Returns true when the dash happens; the caller launches the body and
    /// schedules the cooldown timer. Returns false while cooling down.
    pub fn begin_dash(&mut self) -> bool {
        if !self.can_dash {
            return false;
        }
        self.can_dash = false;
        true
    }

    pub fn reset_dash_cooldown(&mut self) {
        self.can_dash = true;
    }

    pub fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    /// Take the accumulated input, clamped to unit length.
    pub fn consume_movement_input(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_input).clamp_length_max(1.0)
    }

    pub fn jump(&mut self) {
        self.wants_jump = true;
    }

    pub fn stop_jumping(&mut self) {
        self.wants_jump = false;
    }

    pub fn apply_air_control_multiplier(&mut self) {
        self.air_control_boosted = true;
    }

    pub fn remove_air_control_multiplier(&mut self) {
        self.air_control_boosted = false;
    }

    /// Current maximum walking speed given sprint/crouch state.
    pub fn max_walk_speed(&self) -> f32 {
        if self.is_sprinting {
            self.walk_speed * self.sprint_multiplier
        } else if self.is_crouching {
            self.walk_speed * CROUCH_FACTOR
        } else {
            self.walk_speed
        }
    }

    /// Current capsule half height given crouch state.
    pub fn current_half_height(&self) -> f32 {
        if self.is_crouching {
            self.capsule_half_height * CROUCH_FACTOR
        } else {
            self.capsule_half_height
        }
    }

    pub fn current_air_control(&self) -> f32 {
        if self.air_control_boosted {
            self.air_control * self.air_control_multiplier
        } else {
            self.air_control
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crouch_while_sprinting_is_noop() {
        let mut hero = HeroController::default();
        assert!(hero.start_sprint());
        assert!(!hero.start_crouch());
        assert!(!hero.is_crouching());
        assert!(hero.is_sprinting());
    }

    #[test]
    fn sprint_while_crouching_is_noop() {
        let mut hero = HeroController::default();
        assert!(hero.start_crouch());
        assert!(!hero.start_sprint());
        assert!(!hero.is_sprinting());
        assert_eq!(hero.max_walk_speed(), 300.0);
        assert_eq!(hero.current_half_height(), 48.0);
    }

    #[test]
    fn sprint_doubles_speed_and_stop_restores() {
        let mut hero = HeroController::default();
        hero.start_sprint();
        assert_eq!(hero.max_walk_speed(), 1200.0);
        assert!(hero.stop_sprint());
        assert!(!hero.stop_sprint());
        assert_eq!(hero.max_walk_speed(), 600.0);
    }

    #[test]
    fn dash_is_gated_until_reset() {
        let mut hero = HeroController::default();
        assert!(hero.begin_dash());
        assert!(!hero.can_dash());
        assert!(!hero.begin_dash());
        hero.reset_dash_cooldown();
        assert!(hero.begin_dash());
    }

    #[test]
    fn air_control_multiplier_toggles() {
        let mut hero = HeroController::default();
        assert!((hero.current_air_control() - 0.35).abs() < 1e-6);
        hero.apply_air_control_multiplier();
        assert!((hero.current_air_control() - 0.7).abs() < 1e-6);
        hero.remove_air_control_multiplier();
        assert!((hero.current_air_control() - 0.35).abs() < 1e-6);
    }
}
