//! Hovering drone pawn.
//!
//! The drone floats at `hover_height` with a sine bob and accumulates
//! movement input that [`crate::systems::drone`] converts into velocity
//! once per tick. With slow turn mode on, look input only moves the target
//! yaw and the body turns toward it gradually.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::resources::gameconfig::DroneSettings;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct DronePawn {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub hover_height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub slow_turn_speed: f32,
    /// Accumulated bob phase.
    pub hover_offset: f32,
    /// Yaw the body turns toward in slow turn mode.
    pub target_yaw: f32,
    /// Movement input gathered since the last tick.
    pub pending_input: Vec3,
    slow_turn_mode: bool,
}

impl Default for DronePawn {
    fn default() -> Self {
        Self::from_settings(&DroneSettings::default())
    }
}

impl DronePawn {
    pub fn from_settings(settings: &DroneSettings) -> Self {
        Self {
            move_speed: settings.move_speed,
            turn_speed: settings.turn_speed,
            hover_height: settings.hover_height,
            bob_amplitude: settings.bob_amplitude,
            bob_frequency: settings.bob_frequency,
            slow_turn_speed: settings.slow_turn_speed,
            hover_offset: 0.0,
            target_yaw: 0.0,
            pending_input: Vec3::ZERO,
            slow_turn_mode: false,
        }
    }

    pub fn slow_turn_mode(&self) -> bool {
        self.slow_turn_mode
    }

    /// Toggle slow turn mode. Disabling snaps the target to `current_yaw`.
    pub fn set_slow_turn_mode(&mut self, enabled: bool, current_yaw: f32) {
        self.slow_turn_mode = enabled;
        if !enabled {
            self.target_yaw = current_yaw;
        }
    }

    pub fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    /// Advance the bob phase and return the hover altitude.
    pub fn advance_hover(&mut self, dt: f32) -> f32 {
        self.hover_offset += self.bob_frequency * dt;
        self.hover_height + self.hover_offset.sin() * self.bob_amplitude
    }
}
