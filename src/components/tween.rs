//! Time-accumulator animation components for pickups.
//!
//! - [`Spin`] – constant yaw rotation
//! - [`BobMotion`] – vertical bobbing sampled from a [`BobCurve`] each tick
//!
//! Both are advanced by [`crate::systems::tween`]. Sampling is a pure
//! function of the accumulated time, so two runs with the same deltas land
//! on the same positions.

use bevy_ecs::prelude::Component;

/// Determines how a tween behaves when it reaches the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once and stop.
    Once,
    /// Restart from the beginning when finished.
    Loop,
    /// Reverse direction when reaching either end.
    PingPong,
}

/// Easing functions for smooth interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Parse a config name such as `"quad_in_out"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "quad_in" => Some(Easing::QuadIn),
            "quad_out" => Some(Easing::QuadOut),
            "quad_in_out" => Some(Easing::QuadInOut),
            "cubic_in" => Some(Easing::CubicIn),
            "cubic_out" => Some(Easing::CubicOut),
            "cubic_in_out" => Some(Easing::CubicInOut),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
        }
    }
}

/// Shape of one bob cycle: the value travels 0 → 1 → 0 with the easing
/// applied to each half.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BobCurve {
    pub easing: Easing,
    pub loop_mode: LoopMode,
}

impl Default for BobCurve {
    fn default() -> Self {
        Self {
            easing: Easing::QuadInOut,
            loop_mode: LoopMode::PingPong,
        }
    }
}

/// Constant rotation around the vertical axis.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub degrees_per_second: f32,
}

/// Vertical bobbing around `base_z`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BobMotion {
    pub amplitude: f32,
    /// Cycles per second.
    pub frequency: f32,
    pub curve: BobCurve,
    /// Time within the current half cycle.
    pub time: f32,
    /// Direction of playback (true = rising).
    pub forward: bool,
    pub playing: bool,
    /// Altitude the bob is centered on, captured at spawn.
    pub base_z: f32,
}

impl BobMotion {
    pub fn new(amplitude: f32, frequency: f32, curve: BobCurve, base_z: f32) -> Self {
        Self {
            amplitude,
            frequency,
            curve,
            time: 0.0,
            forward: true,
            playing: true,
            base_z,
        }
    }

    /// Length of one half cycle in seconds.
    pub fn half_period(&self) -> f32 {
        if self.frequency <= 0.0 {
            f32::INFINITY
        } else {
            0.5 / self.frequency
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }
}
