//! Pickup animation systems.
//!
//! - [`spin_system`] – turns [`Spin`] entities at a constant yaw rate
//! - [`bob_system`] – moves [`BobMotion`] entities up and down around their base
//!
//! Both read the scaled delta from [`WorldTime`]. Bob sampling is a pure
//! function of the accumulated time.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rotation::{Rotation, normalize_degrees};
use crate::components::tween::{BobMotion, Easing, LoopMode, Spin};
use crate::resources::worldtime::WorldTime;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0].
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Advance `bob.time` by `dt` within one half cycle, handling the loop mode.
pub(crate) fn advance(bob: &mut BobMotion, dt: f32) {
    let duration = bob.half_period();
    if !duration.is_finite() {
        return;
    }
    let dir = if bob.forward { 1.0 } else { -1.0 };
    bob.time += dt * dir;

    let finished_forward = bob.forward && bob.time >= duration;
    let finished_backward = !bob.forward && bob.time <= 0.0;
    if !(finished_forward || finished_backward) {
        return;
    }
    match bob.curve.loop_mode {
        LoopMode::Once => {
            bob.playing = false;
            bob.time = bob.time.clamp(0.0, duration);
        }
        LoopMode::Loop => {
            bob.time = if finished_forward {
                bob.time - duration
            } else {
                bob.time + duration
            };
        }
        LoopMode::PingPong => {
            // Reflect the overshoot back into the cycle.
            bob.time = if finished_forward {
                2.0 * duration - bob.time
            } else {
                -bob.time
            };
            bob.forward = !bob.forward;
            bob.time = bob.time.clamp(0.0, duration);
        }
    }
}

/// Height above `base_z` for the bob's current time.
pub fn bob_offset(bob: &BobMotion) -> f32 {
    let duration = bob.half_period();
    if !duration.is_finite() {
        return 0.0;
    }
    ease(bob.curve.easing, bob.time / duration) * bob.amplitude
}

pub fn spin_system(world_time: Res<WorldTime>, mut query: Query<(&mut Rotation, &Spin)>) {
    let dt = world_time.delta.max(0.0);
    for (mut rotation, spin) in query.iter_mut() {
        rotation.yaw = normalize_degrees(rotation.yaw + spin.degrees_per_second * dt);
    }
}

pub fn bob_system(world_time: Res<WorldTime>, mut query: Query<(&mut MapPosition, &mut BobMotion)>) {
    let dt = world_time.delta.max(0.0);
    for (mut position, mut bob) in query.iter_mut() {
        if !bob.playing {
            continue;
        }
        advance(&mut bob, dt);
        position.pos.z = bob.base_z + bob_offset(&bob);
    }
}
