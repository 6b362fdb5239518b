//! Drone pawn systems.
//!
//! The drone flies at a fixed hover height with a sine bob, moves on the
//! ground plane at `move_speed`, and either snaps to the control yaw or,
//! in slow turn mode, eases toward it.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::character::ControlRotation;
use crate::components::drone::DronePawn;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::{Rotation, normalize_degrees, yaw_forward, yaw_right};
use crate::events::input::PawnCommandEvent;
use crate::resources::input::PawnCommand;
use crate::resources::worldtime::WorldTime;

/// Interpolate an angle toward `target` at `speed`, taking the short way
/// round. Reaches the target when `speed <= 0` or the gap is negligible.
pub fn interp_yaw_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return normalize_degrees(target);
    }
    let delta = normalize_degrees(target - current);
    if delta.abs() < 1e-4 {
        return normalize_degrees(target);
    }
    normalize_degrees(current + delta * (dt * speed).clamp(0.0, 1.0))
}

pub fn observe_drone_command(
    trigger: On<PawnCommandEvent>,
    world_time: Res<WorldTime>,
    mut drones: Query<(&mut DronePawn, &mut ControlRotation)>,
) {
    let event = *trigger.event();
    let Ok((mut drone, mut control)) = drones.get_mut(event.pawn) else {
        return;
    };
    match event.command {
        PawnCommand::Move => {
            drone.add_movement_input(yaw_forward(control.yaw), event.axis.y);
            drone.add_movement_input(yaw_right(control.yaw), event.axis.x);
        }
        PawnCommand::Look => {
            let rate = drone.turn_speed * world_time.delta;
            control.add_yaw(event.axis.x * rate);
            control.add_pitch(event.axis.y * rate);
            if drone.slow_turn_mode() {
                drone.target_yaw = control.yaw;
            }
        }
        _ => {}
    }
}

/// Hover, move and turn drones.
pub fn drone_controller(
    world_time: Res<WorldTime>,
    mut query: Query<(
        &mut DronePawn,
        &mut RigidBody,
        &mut Rotation,
        &mut MapPosition,
        &ControlRotation,
    )>,
) {
    let dt = world_time.delta;
    for (mut drone, mut body, mut rotation, mut position, control) in query.iter_mut() {
        let input = std::mem::take(&mut drone.pending_input).clamp_length_max(1.0);
        body.velocity.x = input.x * drone.move_speed;
        body.velocity.y = input.y * drone.move_speed;
        body.velocity.z = 0.0;

        position.pos.z = drone.advance_hover(dt);

        rotation.yaw = if drone.slow_turn_mode() {
            interp_yaw_to(rotation.yaw, drone.target_yaw, dt, drone.slow_turn_speed)
        } else {
            control.yaw
        };
    }
}
