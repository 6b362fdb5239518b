//! Hero character systems.
//!
//! [`observe_hero_command`] executes the [`PawnCommandEvent`]s addressed to
//! a hero. [`hero_locomotion`] turns the accumulated movement and jump
//! intent into velocity each tick. The dash cooldown is a one-shot timer on
//! the hero, cleared by [`observe_hero_timer`].
//!
//! Interaction probes a ray along the hero's facing up to
//! `interaction_range` and hands the nearest hit to [`try_interact`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::components::character::ControlRotation;
use crate::components::hero::{DASH_COOLDOWN_SIGNAL, HeroController};
use crate::components::mapposition::MapPosition;
use crate::components::pickup::Pickup;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::{Rotation, yaw_forward, yaw_right};
use crate::components::spherecollider::SphereCollider;
use crate::components::timer::schedule_once;
use crate::components::tween::BobMotion;
use crate::events::input::PawnCommandEvent;
use crate::events::interact::InteractEvent;
use crate::events::timer::TimerEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::PawnCommand;
use crate::resources::screenmessages::{MessageLevel, ScreenMessages};
use crate::resources::worldtime::WorldTime;
use crate::systems::pickup::collect_pickup;

/// Scales air control into a per-second blend rate toward the desired velocity.
const AIR_CONTROL_RATE: f32 = 10.0;

/// Launch the hero along its facing if the dash is off cooldown.
///
/// Schedules the cooldown timer on success. Returns false, launching
/// nothing and leaving any pending timer alone, while cooling down.
pub fn try_dash(
    commands: &mut Commands,
    entity: Entity,
    hero: &mut HeroController,
    body: &mut RigidBody,
    rotation: &Rotation,
) -> bool {
    if !hero.begin_dash() {
        debug!("Dash on cooldown");
        return false;
    }
    body.launch(rotation.forward() * hero.dash_distance);
    schedule_once(commands, entity, hero.dash_cooldown, DASH_COOLDOWN_SIGNAL);
    true
}

/// Nearest collider hit by a ray from `origin` along `direction`, skipping
/// `ignore`.
pub fn probe_in_sight<'a>(
    colliders: impl Iterator<Item = (Entity, &'a MapPosition, &'a SphereCollider)>,
    ignore: Entity,
    origin: Vec3,
    direction: Vec3,
    range: f32,
) -> Option<Entity> {
    colliders
        .filter(|(entity, _, _)| *entity != ignore)
        .filter_map(|(entity, position, collider)| {
            collider
                .ray_hit(position.pos, origin, direction, range)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Interact with `target` on behalf of `actor`.
///
/// Collects the target when it is a pickup that can still be collected and
/// returns true. Anything else is reported with a diagnostic and returns
/// false. Either way an [`InteractEvent`] is raised.
pub fn try_interact(
    commands: &mut Commands,
    actor: Entity,
    target: Entity,
    pickups: &mut Query<(&mut Pickup, Option<&mut BobMotion>)>,
    removal_delay: f32,
    messages: &mut ScreenMessages,
) -> bool {
    let collected = match pickups.get_mut(target) {
        Ok((mut pickup, bob)) => collect_pickup(
            commands,
            target,
            &mut pickup,
            bob.map(Mut::into_inner),
            removal_delay,
            messages,
        )
        .is_some(),
        Err(_) => false,
    };
    if !collected {
        messages.push(
            format!("Interacted with: {:?}", target),
            2.0,
            MessageLevel::Warning,
        );
    }
    commands.trigger(InteractEvent {
        actor,
        target,
        collected,
    });
    collected
}

fn add_move_input(hero: &mut HeroController, control: &ControlRotation, axis: Vec2) {
    hero.add_movement_input(yaw_forward(control.yaw), axis.y);
    hero.add_movement_input(yaw_right(control.yaw), axis.x);
}

#[allow(clippy::type_complexity)]
pub fn observe_hero_command(
    trigger: On<PawnCommandEvent>,
    mut commands: Commands,
    mut heroes: Query<(
        &mut HeroController,
        &mut RigidBody,
        &mut ControlRotation,
        &Rotation,
        &MapPosition,
    )>,
    colliders: Query<(Entity, &MapPosition, &SphereCollider)>,
    mut pickups: Query<(&mut Pickup, Option<&mut BobMotion>)>,
    config: Res<GameConfig>,
    mut messages: ResMut<ScreenMessages>,
) {
    let event = *trigger.event();
    let Ok((mut hero, mut body, mut control, rotation, position)) = heroes.get_mut(event.pawn)
    else {
        return;
    };

    match event.command {
        PawnCommand::Move => add_move_input(&mut hero, &control, event.axis),
        PawnCommand::Look => {
            control.add_yaw(event.axis.x);
            control.add_pitch(event.axis.y);
        }
        PawnCommand::Jump => hero.jump(),
        PawnCommand::StopJumping => hero.stop_jumping(),
        PawnCommand::StartSprint => {
            if hero.start_sprint() {
                debug!("Sprint started");
            }
        }
        PawnCommand::StopSprint => {
            if hero.stop_sprint() {
                debug!("Sprint stopped");
            }
        }
        PawnCommand::StartCrouch => {
            if hero.start_crouch() {
                debug!("Crouch started, half height {}", hero.current_half_height());
            }
        }
        PawnCommand::StopCrouch => {
            if hero.stop_crouch() {
                debug!("Crouch stopped, half height {}", hero.current_half_height());
            }
        }
        PawnCommand::Dash => {
            if try_dash(&mut commands, event.pawn, &mut hero, &mut body, rotation) {
                info!("Hero {:?} dashed", event.pawn);
            }
        }
        PawnCommand::Interact => {
            // Collected pickups linger until their removal; look through them.
            let in_sight = colliders.iter().filter(|(entity, _, _)| {
                pickups
                    .get(*entity)
                    .map_or(true, |(pickup, _)| !pickup.is_collected())
            });
            let target = probe_in_sight(
                in_sight,
                event.pawn,
                position.pos,
                rotation.forward(),
                hero.interaction_range,
            );
            match target {
                Some(target) => {
                    try_interact(
                        &mut commands,
                        event.pawn,
                        target,
                        &mut pickups,
                        config.pickup.removal_delay,
                        &mut messages,
                    );
                }
                None => debug!("Nothing in sight to interact with"),
            }
        }
    }
}

/// Restore the dash when its cooldown timer fires.
pub fn observe_hero_timer(trigger: On<TimerEvent>, mut heroes: Query<&mut HeroController>) {
    let event = trigger.event();
    if event.signal != DASH_COOLDOWN_SIGNAL {
        return;
    }
    if let Ok(mut hero) = heroes.get_mut(event.entity) {
        hero.reset_dash_cooldown();
        debug!("Dash ready on {:?}", event.entity);
    }
}

/// Apply movement and jump intent to hero bodies.
///
/// On the ground the hero moves at the current max walk speed; above it
/// (after a dash) speed bleeds off by the body's braking before input
/// takes over again. In the air the velocity blends toward the input by
/// the air control, boosted by the multiplier. Facing follows the input
/// direction.
pub fn hero_locomotion(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut HeroController, &mut RigidBody, &mut Rotation, &MapPosition)>,
) {
    let dt = world_time.delta;
    for (mut hero, mut body, mut rotation, position) in query.iter_mut() {
        if body.frozen {
            continue;
        }
        let grounded = position.pos.z <= 0.0 && body.velocity.z <= 0.0;
        if grounded {
            hero.remove_air_control_multiplier();
        } else {
            hero.apply_air_control_multiplier();
        }

        let input = hero.consume_movement_input();
        let max_speed = hero.max_walk_speed();
        let desired = input.truncate() * max_speed;
        let current = body.velocity.truncate();

        let horizontal = if !grounded {
            let blend = (hero.current_air_control() * AIR_CONTROL_RATE * dt).min(1.0);
            current.lerp(desired, blend)
        } else if current.length() > max_speed + f32::EPSILON {
            let speed = (current.length() - body.braking * dt).max(max_speed);
            current.normalize_or_zero() * speed
        } else {
            desired
        };
        body.velocity.x = horizontal.x;
        body.velocity.y = horizontal.y;

        if desired.length_squared() > 0.0 {
            rotation.yaw = desired.y.atan2(desired.x).to_degrees();
        }

        if hero.wants_jump() && grounded {
            body.launch(Vec3::Z * hero.jump_z_velocity);
            hero.stop_jumping();
        }
    }
}
