//! Enemy patrol and contact systems.
//!
//! Patrolling enemies walk straight at a random waypoint. Arrival raises a
//! [`MoveCompletedEvent`] whose observer picks the next one. An enemy
//! touching the possessed pawn fails the level.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::character::Possessed;
use crate::components::enemy::{Enemy, Patrol};
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::events::collision::OverlapEvent;
use crate::events::enemy::MoveCompletedEvent;
use crate::events::level::LevelCompleteRequest;
use crate::resources::gamerng::GameRng;
use crate::resources::worldtime::WorldTime;

/// Point `patrol` at a random waypoint other than the one it stands on.
///
/// Returns false when there is nowhere else to go.
pub fn pick_random_waypoint(patrol: &mut Patrol, rng: &mut GameRng) -> bool {
    let len = patrol.waypoints.len();
    patrol.target = match patrol.reached {
        Some(reached) => rng.index_excluding(len, reached),
        None => rng.index(len),
    };
    patrol.target.is_some()
}

/// Give newly spawned patrols their first waypoint.
pub fn begin_patrols(
    mut query: Query<(Entity, &mut Patrol), Added<Patrol>>,
    mut rng: ResMut<GameRng>,
) {
    for (entity, mut patrol) in query.iter_mut() {
        if !pick_random_waypoint(&mut patrol, &mut rng) {
            warn!("Enemy {:?} has no waypoints, staying idle", entity);
        }
    }
}

/// Walk each patrol toward its waypoint.
pub fn patrol_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Patrol, &mut MapPosition, &mut Rotation), With<Enemy>>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut patrol, mut position, mut rotation) in query.iter_mut() {
        let Some(target) = patrol.target_point() else {
            continue;
        };
        let to_target = (target - position.pos).truncate();
        let distance = to_target.length();
        let step = patrol.speed * dt;

        if distance <= patrol.acceptance_radius || step >= distance {
            position.pos.x = target.x;
            position.pos.y = target.y;
            patrol.reached = patrol.target.take();
            commands.trigger(MoveCompletedEvent {
                enemy: entity,
                position: position.pos,
            });
            continue;
        }

        let direction = to_target / distance;
        position.pos.x += direction.x * step;
        position.pos.y += direction.y * step;
        rotation.yaw = direction.y.atan2(direction.x).to_degrees();
    }
}

pub fn observe_move_completed(
    trigger: On<MoveCompletedEvent>,
    mut patrols: Query<&mut Patrol>,
    mut rng: ResMut<GameRng>,
) {
    let event = trigger.event();
    let Ok(mut patrol) = patrols.get_mut(event.enemy) else {
        return;
    };
    if pick_random_waypoint(&mut patrol, &mut rng) {
        debug!(
            "Enemy {:?} reached {:?}, heading to waypoint {:?}",
            event.enemy, event.position, patrol.target
        );
    } else {
        debug!(
            "Enemy {:?} reached its only waypoint, staying put",
            event.enemy
        );
    }
}

/// Fail the level when an enemy touches the possessed pawn.
pub fn observe_enemy_contact(
    trigger: On<OverlapEvent>,
    mut commands: Commands,
    enemies: Query<(), With<Enemy>>,
    possessed: Query<(), With<Possessed>>,
) {
    let event = *trigger.event();
    let victim = if enemies.contains(event.a) && possessed.contains(event.b) {
        event.b
    } else if enemies.contains(event.b) && possessed.contains(event.a) {
        event.a
    } else {
        return;
    };
    warn!("Enemy caught {:?}", victim);
    commands.trigger(LevelCompleteRequest {
        actor: victim,
        succeeded: false,
    });
}
