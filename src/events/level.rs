//! Level completion.
//!
//! Any gameplay code may ask for the level to end by triggering a
//! [`LevelCompleteRequest`]. The first request wins:
//! [`observe_level_complete_request`] records the result in
//! [`LevelCoinState`], multicasts it to every remote observer, then raises
//! [`LevelCompletedEvent`] locally. Later requests are logged and dropped.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::character::Possessed;
use crate::events::progress::GameCompletedEvent;
use crate::resources::levelcoins::LevelCoinState;
use crate::resources::replication::{NetActorId, ReplicatedMessage, ReplicationHub};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCompleteRequest {
    pub actor: Entity,
    pub succeeded: bool,
}

/// Local hook raised once the level result is recorded and sent.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCompletedEvent {
    pub actor: Entity,
    pub succeeded: bool,
}

pub fn observe_level_complete_request(
    trigger: On<LevelCompleteRequest>,
    mut commands: Commands,
    mut coin_state: ResMut<LevelCoinState>,
    mut hub: ResMut<ReplicationHub>,
) {
    let request = *trigger.event();
    if !coin_state.complete(request.actor, request.succeeded) {
        warn!(
            "Level already complete, ignoring completion request from {:?}",
            request.actor
        );
        return;
    }

    let message = ReplicatedMessage::LevelComplete {
        actor: NetActorId::from(request.actor),
        succeeded: request.succeeded,
    };
    match hub.multicast_reliable(&message) {
        Ok(delivered) => info!(
            "Level complete (succeeded: {}) sent to {} observer(s)",
            request.succeeded, delivered
        ),
        Err(e) => error!("Failed to encode level complete message: {}", e),
    }

    commands.trigger(LevelCompletedEvent {
        actor: request.actor,
        succeeded: request.succeeded,
    });
}

/// Collecting every pickup completes the level in favour of the possessed pawn.
pub fn observe_game_completed(
    _trigger: On<GameCompletedEvent>,
    mut commands: Commands,
    possessed: Query<Entity, With<Possessed>>,
) {
    match possessed.iter().next() {
        Some(actor) => commands.trigger(LevelCompleteRequest {
            actor,
            succeeded: true,
        }),
        None => warn!("Game completed but no pawn is possessed, level result not recorded"),
    }
}
