//! Level coin bookkeeping.

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::pickup::Coin;
use crate::resources::levelcoins::LevelCoinState;
use crate::resources::replication::{ReplicatedMessage, ReplicationHub};

/// Count every [`Coin`] in the world and replicate the total if it changed.
pub fn update_total_coins_in_level(
    coins: Query<(), With<Coin>>,
    mut coin_state: ResMut<LevelCoinState>,
    mut hub: ResMut<ReplicationHub>,
) {
    let total = coins.iter().count() as i32;
    info!("Update total coins: {}", total);
    if !coin_state.set_total_level_coins(total) {
        return;
    }
    let message = ReplicatedMessage::LevelCoins {
        total_level_coins: total,
    };
    if let Err(e) = hub.replicate_property(&message) {
        error!("Failed to encode coin count: {}", e);
    }
}
