//! TTL (time-to-live) system.
//!
//! Counts down every [`Ttl`] by the scaled tick delta and despawns the
//! entity once it runs out. Collected pickups use this for their delayed
//! removal.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            debug!("Ttl expired, despawning {:?}", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
