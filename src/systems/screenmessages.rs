use bevy_ecs::prelude::*;

use crate::resources::screenmessages::ScreenMessages;
use crate::resources::worldtime::WorldTime;

/// Expire transient messages.
pub fn screen_messages_system(world_time: Res<WorldTime>, mut messages: ResMut<ScreenMessages>) {
    messages.tick(world_time.delta);
}
