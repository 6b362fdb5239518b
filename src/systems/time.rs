//! Clock and timer systems.
//!
//! [`update_world_time`] advances [`WorldTime`] once per tick.
//! [`update_timers`] ages every one-shot [`Timer`] and fires its
//! [`TimerEvent`] on expiry.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Advance the clock by `dt` unscaled seconds.
///
/// Applies `time_scale`, writes `elapsed` and `delta`, bumps `frame_count`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Age timers; expired ones are removed and their signal triggered.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.elapsed += world_time.delta;
        if timer.finished() {
            commands.entity(entity).remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
        }
    }
}
