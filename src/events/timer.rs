//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) reaches its duration,
//! [`crate::systems::time::update_timers`] removes it and triggers a
//! [`TimerEvent`]. Observers match on `signal`.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The signal name configured on the timer.
    pub signal: String,
}
