//! Progress notifications raised by the pickup bookkeeping.

use bevy_ecs::prelude::*;

/// Score changed. Carries the new total.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdatedEvent {
    pub score: i32,
}

/// Resources were added to the pool.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCollectedEvent {
    pub resource_value: i32,
    pub total_resources: i32,
}

/// Every registered pickup has been collected. Raised once per session.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameCompletedEvent {
    pub completion_percent: f32,
}
