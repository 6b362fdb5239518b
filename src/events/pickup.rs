//! Pickup collection event and the progress bookkeeping it drives.
//!
//! A pickup that gets collected triggers [`PickupCollectedEvent`].
//! [`observe_pickup_collected`] reports it to the
//! [`ProgressTracker`] and fans the result out as progress events:
//!
//! - [`ScoreUpdatedEvent`] with the new score
//! - [`ResourceCollectedEvent`] with the added value
//! - [`GameCompletedEvent`] the first time every pickup is collected

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::events::progress::{GameCompletedEvent, ResourceCollectedEvent, ScoreUpdatedEvent};
use crate::resources::progress::ProgressTracker;
use crate::resources::screenmessages::{MessageLevel, ScreenMessages};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCollectedEvent {
    pub pickup: Entity,
    pub resource_value: i32,
}

pub fn observe_pickup_collected(
    trigger: On<PickupCollectedEvent>,
    mut commands: Commands,
    mut tracker: ResMut<ProgressTracker>,
    mut messages: ResMut<ScreenMessages>,
) {
    let event = trigger.event();
    debug!(
        "Pickup {:?} collected, value {}",
        event.pickup, event.resource_value
    );
    let report = tracker.report_collected(event.resource_value);

    messages.push(format!("Score: {}", report.score), 2.0, MessageLevel::Info);
    commands.trigger(ScoreUpdatedEvent {
        score: report.score,
    });
    messages.push(
        format!("Resources: {}", report.total_resources),
        2.0,
        MessageLevel::Info,
    );
    commands.trigger(ResourceCollectedEvent {
        resource_value: report.resource_value,
        total_resources: report.total_resources,
    });
    messages.push(
        format!(
            "Pickup {}/{} collected! ({:.1}% complete)",
            tracker.pickups_collected(),
            tracker.total_pickups(),
            report.completion_percent
        ),
        3.0,
        MessageLevel::Info,
    );

    if let Some(completion_percent) = report.game_completed {
        messages.push(
            "GAME COMPLETED! All pickups collected!",
            5.0,
            MessageLevel::Success,
        );
        commands.trigger(GameCompletedEvent { completion_percent });
    }
}
