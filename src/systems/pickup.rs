//! Pickup collection and registration.
//!
//! Two surfaces collect a pickup: a [`Character`] overlapping its trigger
//! sphere ([`observe_pickup_overlap`]) and the hero's interaction probe
//! (`crate::systems::hero::try_interact`). Both go through
//! [`collect_pickup`], which checks [`Collectible::can_be_collected`] on the
//! live component before collecting. The flag is written straight into the
//! component, so a second attempt in the same tick sees it and does
//! nothing.
//!
//! [`register_new_pickups`] counts every pickup once with the
//! [`ProgressTracker`], at play start and again each tick for pickups
//! spawned later.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::character::Character;
use crate::components::pickup::{Collectible, Pickup, Registered};
use crate::components::ttl::Ttl;
use crate::components::tween::BobMotion;
use crate::events::collision::OverlapEvent;
use crate::events::pickup::PickupCollectedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::progress::ProgressTracker;
use crate::resources::screenmessages::{MessageLevel, ScreenMessages};

/// Collect `entity` if it can still be collected.
///
/// On success stops the bob, schedules removal after `removal_delay`
/// seconds, and triggers [`PickupCollectedEvent`]. Returns the granted
/// value, or `None` if the pickup was already collected.
pub fn collect_pickup(
    commands: &mut Commands,
    entity: Entity,
    pickup: &mut Pickup,
    bob: Option<&mut BobMotion>,
    removal_delay: f32,
    messages: &mut ScreenMessages,
) -> Option<i32> {
    if !pickup.can_be_collected() {
        return None;
    }
    let resource_value = pickup.collect()?;

    if let Some(bob) = bob {
        bob.stop();
    }
    commands.entity(entity).insert(Ttl::new(removal_delay));
    messages.push(
        format!("Collected pickup! Resource value: {}", resource_value),
        2.0,
        MessageLevel::Success,
    );
    commands.trigger(PickupCollectedEvent {
        pickup: entity,
        resource_value,
    });
    Some(resource_value)
}

/// Collect a pickup when a character starts overlapping it.
pub fn observe_pickup_overlap(
    trigger: On<OverlapEvent>,
    mut commands: Commands,
    mut pickups: Query<(&mut Pickup, Option<&mut BobMotion>)>,
    characters: Query<(), With<Character>>,
    config: Res<GameConfig>,
    mut messages: ResMut<ScreenMessages>,
) {
    let event = *trigger.event();
    let (pickup_entity, other) = if pickups.contains(event.a) {
        (event.a, event.b)
    } else if pickups.contains(event.b) {
        (event.b, event.a)
    } else {
        return;
    };
    if !characters.contains(other) {
        return;
    }
    let Ok((mut pickup, bob)) = pickups.get_mut(pickup_entity) else {
        return;
    };
    if let Some(value) = collect_pickup(
        &mut commands,
        pickup_entity,
        &mut pickup,
        bob.map(Mut::into_inner),
        config.pickup.removal_delay,
        &mut messages,
    ) {
        debug!(
            "{:?} collected {:?} by overlap (value {})",
            other, pickup_entity, value
        );
    }
}

/// Count pickups the tracker has not seen yet.
pub fn register_new_pickups(
    mut commands: Commands,
    query: Query<Entity, (With<Pickup>, Without<Registered>)>,
    mut tracker: ResMut<ProgressTracker>,
    mut messages: ResMut<ScreenMessages>,
) {
    let mut found = 0;
    for entity in query.iter() {
        tracker.register_pickup();
        commands.entity(entity).insert(Registered);
        found += 1;
    }
    if found > 0 {
        info!("Registered {} new pickup(s)", found);
        messages.push(
            format!("Found {} pickups in level", tracker.total_pickups()),
            3.0,
            MessageLevel::Info,
        );
    }
}
