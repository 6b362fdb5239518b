//! Event types and observers.
//!
//! Gameplay notifications are `bevy_ecs` events delivered to observers.
//! Publishing is `world.trigger(event)` (or `commands.trigger`); listeners
//! attach with [`subscribe`] and detach with [`unsubscribe`].
//!
//! Submodules:
//! - [`collision`] – begin-overlap notifications
//! - [`enemy`] – patrol move completion
//! - [`gamestate`] – state transition requests
//! - [`input`] – input actions routed to the possessed pawn
//! - [`interact`] – hero interaction results
//! - [`level`] – level completion request and local hook
//! - [`pickup`] – pickup collection and its progress bookkeeping
//! - [`progress`] – score, resource and completion notifications
//! - [`timer`] – one-shot timer expiry
use bevy_ecs::prelude::*;
use bevy_ecs::system::IntoObserverSystem;
use log::debug;

pub mod collision;
pub mod enemy;
pub mod gamestate;
pub mod input;
pub mod interact;
pub mod level;
pub mod pickup;
pub mod progress;
pub mod timer;

/// Handle returned by [`subscribe`]. Holds the observer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(Entity);

impl Subscription {
    pub fn entity(&self) -> Entity {
        self.0
    }
}

/// Attach `handler` as a global observer of `E`.
pub fn subscribe<E: Event, B: Bundle, M>(
    world: &mut World,
    handler: impl IntoObserverSystem<E, B, M>,
) -> Subscription {
    let id = world.add_observer(handler).id();
    world.flush();
    debug!("Observer {:?} subscribed", id);
    Subscription(id)
}

/// Detach a handler attached with [`subscribe`].
///
/// Returns `false` if it was already gone.
pub fn unsubscribe(world: &mut World, subscription: Subscription) -> bool {
    let removed = world.despawn(subscription.0);
    world.flush();
    removed
}
