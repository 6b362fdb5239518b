//! Collectible pickup components.
//!
//! A [`Pickup`] is a world entity that grants its `resource_value` once. The
//! only state change is `Idle -> Collected`; after that the pickup waits for
//! its removal timer. Any entity that carries a [`Pickup`] has the collect
//! capability, exposed through the [`Collectible`] trait.
//!
//! # Related
//!
//! - [`crate::systems::pickup`] – overlap/interaction entry points and removal
//! - [`crate::events::pickup::PickupCollectedEvent`] – emitted on collection
//! - [`crate::resources::progress::ProgressTracker`] – aggregates collections

use bevy_ecs::prelude::Component;

/// Capability shared by everything that can be picked up.
pub trait Collectible {
    /// Whether a collect attempt would succeed right now.
    fn can_be_collected(&self) -> bool;

    /// Attempt the collection.
    ///
    /// Returns the granted resource value on the first successful call and
    /// `None` on every later one.
    fn collect(&mut self) -> Option<i32>;
}

/// Pickup state: resource value and the collected flag.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    /// Resource value granted when collected.
    pub resource_value: i32,
    collected: bool,
}

impl Pickup {
    pub fn new(resource_value: i32) -> Self {
        Self {
            resource_value,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }
}

impl Default for Pickup {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Collectible for Pickup {
    fn can_be_collected(&self) -> bool {
        !self.collected
    }

    fn collect(&mut self) -> Option<i32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.resource_value)
    }
}

/// Marker for the coin pickups counted by the level coin state.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Coin;

/// Marker added once a pickup has been counted by the progress tracker.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Registered;
