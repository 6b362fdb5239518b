//! Transient diagnostic messages.
//!
//! Gameplay code reports noteworthy moments ("Collected pickup!", "Score:
//! 40") through [`ScreenMessages`]. Each message is logged when pushed and
//! kept for its display duration so a front end can show it. The queue is
//! bounded; when full, the oldest message is dropped.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use log::{info, warn};

/// Maximum number of messages kept at once.
pub const MAX_MESSAGES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenMessage {
    pub text: String,
    pub level: MessageLevel,
    /// Seconds left on screen.
    pub remaining: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenMessages {
    messages: ArrayVec<ScreenMessage, MAX_MESSAGES>,
}

impl ScreenMessages {
    pub fn push(&mut self, text: impl Into<String>, seconds: f32, level: MessageLevel) {
        let text = text.into();
        match level {
            MessageLevel::Warning => warn!("{}", text),
            MessageLevel::Info | MessageLevel::Success => info!("{}", text),
        }
        if self.messages.is_full() {
            self.messages.remove(0);
        }
        self.messages.push(ScreenMessage {
            text,
            level,
            remaining: seconds,
        });
    }

    /// Age every message by `dt` and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for message in self.messages.iter_mut() {
            message.remaining -= dt;
        }
        self.messages.retain(|m| m.remaining > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }
}
