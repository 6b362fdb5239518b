//! One-shot timer component.
//!
//! A [`Timer`] counts elapsed time and, once it reaches `duration`, triggers
//! a [`TimerEvent`](crate::events::timer::TimerEvent) carrying its signal and
//! removes itself. Because the timer lives on the owning entity, despawning
//! the entity cancels it.
//!
//! Use [`schedule_once`] and [`cancel_timer`] rather than inserting and
//! removing the component by hand.

use bevy_ecs::prelude::*;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub signal: String,
}

impl Timer {
    pub fn new(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            signal: signal.into(),
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// Schedule `signal` to fire on `entity` after `delay` seconds.
///
/// Replaces any timer already pending on the entity.
pub fn schedule_once(commands: &mut Commands, entity: Entity, delay: f32, signal: impl Into<String>) {
    commands.entity(entity).insert(Timer::new(delay, signal));
}

/// Drop the timer pending on `entity`, if any.
pub fn cancel_timer(commands: &mut Commands, entity: Entity) {
    if let Ok(mut ec) = commands.get_entity(entity) {
        ec.remove::<Timer>();
    }
}
