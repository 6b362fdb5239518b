//! Level coin count and one-shot completion result.
//!
//! `total_level_coins` is recomputed by scanning every
//! [`Coin`](crate::components::pickup::Coin) entity when play starts and is
//! replicated to observers whenever it changes. The level completes at most
//! once; the first completion request wins.

use bevy_ecs::prelude::{Entity, Resource};

/// Outcome recorded when the level completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub actor: Entity,
    pub succeeded: bool,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelCoinState {
    total_level_coins: i32,
    level_result: Option<LevelResult>,
}

impl LevelCoinState {
    pub fn total_level_coins(&self) -> i32 {
        self.total_level_coins
    }

    /// Store a fresh coin count. Returns true if the value changed.
    pub fn set_total_level_coins(&mut self, total: i32) -> bool {
        if self.total_level_coins == total {
            return false;
        }
        self.total_level_coins = total;
        true
    }

    pub fn level_result(&self) -> Option<LevelResult> {
        self.level_result
    }

    pub fn is_level_complete(&self) -> bool {
        self.level_result.is_some()
    }

    /// Record the level result. Returns false if the level already completed.
    pub fn complete(&mut self, actor: Entity, succeeded: bool) -> bool {
        if self.level_result.is_some() {
            return false;
        }
        self.level_result = Some(LevelResult { actor, succeeded });
        true
    }
}
