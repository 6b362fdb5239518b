//! Named registry of one-shot systems.
//!
//! State enter hooks are registered with the world under well-known names
//! (`"setup"`, `"enter_play"`, ...) and run through their [`SystemId`] when
//! the state changes.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<SystemId> {
        self.map.get(name.as_ref()).copied()
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.map.contains_key(name.as_ref())
    }
}
