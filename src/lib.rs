//! Collectathon gameplay library.
//!
//! Pickups, progress tracking, level coin replication and pawn controllers
//! on top of `bevy_ecs`. Exposed as a library for the headless runner and
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod level;
pub mod resources;
pub mod systems;
