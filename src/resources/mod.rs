//! ECS resources made available to systems.
//!
//! Long-lived data injected into the world and accessed by systems and
//! observers. Each submodule documents its resource(s).
//!
//! Overview
//! - `gameconfig` – INI-backed gameplay tunables
//! - `gamerng` – seeded random source
//! - `gamestate` – current and pending session state
//! - `input` – input bindings table and scripted input
//! - `levelcoins` – coin count and one-shot level result
//! - `progress` – pickup progress tracker (score, resources, completion)
//! - `replication` – in-process replication hub and remote observers
//! - `screenmessages` – transient diagnostic messages
//! - `systemsstore` – registry of one-shot systems by name
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod gamerng;
pub mod gamestate;
pub mod input;
pub mod levelcoins;
pub mod progress;
pub mod replication;
pub mod screenmessages;
pub mod systemsstore;
pub mod worldtime;
