//! Gameplay systems.
//!
//! This module groups the ECS systems that advance the simulation each tick
//! and the observers that react to their events.
//!
//! Submodules overview
//! - [`drone`] – drone pawn commands, hover and slow turn
//! - [`enemy`] – random waypoint patrol and contact with the player
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`hero`] – hero commands, dash, interaction probe and locomotion
//! - [`input`] – replay scripted input and route it to the possessed pawn
//! - [`levelcoins`] – count coins and replicate the total
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`overlap`] – begin-overlap detection between sphere colliders
//! - [`pickup`] – collect pickups and register them with the tracker
//! - [`screenmessages`] – expire transient diagnostic messages
//! - [`time`] – update simulation time and delta, process timers
//! - [`ttl`] – despawn entities whose time to live ran out
//! - [`tween`] – spin and bob animation of pickups

pub mod drone;
pub mod enemy;
pub mod gamestate;
pub mod hero;
pub mod input;
pub mod levelcoins;
pub mod movement;
pub mod overlap;
pub mod pickup;
pub mod screenmessages;
pub mod time;
pub mod ttl;
pub mod tween;
