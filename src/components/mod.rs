//! ECS components for entities.
//!
//! Submodules overview:
//! - [`character`] – character/possession markers and the control rotation
//! - [`drone`] – hovering drone pawn state
//! - [`enemy`] – enemy marker and straight-line patrol
//! - [`hero`] – hero character controller state (sprint, crouch, dash, jump)
//! - [`mapposition`] – world-space position
//! - [`pickup`] – collectible pickups and the [`pickup::Collectible`] capability
//! - [`rigidbody`] – simple kinematic body (velocity, impulse, gravity)
//! - [`rotation`] – yaw/pitch orientation in degrees
//! - [`spherecollider`] – sphere used for overlap and ray probes
//! - [`timer`] – one-shot timer that triggers a signal when it expires
//! - [`ttl`] – delayed despawn
//! - [`tween`] – pickup spin and bob motion

pub mod character;
pub mod drone;
pub mod enemy;
pub mod hero;
pub mod mapposition;
pub mod pickup;
pub mod rigidbody;
pub mod rotation;
pub mod spherecollider;
pub mod timer;
pub mod ttl;
pub mod tween;
