//! Level description and spawning.
//!
//! A level is a JSON file listing the pawns, pickups and enemies to spawn,
//! plus an optional input script for headless runs.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "demo",
//!   "possess": "hero",
//!   "hero": { "position": [0.0, 0.0, 0.0], "yaw": 0.0 },
//!   "drone": { "position": [0.0, -800.0, 0.0] },
//!   "pickups": [
//!     { "position": [400.0, 0.0, 50.0], "value": 2, "coin": true }
//!   ],
//!   "enemies": [
//!     { "position": [2000.0, 2000.0, 0.0], "waypoints": [[2000.0, 2000.0, 0.0], [2500.0, 2000.0, 0.0]] }
//!   ],
//!   "inputs": [
//!     { "frame": 1, "until": 60, "action": "move", "phase": "triggered", "axis": [0.0, 1.0] }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::components::character::{Character, ControlRotation, Possessed};
use crate::components::drone::DronePawn;
use crate::components::enemy::{Enemy, Patrol};
use crate::components::hero::HeroController;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{Coin, Pickup};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::spherecollider::SphereCollider;
use crate::components::tween::{BobCurve, BobMotion, Spin};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputScript, ScriptedInput};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec3,
    #[serde(default)]
    pub yaw: f32,
}

/// Which pawn receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessTarget {
    #[default]
    Hero,
    Drone,
}

fn default_value() -> i32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSpec {
    pub position: Vec3,
    #[serde(default = "default_value")]
    pub value: i32,
    #[serde(default)]
    pub coin: bool,
}

fn default_enemy_speed() -> f32 {
    300.0
}

fn default_enemy_radius() -> f32 {
    42.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub position: Vec3,
    #[serde(default)]
    pub waypoints: Vec<Vec3>,
    #[serde(default = "default_enemy_speed")]
    pub speed: f32,
    #[serde(default = "default_enemy_radius")]
    pub radius: f32,
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub possess: PossessTarget,
    #[serde(default)]
    pub hero: Option<SpawnPoint>,
    #[serde(default)]
    pub drone: Option<SpawnPoint>,
    #[serde(default)]
    pub pickups: Vec<PickupSpec>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub inputs: Vec<ScriptedInput>,
}

impl LevelData {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| LevelError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn input_script(&self) -> InputScript {
        InputScript::new(self.inputs.clone())
    }
}

/// Spawn a pickup with its trigger sphere, spin and bob.
pub fn spawn_pickup(commands: &mut Commands, config: &GameConfig, spec: &PickupSpec) -> Entity {
    let settings = &config.pickup;
    let mut entity = commands.spawn((
        Pickup::new(spec.value),
        MapPosition::from_vec(spec.position),
        Rotation::default(),
        SphereCollider::new(settings.trigger_radius),
        Spin {
            degrees_per_second: settings.rotation_speed,
        },
    ));
    if let Some(easing) = settings.bob_curve {
        let curve = BobCurve {
            easing,
            ..BobCurve::default()
        };
        entity.insert(BobMotion::new(
            settings.bob_amplitude,
            settings.bob_frequency,
            curve,
            spec.position.z,
        ));
    }
    if spec.coin {
        entity.insert(Coin);
    }
    entity.id()
}

pub fn spawn_hero(commands: &mut Commands, config: &GameConfig, spawn: SpawnPoint) -> Entity {
    let settings = &config.hero;
    commands
        .spawn((
            Character,
            HeroController::from_settings(settings),
            RigidBody::grounded(settings.braking),
            MapPosition::from_vec(spawn.position),
            Rotation::from_yaw(spawn.yaw),
            ControlRotation {
                yaw: spawn.yaw,
                pitch: 0.0,
            },
            SphereCollider::new(settings.capsule_radius),
        ))
        .id()
}

pub fn spawn_drone(commands: &mut Commands, config: &GameConfig, spawn: SpawnPoint) -> Entity {
    let mut drone = DronePawn::from_settings(&config.drone);
    drone.target_yaw = spawn.yaw;
    commands
        .spawn((
            drone,
            RigidBody::new(),
            MapPosition::new(spawn.position.x, spawn.position.y, config.drone.hover_height),
            Rotation::from_yaw(spawn.yaw),
            ControlRotation {
                yaw: spawn.yaw,
                pitch: 0.0,
            },
        ))
        .id()
}

pub fn spawn_enemy(commands: &mut Commands, spec: &EnemySpec) -> Entity {
    commands
        .spawn((
            Enemy,
            Patrol::new(spec.waypoints.iter().copied(), spec.speed),
            MapPosition::from_vec(spec.position),
            Rotation::default(),
            SphereCollider::new(spec.radius),
        ))
        .id()
}

/// Spawn everything the level lists and possess the chosen pawn.
pub fn spawn_level(commands: &mut Commands, config: &GameConfig, level: &LevelData) {
    let hero = level.hero.map(|spawn| spawn_hero(commands, config, spawn));
    let drone = level.drone.map(|spawn| spawn_drone(commands, config, spawn));
    let possessed = match level.possess {
        PossessTarget::Hero => hero.or(drone),
        PossessTarget::Drone => drone.or(hero),
    };
    if let Some(pawn) = possessed {
        commands.entity(pawn).insert(Possessed);
    }

    for spec in &level.pickups {
        spawn_pickup(commands, config, spec);
    }
    for spec in &level.enemies {
        spawn_enemy(commands, spec);
    }
    info!(
        "Spawned level '{}': {} pickup(s), {} enem(y/ies)",
        level.name,
        level.pickups.len(),
        level.enemies.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::InputAction;

    #[test]
    fn parses_minimal_level() {
        let level = LevelData::from_json(r#"{ "pickups": [ { "position": [1.0, 2.0, 3.0] } ] }"#)
            .unwrap();
        assert_eq!(level.possess, PossessTarget::Hero);
        assert!(level.hero.is_none());
        assert_eq!(level.pickups.len(), 1);
        assert_eq!(level.pickups[0].value, 1);
        assert!(!level.pickups[0].coin);
    }

    #[test]
    fn parses_inputs_and_enemies() {
        let json = r#"{
            "possess": "drone",
            "drone": { "position": [0.0, 0.0, 0.0], "yaw": 90.0 },
            "enemies": [ { "position": [0.0, 0.0, 0.0], "waypoints": [[1.0, 0.0, 0.0]] } ],
            "inputs": [ { "frame": 3, "action": "look", "phase": "triggered", "axis": [1.0, 0.0] } ]
        }"#;
        let level = LevelData::from_json(json).unwrap();
        assert_eq!(level.possess, PossessTarget::Drone);
        assert_eq!(level.enemies[0].speed, 300.0);
        assert_eq!(level.inputs[0].action, InputAction::Look);
        assert_eq!(level.input_script().due(3).count(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LevelData::load_from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn bad_json_is_parse_error() {
        assert!(LevelData::from_json("{ not json").is_err());
    }
}
