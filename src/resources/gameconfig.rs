//! Game configuration resource.
//!
//! Gameplay tunables loaded from an INI configuration file. Defaults match
//! the shipped level so the game runs without a config file; missing keys
//! keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [hero]
//! walk_speed = 600
//! sprint_multiplier = 2.0
//! dash_distance = 1000
//! dash_cooldown = 2.0
//! interaction_range = 500
//!
//! [drone]
//! move_speed = 1000
//! hover_height = 200
//!
//! [pickup]
//! removal_delay = 0.1
//! rotation_speed = 90
//! bob_amplitude = 50
//! bob_frequency = 1.0
//! bob_curve = quad_in_out
//!
//! [progress]
//! points_per_resource = 10
//!
//! [session]
//! tick_rate = 60
//! seed = 7
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::tween::Easing;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("failed to save config file {path}: {reason}")]
    Save { path: String, reason: String },
    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
    #[error("input action {action} has no binding for {phase}")]
    MissingInputAction { action: String, phase: String },
}

/// Hero character tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSettings {
    pub walk_speed: f32,
    pub sprint_multiplier: f32,
    pub dash_distance: f32,
    pub dash_cooldown: f32,
    pub jump_z_velocity: f32,
    pub air_control: f32,
    pub air_control_multiplier: f32,
    pub interaction_range: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    pub braking: f32,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            walk_speed: 600.0,
            sprint_multiplier: 2.0,
            dash_distance: 1000.0,
            dash_cooldown: 2.0,
            jump_z_velocity: 700.0,
            air_control: 0.35,
            air_control_multiplier: 2.0,
            interaction_range: 500.0,
            capsule_radius: 42.0,
            capsule_half_height: 96.0,
            braking: 2000.0,
        }
    }
}

/// Drone pawn tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneSettings {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub hover_height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub slow_turn_speed: f32,
}

impl Default for DroneSettings {
    fn default() -> Self {
        Self {
            move_speed: 1000.0,
            turn_speed: 100.0,
            hover_height: 200.0,
            bob_amplitude: 20.0,
            bob_frequency: 1.0,
            slow_turn_speed: 50.0,
        }
    }
}

/// Pickup tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupSettings {
    /// Seconds between collection and despawn.
    pub removal_delay: f32,
    pub trigger_radius: f32,
    /// Spin speed in degrees per second.
    pub rotation_speed: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    /// Easing of the bob curve; `None` disables bobbing.
    pub bob_curve: Option<Easing>,
}

impl Default for PickupSettings {
    fn default() -> Self {
        Self {
            removal_delay: 0.1,
            trigger_radius: 100.0,
            rotation_speed: 90.0,
            bob_amplitude: 50.0,
            bob_frequency: 1.0,
            bob_curve: Some(Easing::QuadInOut),
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub hero: HeroSettings,
    pub drone: DroneSettings,
    pub pickup: PickupSettings,
    /// Score awarded per unit of resource collected.
    pub points_per_resource: i32,
    /// Simulation ticks per second for the headless runner.
    pub tick_rate: u32,
    /// Seed for gameplay randomness (enemy waypoint choice).
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(section: &'static str, key: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        section,
        key,
        reason: reason.to_string(),
    }
}

/// Overwrite `target` if the key is present. A value that does not parse is
/// an error, not a silent default.
fn read_f32(
    config: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut f32,
) -> Result<(), ConfigError> {
    if let Some(value) = config
        .getfloat(section, key)
        .map_err(|reason| invalid(section, key, reason))?
    {
        *target = value as f32;
    }
    Ok(())
}

fn read_i32(
    config: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut i32,
) -> Result<(), ConfigError> {
    if let Some(value) = config
        .getint(section, key)
        .map_err(|reason| invalid(section, key, reason))?
    {
        *target = i32::try_from(value).map_err(|e| invalid(section, key, e))?;
    }
    Ok(())
}

fn read_u32(
    config: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut u32,
) -> Result<(), ConfigError> {
    if let Some(value) = config
        .getuint(section, key)
        .map_err(|reason| invalid(section, key, reason))?
    {
        *target = u32::try_from(value).map_err(|e| invalid(section, key, e))?;
    }
    Ok(())
}

fn positive(section: &'static str, key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            section,
            key,
            reason: format!("expected a positive number, got {}", value),
        })
    }
}

fn non_negative(section: &'static str, key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            section,
            key,
            reason: format!("expected zero or more, got {}", value),
        })
    }
}

impl GameConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            hero: HeroSettings::default(),
            drone: DroneSettings::default(),
            pickup: PickupSettings::default(),
            points_per_resource: 10,
            tick_rate: 60,
            seed: 7,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file, then validate it.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.display().to_string(),
                reason,
            })?;
        self.apply_ini(&config)?;
        self.validate()?;

        info!(
            "Loaded config: walk_speed={}, dash_cooldown={}, removal_delay={}, points_per_resource={}, tick_rate={}",
            self.hero.walk_speed,
            self.hero.dash_cooldown,
            self.pickup.removal_delay,
            self.points_per_resource,
            self.tick_rate
        );
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(|reason| ConfigError::Load {
            path: "<string>".to_string(),
            reason,
        })?;
        self.apply_ini(&config)?;
        self.validate()
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), ConfigError> {
        // [hero] section
        let hero = &mut self.hero;
        read_f32(config, "hero", "walk_speed", &mut hero.walk_speed)?;
        read_f32(config, "hero", "sprint_multiplier", &mut hero.sprint_multiplier)?;
        read_f32(config, "hero", "dash_distance", &mut hero.dash_distance)?;
        read_f32(config, "hero", "dash_cooldown", &mut hero.dash_cooldown)?;
        read_f32(config, "hero", "jump_z_velocity", &mut hero.jump_z_velocity)?;
        read_f32(config, "hero", "air_control", &mut hero.air_control)?;
        read_f32(config, "hero", "air_control_multiplier", &mut hero.air_control_multiplier)?;
        read_f32(config, "hero", "interaction_range", &mut hero.interaction_range)?;
        read_f32(config, "hero", "capsule_radius", &mut hero.capsule_radius)?;
        read_f32(config, "hero", "capsule_half_height", &mut hero.capsule_half_height)?;
        read_f32(config, "hero", "braking", &mut hero.braking)?;

        // [drone] section
        let drone = &mut self.drone;
        read_f32(config, "drone", "move_speed", &mut drone.move_speed)?;
        read_f32(config, "drone", "turn_speed", &mut drone.turn_speed)?;
        read_f32(config, "drone", "hover_height", &mut drone.hover_height)?;
        read_f32(config, "drone", "bob_amplitude", &mut drone.bob_amplitude)?;
        read_f32(config, "drone", "bob_frequency", &mut drone.bob_frequency)?;
        read_f32(config, "drone", "slow_turn_speed", &mut drone.slow_turn_speed)?;

        // [pickup] section
        let pickup = &mut self.pickup;
        read_f32(config, "pickup", "removal_delay", &mut pickup.removal_delay)?;
        read_f32(config, "pickup", "trigger_radius", &mut pickup.trigger_radius)?;
        read_f32(config, "pickup", "rotation_speed", &mut pickup.rotation_speed)?;
        read_f32(config, "pickup", "bob_amplitude", &mut pickup.bob_amplitude)?;
        read_f32(config, "pickup", "bob_frequency", &mut pickup.bob_frequency)?;
        if let Some(curve) = config.get("pickup", "bob_curve") {
            pickup.bob_curve = if curve.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    Easing::from_name(&curve).ok_or_else(|| ConfigError::InvalidValue {
                        section: "pickup",
                        key: "bob_curve",
                        reason: format!("unknown curve '{}'", curve),
                    })?,
                )
            };
        }

        // [progress] section
        read_i32(config, "progress", "points_per_resource", &mut self.points_per_resource)?;

        // [session] section
        read_u32(config, "session", "tick_rate", &mut self.tick_rate)?;
        if let Some(seed) = config
            .getuint("session", "seed")
            .map_err(|reason| invalid("session", "seed", reason))?
        {
            self.seed = seed;
        }
        Ok(())
    }

    /// Reject values that would break the gameplay rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hero", "walk_speed", self.hero.walk_speed)?;
        positive("hero", "sprint_multiplier", self.hero.sprint_multiplier)?;
        non_negative("hero", "dash_distance", self.hero.dash_distance)?;
        non_negative("hero", "dash_cooldown", self.hero.dash_cooldown)?;
        non_negative("hero", "interaction_range", self.hero.interaction_range)?;
        positive("hero", "capsule_radius", self.hero.capsule_radius)?;
        positive("hero", "capsule_half_height", self.hero.capsule_half_height)?;
        positive("drone", "move_speed", self.drone.move_speed)?;
        non_negative("drone", "slow_turn_speed", self.drone.slow_turn_speed)?;
        non_negative("pickup", "removal_delay", self.pickup.removal_delay)?;
        positive("pickup", "trigger_radius", self.pickup.trigger_radius)?;
        non_negative("pickup", "bob_frequency", self.pickup.bob_frequency)?;
        if self.points_per_resource < 0 {
            return Err(ConfigError::InvalidValue {
                section: "progress",
                key: "points_per_resource",
                reason: format!("expected zero or more, got {}", self.points_per_resource),
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidValue {
                section: "session",
                key: "tick_rate",
                reason: "tick rate must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        let hero = &self.hero;
        set("hero", "walk_speed", hero.walk_speed.to_string());
        set("hero", "sprint_multiplier", hero.sprint_multiplier.to_string());
        set("hero", "dash_distance", hero.dash_distance.to_string());
        set("hero", "dash_cooldown", hero.dash_cooldown.to_string());
        set("hero", "jump_z_velocity", hero.jump_z_velocity.to_string());
        set("hero", "air_control", hero.air_control.to_string());
        set("hero", "air_control_multiplier", hero.air_control_multiplier.to_string());
        set("hero", "interaction_range", hero.interaction_range.to_string());
        set("hero", "capsule_radius", hero.capsule_radius.to_string());
        set("hero", "capsule_half_height", hero.capsule_half_height.to_string());
        set("hero", "braking", hero.braking.to_string());

        let drone = &self.drone;
        set("drone", "move_speed", drone.move_speed.to_string());
        set("drone", "turn_speed", drone.turn_speed.to_string());
        set("drone", "hover_height", drone.hover_height.to_string());
        set("drone", "bob_amplitude", drone.bob_amplitude.to_string());
        set("drone", "bob_frequency", drone.bob_frequency.to_string());
        set("drone", "slow_turn_speed", drone.slow_turn_speed.to_string());

        let pickup = &self.pickup;
        set("pickup", "removal_delay", pickup.removal_delay.to_string());
        set("pickup", "trigger_radius", pickup.trigger_radius.to_string());
        set("pickup", "rotation_speed", pickup.rotation_speed.to_string());
        set("pickup", "bob_amplitude", pickup.bob_amplitude.to_string());
        set("pickup", "bob_frequency", pickup.bob_frequency.to_string());
        let curve = pickup.bob_curve.map_or("none", Easing::name);
        set("pickup", "bob_curve", curve.to_string());

        set("progress", "points_per_resource", self.points_per_resource.to_string());
        set("session", "tick_rate", self.tick_rate.to_string());
        set("session", "seed", self.seed.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Fixed simulation step in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
