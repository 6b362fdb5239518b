//! Session wiring.
//!
//! Builds the [`World`] for a play session: resources, observers, state
//! hooks and the per-tick update [`Schedule`]. The state flow is
//! `None -> Setup -> Playing -> Completed`.
//!
//! - `setup` spawns the level and moves on to `Playing`
//! - `enter_play` counts pickups and coins
//! - the level result moves the session to `Completed`

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::level::{
    LevelCompletedEvent, observe_game_completed, observe_level_complete_request,
};
use crate::events::pickup::observe_pickup_collected;
use crate::level::{LevelData, spawn_level};
use crate::resources::gameconfig::{ConfigError, GameConfig};
use crate::resources::gamerng::GameRng;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputBindings, REQUIRED_HERO_BINDINGS};
use crate::resources::levelcoins::LevelCoinState;
use crate::resources::progress::ProgressTracker;
use crate::resources::replication::ReplicationHub;
use crate::resources::screenmessages::{MessageLevel, ScreenMessages};
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::drone::{drone_controller, observe_drone_command};
use crate::systems::enemy::{
    begin_patrols, observe_enemy_contact, observe_move_completed, patrol_system,
};
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::hero::{hero_locomotion, observe_hero_command, observe_hero_timer};
use crate::systems::input::{observe_input_event, replay_input_script};
use crate::systems::levelcoins::update_total_coins_in_level;
use crate::systems::movement::movement_system;
use crate::systems::overlap::overlap_detector;
use crate::systems::pickup::{observe_pickup_overlap, register_new_pickups};
use crate::systems::screenmessages::screen_messages_system;
use crate::systems::time::{update_timers, update_world_time};
use crate::systems::ttl::ttl_system;
use crate::systems::tween::{bob_system, spin_system};

/// Spawn the level and start playing.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    level: Res<LevelData>,
    mut next_state: ResMut<NextGameState>,
) {
    spawn_level(&mut commands, &config, &level);
    commands.insert_resource(level.input_script());
    next_state.set(GameStates::Playing);
}

/// Count what the level contains once it is spawned.
pub fn enter_play(mut commands: Commands) {
    info!("Entering play");
    commands.run_system_cached(register_new_pickups);
    commands.run_system_cached(update_total_coins_in_level);
}

pub fn enter_completed(
    coin_state: Res<LevelCoinState>,
    tracker: Res<ProgressTracker>,
    time: Res<WorldTime>,
) {
    let outcome = match coin_state.level_result() {
        Some(result) if result.succeeded => "succeeded",
        Some(_) => "failed",
        None => "ended",
    };
    info!(
        "Level {} after {:.2}s: score {}, resources {}, {}/{} pickups ({:.1}%)",
        outcome,
        time.elapsed,
        tracker.score(),
        tracker.total_resources(),
        tracker.pickups_collected(),
        tracker.total_pickups(),
        tracker.completion_percent()
    );
}

/// Local completion hook: report the result and close the level.
pub fn observe_level_completed(
    trigger: On<LevelCompletedEvent>,
    mut next_state: ResMut<NextGameState>,
    mut messages: ResMut<ScreenMessages>,
) {
    let event = trigger.event();
    if event.succeeded {
        messages.push("Level complete!", 5.0, MessageLevel::Success);
    } else {
        messages.push("Level failed!", 5.0, MessageLevel::Warning);
    }
    next_state.set(GameStates::Completed);
}

/// Spawn every gameplay observer.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(observe_input_event));
    world.spawn(Observer::new(observe_hero_command));
    world.spawn(Observer::new(observe_hero_timer));
    world.spawn(Observer::new(observe_drone_command));
    world.spawn(Observer::new(observe_pickup_overlap));
    world.spawn(Observer::new(observe_pickup_collected));
    world.spawn(Observer::new(observe_game_completed));
    world.spawn(Observer::new(observe_level_complete_request));
    world.spawn(Observer::new(observe_level_completed));
    world.spawn(Observer::new(observe_move_completed));
    world.spawn(Observer::new(observe_enemy_contact));
    world.flush();
}

/// Register the state enter hooks and store their ids.
pub fn register_state_hooks(world: &mut World) {
    let mut systems_store = SystemsStore::new();
    systems_store.insert("setup", world.register_system(setup));
    systems_store.insert("enter_play", world.register_system(enter_play));
    systems_store.insert("enter_completed", world.register_system(enter_completed));
    world.insert_resource(systems_store);
}

/// Per-tick gameplay schedule.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(check_pending_state);
    update.add_systems(
        (
            replay_input_script,
            register_new_pickups,
            (hero_locomotion, drone_controller, (begin_patrols, patrol_system).chain()),
            movement_system,
            (spin_system, bob_system),
            overlap_detector,
            update_timers,
            ttl_system,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state),
    );
    update.add_systems(screen_messages_system.after(check_pending_state));
    update
}

/// Build a world ready to tick: validated config, bindings and level.
///
/// The session is put into `Setup`, so the level is spawned before this
/// returns.
pub fn build_world(
    config: GameConfig,
    bindings: InputBindings,
    level: LevelData,
) -> Result<World, ConfigError> {
    config.validate()?;
    bindings.validate(REQUIRED_HERO_BINDINGS)?;

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ProgressTracker::new(config.points_per_resource));
    world.insert_resource(GameRng::with_seed(config.seed));
    world.insert_resource(config);
    world.insert_resource(bindings);
    world.insert_resource(level);
    world.insert_resource(LevelCoinState::default());
    world.insert_resource(ReplicationHub::new());
    world.insert_resource(ScreenMessages::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    register_observers(&mut world);
    register_state_hooks(&mut world);

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();
    Ok(world)
}

/// Advance the session one tick of `dt` seconds.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Run `ticks` ticks, calling `after_tick` after each one.
pub fn run(
    world: &mut World,
    schedule: &mut Schedule,
    ticks: u64,
    dt: f32,
    mut after_tick: impl FnMut(&mut World),
) {
    for _ in 0..ticks {
        tick(world, schedule, dt);
        after_tick(world);
    }
    if world.resource::<GameState>().get() != GameStates::Completed {
        warn!("Stopped after {} ticks without a level result", ticks);
    }
}
