//! Session-level gameplay tests.
//!
//! Each test builds a full world with `game::build_world`, so observers,
//! state hooks and the update schedule are the ones the runner uses.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use collectathon::components::hero::HeroController;
use collectathon::components::mapposition::MapPosition;
use collectathon::components::pickup::{Coin, Pickup};
use collectathon::components::rigidbody::RigidBody;
use collectathon::components::timer::Timer;
use collectathon::events::collision::OverlapEvent;
use collectathon::events::input::InputEvent;
use collectathon::events::interact::InteractEvent;
use collectathon::events::level::{LevelCompleteRequest, LevelCompletedEvent};
use collectathon::events::pickup::PickupCollectedEvent;
use collectathon::events::progress::{GameCompletedEvent, ScoreUpdatedEvent};
use collectathon::events::{subscribe, unsubscribe};
use collectathon::game;
use collectathon::level::{EnemySpec, LevelData, PickupSpec, SpawnPoint};
use collectathon::resources::gameconfig::{ConfigError, GameConfig};
use collectathon::resources::gamestate::{GameState, GameStates};
use collectathon::resources::input::{InputAction, InputBindings, TriggerPhase};
use collectathon::resources::levelcoins::LevelCoinState;
use collectathon::resources::progress::ProgressTracker;
use collectathon::resources::replication::{NetActorId, ReplicatedMessage, ReplicationHub};
use collectathon::resources::screenmessages::ScreenMessages;

const DT: f32 = 1.0 / 60.0;

fn pickup_at(x: f32, value: i32, coin: bool) -> PickupSpec {
    PickupSpec {
        position: Vec3::new(x, 0.0, 50.0),
        value,
        coin,
    }
}

/// Hero at the origin and `count` pickups 1000 units apart along +X.
fn level(count: usize, value: i32) -> LevelData {
    LevelData {
        name: "test".into(),
        hero: Some(SpawnPoint::default()),
        pickups: (1..=count)
            .map(|i| pickup_at(i as f32 * 1000.0, value, i % 2 == 1))
            .collect(),
        ..Default::default()
    }
}

fn session(level: LevelData) -> (World, Schedule) {
    let world = game::build_world(GameConfig::default(), InputBindings::default_hero(), level)
        .expect("valid session");
    (world, game::build_update_schedule())
}

fn tick(world: &mut World, schedule: &mut Schedule) {
    game::tick(world, schedule, DT);
}

fn hero(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<HeroController>>()
        .iter(world)
        .next()
        .expect("hero spawned")
}

fn pickups(world: &mut World) -> Vec<Entity> {
    let mut found: Vec<(Entity, f32)> = world
        .query::<(Entity, &Pickup, &MapPosition)>()
        .iter(world)
        .map(|(e, _, p)| (e, p.pos.x))
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found.into_iter().map(|(e, _)| e).collect()
}

fn send_input(world: &mut World, input: InputEvent) {
    world.trigger(input);
    world.flush();
}

fn move_hero_to(world: &mut World, target: Entity) {
    let pos = world.get::<MapPosition>(target).unwrap().pos;
    let hero = hero(world);
    world.get_mut::<MapPosition>(hero).unwrap().pos = Vec3::new(pos.x, pos.y, 0.0);
}

fn counter<E: Event>(world: &mut World) -> Arc<Mutex<u32>> {
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    subscribe(world, move |_trigger: On<E>| {
        *count_clone.lock().unwrap() += 1;
    });
    count
}

// =============================================================================
// Setup and registration
// =============================================================================

#[test]
fn play_start_registers_pickups_and_counts_coins() {
    let (mut world, mut schedule) = session(level(5, 2));
    assert_eq!(world.resource::<GameState>().get(), GameStates::Setup);

    tick(&mut world, &mut schedule);

    assert_eq!(world.resource::<GameState>().get(), GameStates::Playing);
    let tracker = world.resource::<ProgressTracker>();
    assert_eq!(tracker.total_pickups(), 5);
    assert_eq!(tracker.pickups_collected(), 0);
    assert_eq!(tracker.completion_percent(), 0.0);
    assert_eq!(world.resource::<LevelCoinState>().total_level_coins(), 3);
    assert!(world.resource::<ScreenMessages>().contains("Found 5 pickups in level"));
}

#[test]
fn dynamically_spawned_pickup_is_counted_once() {
    let (mut world, mut schedule) = session(level(2, 1));
    tick(&mut world, &mut schedule);
    assert_eq!(world.resource::<ProgressTracker>().total_pickups(), 2);

    world.spawn((Pickup::new(4), MapPosition::new(-5000.0, 0.0, 0.0)));
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);

    let tracker = world.resource::<ProgressTracker>();
    assert_eq!(tracker.total_pickups(), 3);
    assert!((tracker.completion_percent() - 0.0).abs() < f32::EPSILON);
}

// =============================================================================
// Collection and progress
// =============================================================================

#[test]
fn collecting_every_pickup_scores_and_completes_once() {
    let (mut world, mut schedule) = session(level(5, 2));
    let completed = counter::<GameCompletedEvent>(&mut world);
    let scores = Arc::new(Mutex::new(Vec::new()));
    let scores_clone = scores.clone();
    subscribe(&mut world, move |trigger: On<ScoreUpdatedEvent>| {
        scores_clone.lock().unwrap().push(trigger.event().score);
    });
    tick(&mut world, &mut schedule);

    for pickup in pickups(&mut world) {
        move_hero_to(&mut world, pickup);
        tick(&mut world, &mut schedule);
        assert!(world.get::<Pickup>(pickup).unwrap().is_collected());
    }

    let tracker = world.resource::<ProgressTracker>();
    assert_eq!(tracker.pickups_collected(), 5);
    assert_eq!(tracker.score(), 100);
    assert_eq!(tracker.total_resources(), 10);
    assert_eq!(tracker.completion_percent(), 100.0);
    assert_eq!(*scores.lock().unwrap(), vec![20, 40, 60, 80, 100]);
    assert_eq!(*completed.lock().unwrap(), 1);

    let result = world
        .resource::<LevelCoinState>()
        .level_result()
        .expect("level result recorded");
    let hero = hero(&mut world);
    assert_eq!(result.actor, hero);
    assert!(result.succeeded);

    tick(&mut world, &mut schedule);
    assert_eq!(world.resource::<GameState>().get(), GameStates::Completed);
    assert_eq!(*completed.lock().unwrap(), 1);
}

#[test]
fn overlap_and_interaction_in_same_tick_collect_once() {
    let (mut world, mut schedule) = session(level(3, 1));
    let collected = counter::<PickupCollectedEvent>(&mut world);
    let interactions = Arc::new(Mutex::new(Vec::new()));
    let interactions_clone = interactions.clone();
    subscribe(&mut world, move |trigger: On<InteractEvent>| {
        interactions_clone.lock().unwrap().push(*trigger.event());
    });
    tick(&mut world, &mut schedule);

    let target = pickups(&mut world)[0];
    move_hero_to(&mut world, target);
    send_input(
        &mut world,
        InputEvent::new(InputAction::Interact, TriggerPhase::Triggered),
    );
    tick(&mut world, &mut schedule);
    send_input(
        &mut world,
        InputEvent::new(InputAction::Interact, TriggerPhase::Triggered),
    );

    assert_eq!(*collected.lock().unwrap(), 1);
    let tracker = world.resource::<ProgressTracker>();
    assert_eq!(tracker.pickups_collected(), 1);
    assert_eq!(tracker.score(), 10);

    // The collected pickup is still waiting for removal but is no longer
    // something to interact with.
    let interactions = interactions.lock().unwrap();
    assert_eq!(interactions.len(), 1);
    assert!(interactions[0].collected);
    assert_eq!(interactions[0].target, target);
    assert!(world.get_entity(target).is_ok());
    assert!(!world.resource::<ScreenMessages>().contains("Interacted with:"));
}

#[test]
fn repeated_overlap_events_collect_once() {
    let (mut world, mut schedule) = session(level(2, 3));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);
    let target = pickups(&mut world)[0];

    world.trigger(OverlapEvent { a: hero, b: target });
    world.trigger(OverlapEvent { a: target, b: hero });
    world.flush();

    let tracker = world.resource::<ProgressTracker>();
    assert_eq!(tracker.pickups_collected(), 1);
    assert_eq!(tracker.total_resources(), 3);
}

#[test]
fn overlap_with_non_character_does_not_collect() {
    let (mut world, mut schedule) = session(level(2, 1));
    tick(&mut world, &mut schedule);
    let targets = pickups(&mut world);

    world.trigger(OverlapEvent {
        a: targets[0],
        b: targets[1],
    });
    world.flush();

    assert_eq!(world.resource::<ProgressTracker>().pickups_collected(), 0);
}

#[test]
fn interacting_with_nothing_collectible_reports_it() {
    let mut lvl = level(1, 1);
    // A second hero-less target: an enemy standing in front of the hero.
    lvl.enemies.push(EnemySpec {
        position: Vec3::new(300.0, 0.0, 0.0),
        waypoints: vec![],
        speed: 0.0,
        radius: 42.0,
    });
    let (mut world, mut schedule) = session(lvl);
    let interactions = Arc::new(Mutex::new(Vec::new()));
    let interactions_clone = interactions.clone();
    subscribe(&mut world, move |trigger: On<InteractEvent>| {
        interactions_clone.lock().unwrap().push(*trigger.event());
    });
    tick(&mut world, &mut schedule);

    send_input(
        &mut world,
        InputEvent::new(InputAction::Interact, TriggerPhase::Triggered),
    );

    let interactions = interactions.lock().unwrap();
    assert_eq!(interactions.len(), 1);
    assert!(!interactions[0].collected);
    assert!(world.resource::<ScreenMessages>().contains("Interacted with:"));
    assert_eq!(world.resource::<ProgressTracker>().pickups_collected(), 0);
}

#[test]
fn collected_pickup_is_removed_after_delay() {
    let (mut world, mut schedule) = session(level(2, 1));
    tick(&mut world, &mut schedule);
    let target = pickups(&mut world)[0];
    move_hero_to(&mut world, target);

    tick(&mut world, &mut schedule);
    assert!(world.get_entity(target).is_ok());
    assert!(world.get::<Pickup>(target).unwrap().is_collected());

    for _ in 0..10 {
        tick(&mut world, &mut schedule);
    }
    assert!(world.get_entity(target).is_err());
    // Removal does not unregister it.
    assert_eq!(world.resource::<ProgressTracker>().total_pickups(), 2);
}

// =============================================================================
// Hero controls
// =============================================================================

#[test]
fn sprint_and_crouch_are_mutually_exclusive() {
    let (mut world, mut schedule) = session(level(1, 1));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);

    send_input(&mut world, InputEvent::new(InputAction::Sprint, TriggerPhase::Started));
    send_input(&mut world, InputEvent::new(InputAction::Crouch, TriggerPhase::Started));
    {
        let h = world.get::<HeroController>(hero).unwrap();
        assert!(h.is_sprinting());
        assert!(!h.is_crouching());
        assert_eq!(h.max_walk_speed(), 1200.0);
    }

    send_input(&mut world, InputEvent::new(InputAction::Sprint, TriggerPhase::Completed));
    send_input(&mut world, InputEvent::new(InputAction::Crouch, TriggerPhase::Started));
    send_input(&mut world, InputEvent::new(InputAction::Sprint, TriggerPhase::Started));
    let h = world.get::<HeroController>(hero).unwrap();
    assert!(!h.is_sprinting());
    assert!(h.is_crouching());
    assert_eq!(h.max_walk_speed(), 300.0);
    assert_eq!(h.current_half_height(), 48.0);
}

#[test]
fn move_input_walks_along_control_yaw() {
    let (mut world, mut schedule) = session(level(1, 1));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);

    send_input(
        &mut world,
        InputEvent::new(InputAction::Move, TriggerPhase::Triggered).with_axis(Vec2::new(0.0, 1.0)),
    );
    tick(&mut world, &mut schedule);

    let body = world.get::<RigidBody>(hero).unwrap();
    assert!((body.velocity.x - 600.0).abs() < 1e-3);
    assert!(body.velocity.y.abs() < 1e-3);
    let pos = world.get::<MapPosition>(hero).unwrap().pos;
    assert!((pos.x - 600.0 * DT).abs() < 1e-3);

    // Input is consumed every tick.
    tick(&mut world, &mut schedule);
    assert!(world.get::<RigidBody>(hero).unwrap().velocity.x.abs() < 1e-3);
}

#[test]
fn dash_on_cooldown_neither_launches_nor_reschedules() {
    let (mut world, mut schedule) = session(level(1, 1));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);

    send_input(&mut world, InputEvent::new(InputAction::Dash, TriggerPhase::Triggered));
    {
        let body = world.get::<RigidBody>(hero).unwrap();
        assert_eq!(body.impulse, Vec3::new(1000.0, 0.0, 0.0));
        assert!(!world.get::<HeroController>(hero).unwrap().can_dash());
    }
    tick(&mut world, &mut schedule);
    let elapsed = world.get::<Timer>(hero).unwrap().elapsed;
    assert!(elapsed > 0.0);

    send_input(&mut world, InputEvent::new(InputAction::Dash, TriggerPhase::Triggered));
    assert_eq!(world.get::<RigidBody>(hero).unwrap().impulse, Vec3::ZERO);
    assert_eq!(world.get::<Timer>(hero).unwrap().elapsed, elapsed);

    // Cooldown is 2 s.
    for _ in 0..125 {
        tick(&mut world, &mut schedule);
    }
    assert!(world.get::<HeroController>(hero).unwrap().can_dash());
    assert!(world.get::<Timer>(hero).is_none());
}

#[test]
fn jump_leaves_ground_and_lands() {
    let (mut world, mut schedule) = session(level(1, 1));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);

    send_input(&mut world, InputEvent::new(InputAction::Jump, TriggerPhase::Triggered));
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);
    assert!(world.get::<MapPosition>(hero).unwrap().pos.z > 0.0);

    for _ in 0..120 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(world.get::<MapPosition>(hero).unwrap().pos.z, 0.0);
    assert!(!world.get::<HeroController>(hero).unwrap().wants_jump());
}

// =============================================================================
// Level completion and replication
// =============================================================================

#[test]
fn observers_receive_identical_payloads() {
    let (mut world, mut schedule) = session(level(2, 1));
    let mut observers: Vec<_> = {
        let mut hub = world.resource_mut::<ReplicationHub>();
        (0..3).map(|_| hub.connect()).collect()
    };
    tick(&mut world, &mut schedule);
    for pickup in pickups(&mut world) {
        move_hero_to(&mut world, pickup);
        tick(&mut world, &mut schedule);
    }
    let hero = hero(&mut world);

    let received: Vec<Vec<ReplicatedMessage>> = observers.iter_mut().map(|o| o.poll()).collect();
    assert_eq!(
        received[0],
        vec![
            ReplicatedMessage::LevelCoins {
                total_level_coins: 1
            },
            ReplicatedMessage::LevelComplete {
                actor: NetActorId::from(hero),
                succeeded: true
            },
        ]
    );
    assert!(received.iter().all(|r| *r == received[0]));
    for observer in &observers {
        assert_eq!(observer.replica().level_complete_count, 1);
    }
}

#[test]
fn level_completes_only_once() {
    let (mut world, mut schedule) = session(level(1, 1));
    let mut observer = world.resource_mut::<ReplicationHub>().connect();
    let completed = counter::<LevelCompletedEvent>(&mut world);
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);

    world.trigger(LevelCompleteRequest {
        actor: hero,
        succeeded: true,
    });
    world.trigger(LevelCompleteRequest {
        actor: hero,
        succeeded: false,
    });
    world.flush();

    assert_eq!(*completed.lock().unwrap(), 1);
    let result = world.resource::<LevelCoinState>().level_result().unwrap();
    assert!(result.succeeded);

    observer.poll();
    assert_eq!(observer.replica().level_complete_count, 1);
    assert_eq!(observer.replica().level_result, Some((NetActorId::from(hero), true)));
}

#[test]
fn late_observer_gets_coin_count_but_not_completion() {
    let (mut world, mut schedule) = session(level(4, 1));
    tick(&mut world, &mut schedule);
    let hero = hero(&mut world);
    world.trigger(LevelCompleteRequest {
        actor: hero,
        succeeded: true,
    });
    world.flush();

    let mut late = world.resource_mut::<ReplicationHub>().connect();
    let messages = late.poll();
    assert_eq!(
        messages,
        vec![ReplicatedMessage::LevelCoins {
            total_level_coins: 2
        }]
    );
    assert_eq!(late.replica().level_result, None);
}

#[test]
fn enemy_touching_hero_fails_the_level() {
    let mut lvl = level(1, 1);
    lvl.enemies.push(EnemySpec {
        position: Vec3::new(20.0, 0.0, 0.0),
        waypoints: vec![],
        speed: 0.0,
        radius: 42.0,
    });
    let (mut world, mut schedule) = session(lvl);
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);

    let result = world.resource::<LevelCoinState>().level_result().unwrap();
    let hero = hero(&mut world);
    assert_eq!(result.actor, hero);
    assert!(!result.succeeded);
    assert_eq!(world.resource::<GameState>().get(), GameStates::Completed);
}

// =============================================================================
// Event bus and configuration
// =============================================================================

#[test]
fn unsubscribed_handler_stops_receiving() {
    let (mut world, mut schedule) = session(level(2, 1));
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    let subscription = subscribe(&mut world, move |_trigger: On<PickupCollectedEvent>| {
        *count_clone.lock().unwrap() += 1;
    });
    tick(&mut world, &mut schedule);
    let targets = pickups(&mut world);

    move_hero_to(&mut world, targets[0]);
    tick(&mut world, &mut schedule);
    assert!(unsubscribe(&mut world, subscription));
    move_hero_to(&mut world, targets[1]);
    tick(&mut world, &mut schedule);

    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(world.resource::<ProgressTracker>().pickups_collected(), 2);
    assert!(!unsubscribe(&mut world, subscription));
}

#[test]
fn build_world_rejects_missing_bindings() {
    let mut bindings = InputBindings::default_hero();
    bindings.unbind(InputAction::Interact, TriggerPhase::Triggered);
    let err = game::build_world(GameConfig::default(), bindings, level(1, 1)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingInputAction { .. }));
}

#[test]
fn build_world_rejects_invalid_config() {
    let mut config = GameConfig::default();
    config.pickup.removal_delay = -1.0;
    let err = game::build_world(config, InputBindings::default_hero(), level(1, 1)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidValue {
            section: "pickup",
            key: "removal_delay",
            reason: "expected zero or more, got -1".to_string(),
        }
    );
}

#[test]
fn coins_are_the_marked_pickups() {
    let (mut world, mut schedule) = session(level(3, 1));
    tick(&mut world, &mut schedule);
    let coins = world
        .query_filtered::<Entity, With<Coin>>()
        .iter(&world)
        .count();
    assert_eq!(coins, 2);
    assert_eq!(world.resource::<LevelCoinState>().total_level_coins(), 2);
}
