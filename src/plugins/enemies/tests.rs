//! Brain rules are tested on plain values; `think` and the attack telegraph run through the ECS.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::rng::GameRng;
use crate::common::test_utils::{insert_clock, run_system_once};
use crate::common::tunables::{EnemyTunables, Tunables};
use crate::plugins::effects::{EffectProfile, Platform, SpawnEffect};
use crate::plugins::navigation::NavAgent;
use crate::plugins::player::Player;

use super::brain::{EnemyMode, NavCommand, Perception, WanderBrain, random_point_in_disc};
use super::{Enemy, EnemyAttack, telegraph_attacks, think};

fn cfg() -> EnemyTunables {
    EnemyTunables {
        detection_range: 300.0,
        attack_range: 40.0,
        wander_radius: 200.0,
        wander_interval: 5.0,
        idle_min: 2.0,
        idle_max: 5.0,
        ..default()
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn far(arrived: bool) -> Perception {
    Perception {
        player_pos: Vec2::new(10_000.0, 0.0),
        distance_to_player: 10_000.0,
        arrived,
    }
}

#[test]
fn random_points_stay_in_the_disc() {
    let mut rng = rng();
    let center = Vec2::new(50.0, -20.0);
    for _ in 0..500 {
        let p = random_point_in_disc(&mut rng, center, 200.0);
        assert!(p.distance(center) <= 200.0 + 1e-3);
    }
}

#[test]
fn first_step_picks_a_wander_destination() {
    let cfg = cfg();
    let home = Vec2::new(100.0, 100.0);
    let mut brain = WanderBrain::new(home, &cfg);

    match brain.step(0.016, far(false), &cfg, &mut rng()) {
        NavCommand::MoveTo(dest) => assert!(dest.distance(home) <= cfg.wander_radius + 1e-3),
        other => panic!("expected MoveTo, got {other:?}"),
    }
    assert_eq!(brain.mode(), EnemyMode::Wandering);
}

#[test]
fn wanders_on_the_interval_and_holds_in_between() {
    let cfg = cfg();
    let mut rng = rng();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    brain.step(0.0, far(false), &cfg, &mut rng);

    assert_eq!(brain.step(2.0, far(false), &cfg, &mut rng), NavCommand::Hold);
    assert!(matches!(
        brain.step(3.0, far(false), &cfg, &mut rng),
        NavCommand::MoveTo(_)
    ));
}

#[test]
fn arriving_goes_idle_then_resumes() {
    let cfg = cfg();
    let mut rng = rng();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    brain.step(0.0, far(false), &cfg, &mut rng);

    assert_eq!(brain.step(0.1, far(true), &cfg, &mut rng), NavCommand::Stop);
    assert_eq!(brain.mode(), EnemyMode::Idle);

    // Idle lasts at least `idle_min` and less than `idle_max`.
    assert_eq!(brain.step(1.9, far(true), &cfg, &mut rng), NavCommand::Stop);
    assert_eq!(brain.mode(), EnemyMode::Idle);
    brain.step(cfg.idle_max, far(true), &cfg, &mut rng);
    assert_eq!(brain.mode(), EnemyMode::Wandering);
}

#[test]
fn detection_starts_a_chase() {
    let cfg = cfg();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    let seen = Perception {
        player_pos: Vec2::new(150.0, 0.0),
        distance_to_player: 150.0,
        arrived: false,
    };

    assert_eq!(
        brain.step(0.016, seen, &cfg, &mut rng()),
        NavCommand::MoveTo(Vec2::new(150.0, 0.0))
    );
    assert_eq!(brain.mode(), EnemyMode::Chasing);
}

#[test]
fn attack_range_stops_and_attacks() {
    let cfg = cfg();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    let seen = Perception {
        player_pos: Vec2::new(30.0, 0.0),
        distance_to_player: 30.0,
        arrived: false,
    };

    assert_eq!(brain.step(0.016, seen, &cfg, &mut rng()), NavCommand::Stop);
    assert_eq!(brain.mode(), EnemyMode::Attacking);
}

#[test]
fn detection_interrupts_idle() {
    let cfg = cfg();
    let mut rng = rng();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    brain.step(0.0, far(false), &cfg, &mut rng);
    brain.step(0.1, far(true), &cfg, &mut rng);
    assert_eq!(brain.mode(), EnemyMode::Idle);

    let seen = Perception {
        player_pos: Vec2::new(100.0, 0.0),
        distance_to_player: 100.0,
        arrived: true,
    };
    brain.step(0.1, seen, &cfg, &mut rng);
    assert_eq!(brain.mode(), EnemyMode::Chasing);
}

#[test]
fn losing_the_player_returns_to_wandering() {
    let cfg = cfg();
    let mut rng = rng();
    let mut brain = WanderBrain::new(Vec2::ZERO, &cfg);
    let seen = Perception {
        player_pos: Vec2::new(100.0, 0.0),
        distance_to_player: 100.0,
        arrived: false,
    };
    brain.step(0.1, seen, &cfg, &mut rng);
    assert_eq!(brain.mode(), EnemyMode::Chasing);

    brain.step(0.1, far(false), &cfg, &mut rng);
    assert_eq!(brain.mode(), EnemyMode::Wandering);
    assert_eq!(brain.home(), Vec2::ZERO);
}

#[test]
fn think_drives_nav_and_reports_attacks() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameRng::new(1));
    world.init_resource::<Messages<EnemyAttack>>();
    insert_clock(&mut world, Duration::from_millis(16));

    let player = world.spawn((Player, Transform::from_xyz(0.0, 0.0, 1.0))).id();
    let cfg = Tunables::default().enemy;

    let close = world
        .spawn((
            Enemy,
            WanderBrain::new(Vec2::ZERO, &cfg),
            NavAgent::new(cfg.move_speed, 5.0),
            Transform::from_xyz(cfg.attack_range * 0.5, 0.0, 1.0),
        ))
        .id();
    let chasing = world
        .spawn((
            Enemy,
            WanderBrain::new(Vec2::ZERO, &cfg),
            NavAgent::new(cfg.move_speed, 5.0),
            Transform::from_xyz(cfg.detection_range * 0.5, 0.0, 1.0),
        ))
        .id();

    run_system_once(&mut world, think);

    assert!(world.get::<NavAgent>(close).is_some_and(|n| n.stopped));
    assert_eq!(
        world.get::<NavAgent>(chasing).and_then(|n| n.destination()),
        Some(Vec2::ZERO)
    );

    let attacks: Vec<EnemyAttack> = world
        .resource_mut::<Messages<EnemyAttack>>()
        .drain()
        .collect();
    assert_eq!(attacks.len(), 1);
    assert_eq!(attacks[0].enemy, close);
    assert_eq!(attacks[0].target, player);
}

fn drain_attacks(world: &mut World) -> Vec<EnemyAttack> {
    world.resource_mut::<Messages<EnemyAttack>>().drain().collect()
}

#[test]
fn attack_is_reported_once_per_approach() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameRng::new(3));
    world.init_resource::<Messages<EnemyAttack>>();
    insert_clock(&mut world, Duration::from_millis(16));

    let cfg = Tunables::default().enemy;
    world.spawn((Player, Transform::from_xyz(0.0, 0.0, 1.0)));
    let enemy = world
        .spawn((
            Enemy,
            WanderBrain::new(Vec2::ZERO, &cfg),
            NavAgent::new(cfg.move_speed, 5.0),
            Transform::from_xyz(cfg.attack_range * 0.5, 0.0, 1.0),
        ))
        .id();

    run_system_once(&mut world, think);
    assert_eq!(drain_attacks(&mut world).len(), 1);

    run_system_once(&mut world, think);
    assert!(drain_attacks(&mut world).is_empty());

    // Back off into chase range, then close in again.
    world.get_mut::<Transform>(enemy).expect("transform").translation.x =
        (cfg.attack_range + cfg.detection_range) * 0.5;
    run_system_once(&mut world, think);
    assert!(drain_attacks(&mut world).is_empty());

    world.get_mut::<Transform>(enemy).expect("transform").translation.x =
        cfg.attack_range * 0.5;
    run_system_once(&mut world, think);
    let attacks = drain_attacks(&mut world);
    assert_eq!(attacks.len(), 1);
    assert_eq!(attacks[0].enemy, enemy);
}

#[test]
fn attack_flashes_the_attack_effect_on_the_enemy() {
    let mut world = World::new();
    let profile = EffectProfile::for_platform(Platform::Tethered);
    world.insert_resource(profile);
    world.init_resource::<Messages<EnemyAttack>>();
    world.init_resource::<Messages<SpawnEffect>>();

    let player = world.spawn((Player, Transform::default())).id();
    let enemy = world
        .spawn((Enemy, Transform::from_xyz(12.0, -7.0, 1.0)))
        .id();
    world.write_message(EnemyAttack {
        enemy,
        target: player,
    });

    run_system_once(&mut world, telegraph_attacks);

    let effects: Vec<SpawnEffect> = world
        .resource_mut::<Messages<SpawnEffect>>()
        .drain()
        .collect();
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].pos, Vec2::new(12.0, -7.0));
    assert_eq!(effects[0].effect, profile.attack);
}
