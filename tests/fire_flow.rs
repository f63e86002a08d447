//! End-to-end projectile flow in a headless app: trigger -> pool -> hit -> damage -> return.

mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use vr_blaster::plugins::combat::Health;
use vr_blaster::plugins::enemies::Enemy;
use vr_blaster::plugins::interaction::{Blaster, Grabbable};
use vr_blaster::plugins::player::Player;
use vr_blaster::plugins::projectiles::components::ProjectileState;
use vr_blaster::plugins::projectiles::launcher::Launcher;
use vr_blaster::plugins::projectiles::messages::{ProjectileHit, TriggerPhase, TriggerSignal};
use vr_blaster::plugins::projectiles::pool::ProjectilePool;

/// Every `ProjectileHit` seen since the app started.
#[derive(Resource, Default)]
struct SeenHits(Vec<ProjectileHit>);

fn record_hits(mut hits: MessageReader<ProjectileHit>, mut seen: ResMut<SeenHits>) {
    seen.0.extend(hits.read().copied());
}

fn pull_trigger(app: &mut App, launcher: Entity, phase: TriggerPhase) {
    app.world_mut().write_message(TriggerSignal { launcher, phase });
}

fn active_projectile(app: &mut App) -> Entity {
    app.world_mut()
        .query::<(Entity, &ProjectileState)>()
        .iter(app.world())
        .find(|(_, s)| **s == ProjectileState::Active)
        .map(|(e, _)| e)
        .expect("an active projectile")
}

#[test]
fn trigger_press_launches_one_projectile() {
    let mut app = common::app_headless();
    app.update();
    let blaster = common::single::<Blaster>(&mut app);

    pull_trigger(&mut app, blaster, TriggerPhase::Activated);
    app.update();

    assert_eq!(app.world().resource::<ProjectilePool>().active_len(), 1);
    let p = active_projectile(&mut app);
    assert_eq!(
        app.world().get::<Visibility>(p),
        Some(&Visibility::Visible)
    );
}

#[test]
fn release_stops_the_stream() {
    let mut app = common::app_headless();
    app.update();
    let blaster = common::single::<Blaster>(&mut app);

    pull_trigger(&mut app, blaster, TriggerPhase::Activated);
    for _ in 0..10 {
        app.update();
    }
    assert!(app.world().get::<Launcher>(blaster).is_some_and(|l| l.fire.is_firing()));

    pull_trigger(&mut app, blaster, TriggerPhase::Deactivated);
    app.update();
    assert!(app.world().get::<Launcher>(blaster).is_some_and(|l| !l.fire.is_firing()));
    let fired = app.world().resource::<ProjectilePool>().stats();

    for _ in 0..10 {
        app.update();
    }
    let later = app.world().resource::<ProjectilePool>().stats();

    assert!(later.active <= fired.active);
    assert_eq!(later.allocated, fired.allocated);
}

#[test]
fn hit_damages_enemy_and_returns_projectile() {
    let mut app = common::app_headless();
    app.update();
    let blaster = common::single::<Blaster>(&mut app);

    pull_trigger(&mut app, blaster, TriggerPhase::Activated);
    pull_trigger(&mut app, blaster, TriggerPhase::Deactivated);
    app.update();

    let projectile = active_projectile(&mut app);
    let enemy = app
        .world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .next()
        .expect("an enemy");
    let before = app.world().get::<Health>(enemy).map(|h| h.hp);

    app.world_mut().write_message(CollisionStart {
        collider1: projectile,
        collider2: enemy,
        body1: Some(projectile),
        body2: Some(enemy),
    });
    app.update();

    assert_eq!(
        app.world().get::<ProjectileState>(projectile),
        Some(&ProjectileState::Inactive)
    );
    assert_eq!(app.world().resource::<ProjectilePool>().active_len(), 0);
    assert_eq!(
        app.world().get::<Health>(enemy).map(|h| h.hp),
        before.map(|hp| hp - 1)
    );
}

#[test]
fn shooting_backwards_never_hits_the_holder() {
    let mut app = common::app_headless();
    app.init_resource::<SeenHits>()
        .add_systems(Last, record_hits);
    app.update();

    let player = common::single::<Player>(&mut app);
    let blaster = common::single::<Blaster>(&mut app);
    app.world_mut()
        .get_mut::<Grabbable>(blaster)
        .expect("grabbable")
        .held_by = Some(player);
    app.update();
    assert_eq!(
        app.world().get::<Launcher>(blaster).and_then(|l| l.wielder),
        Some(player)
    );

    app.world_mut()
        .get_mut::<Launcher>(blaster)
        .expect("launcher")
        .aim = Vec2::NEG_X;
    pull_trigger(&mut app, blaster, TriggerPhase::Activated);
    pull_trigger(&mut app, blaster, TriggerPhase::Deactivated);
    for _ in 0..3 {
        app.update();
    }

    assert!(app.world().resource::<SeenHits>().0.is_empty());
    assert_eq!(app.world().resource::<ProjectilePool>().active_len(), 1);
}
