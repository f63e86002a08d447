use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;

#[test]
fn spawns_four_static_walls() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn walls_stop_projectiles_and_actors() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let expected = LayerMask::from([Layer::Player, Layer::Enemy, Layer::Projectile]);
    for layers in world.query::<&CollisionLayers>().iter(&world) {
        assert_eq!(layers.memberships, LayerMask::from(Layer::World));
        assert_eq!(layers.filters, expected);
    }
}

#[test]
fn walls_enclose_the_arena() {
    let rects = super::wall_rects();
    let top = rects[0].1.y - rects[0].2.y * 0.5;
    let bottom = rects[1].1.y + rects[1].2.y * 0.5;
    let left = rects[2].1.x + rects[2].2.x * 0.5;
    let right = rects[3].1.x - rects[3].2.x * 0.5;
    assert!(top > 0.0 && bottom < 0.0 && left < 0.0 && right > 0.0);
    assert_eq!(top, -bottom);
    assert_eq!(right, -left);
}

#[test]
fn floor_tiles_cover_the_arena() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_floor);

    let tiles = world
        .query::<&Name>()
        .iter(&world)
        .filter(|n| n.as_str() == "Floor")
        .count();
    assert_eq!(tiles, 24 * 16);
}
