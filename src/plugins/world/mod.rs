//! World plugin: a walled arena standing in for the play space.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 12;
const HALF_H: i32 = TILE * 8;
const WALL_THICKNESS: f32 = 30.0;

/// Half extents of the walkable area inside the walls.
pub const ARENA_HALF_EXTENTS: Vec2 = Vec2::new(HALF_W as f32, HALF_H as f32);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_floor));
}

#[inline]
fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::Enemy, Layer::Projectile],
    )
}

/// Centre and size of the four walls enclosing the arena.
fn wall_rects() -> [(&'static str, Vec2, Vec2); 4] {
    let (w, h, t) = (HALF_W as f32, HALF_H as f32, WALL_THICKNESS);
    let horizontal = Vec2::new(w * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, h * 2.0);
    [
        ("WallTop", Vec2::new(0.0, h + t * 0.5), horizontal),
        ("WallBottom", Vec2::new(0.0, -h - t * 0.5), horizontal),
        ("WallLeft", Vec2::new(-w - t * 0.5, 0.0), vertical),
        ("WallRight", Vec2::new(w + t * 0.5, 0.0), vertical),
    ]
}

fn spawn_arena(mut commands: Commands) {
    let color = Color::srgb(0.22, 0.24, 0.3);

    for (name, pos, size) in wall_rects() {
        commands.spawn((
            Name::new(name),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Checkerboard floor from solid-colour sprites; no assets needed.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y).rem_euclid(2) == 0 {
                Color::srgb(0.12, 0.13, 0.15)
            } else {
                Color::srgb(0.10, 0.11, 0.13)
            };
            let centre = (Vec2::new(x as f32, y as f32) + 0.5) * TILE as f32;

            commands.spawn((
                Name::new("Floor"),
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(centre.extend(-1.0)),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

#[cfg(test)]
mod tests;
