//! Player plugin: the rig that carries the blaster.
//!
//! Pipeline:
//! - Update: sample keyboard, write PlayerInput resource
//! - FixedUpdate: apply velocity to the kinematic body, then keep it inside the arena
//!
//! Kinematic bodies are not pushed back by static walls, so the arena bound is enforced here.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::world::ARENA_HALF_EXTENTS;

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input)
        .add_systems(FixedUpdate, (apply_movement, keep_in_arena).chain());
}

const PLAYER_RADIUS: f32 = 13.0;

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::Projectile],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

/// WASD -> unit move axis.
fn axis_from_keys(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    axis.normalize_or_zero()
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    input.move_axis = keys.map(|k| axis_from_keys(&k)).unwrap_or(Vec2::ZERO);
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

/// Clamp a position so a body of `radius` stays inside the arena.
fn clamp_to_arena(pos: Vec2, radius: f32) -> Vec2 {
    let limit = (ARENA_HALF_EXTENTS - Vec2::splat(radius)).max(Vec2::ZERO);
    pos.clamp(-limit, limit)
}

fn keep_in_arena(mut q_player: Query<(&mut Transform, &mut LinearVelocity), With<Player>>) {
    let Ok((mut tf, mut vel)) = q_player.single_mut() else {
        return;
    };
    let pos = tf.translation.truncate();
    let clamped = clamp_to_arena(pos, PLAYER_RADIUS);
    if clamped == pos {
        return;
    }
    tf.translation = clamped.extend(tf.translation.z);
    // Drop the component pushing into the wall.
    if clamped.x != pos.x {
        vel.x = 0.0;
    }
    if clamped.y != pos.y {
        vel.y = 0.0;
    }
}
