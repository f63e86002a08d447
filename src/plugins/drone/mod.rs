//! Drone plugin: a companion drone that keeps near the player.
//!
//! Rules, every frame:
//! - farther than `max_follow_distance`: teleport next to the player
//! - every `update_path_interval`: follow if farther than `follow_distance`, else stop
//! - hover bob and turn towards the player (or along its velocity)
//!
//! Projectile hits damage it through the combat plugin like any other target.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::rng::GameRng;
use crate::common::tunables::DroneTunables;
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::combat::{Dead, DeathEffect, Health};
use crate::plugins::effects::EffectProfile;
use crate::plugins::enemies::brain::random_point_in_disc;
use crate::plugins::navigation::NavAgent;
use crate::plugins::player::Player;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DroneDecision {
    Teleport,
    Follow,
    Stop,
    Hold,
}

#[derive(Component, Debug, Clone)]
pub struct Drone {
    since_path_update: f32,
    hover_phase: f32,
}

impl Drone {
    /// Path refresh is due on the first step; `hover_phase` desynchronizes several drones.
    pub fn new(cfg: &DroneTunables, hover_phase: f32) -> Self {
        Self {
            since_path_update: cfg.update_path_interval,
            hover_phase,
        }
    }

    pub fn step(&mut self, dt: f32, distance_to_player: f32, cfg: &DroneTunables) -> DroneDecision {
        if distance_to_player > cfg.max_follow_distance {
            return DroneDecision::Teleport;
        }

        self.since_path_update += dt;
        if self.since_path_update < cfg.update_path_interval {
            return DroneDecision::Hold;
        }
        self.since_path_update = 0.0;

        if distance_to_player > cfg.follow_distance {
            DroneDecision::Follow
        } else {
            DroneDecision::Stop
        }
    }

    /// Advance the bob oscillator. Returns the current offset in `[-amplitude, amplitude]`.
    pub fn hover(&mut self, dt: f32, cfg: &DroneTunables) -> f32 {
        self.hover_phase += dt * cfg.hover_speed;
        self.hover_phase.sin() * cfg.hover_amplitude
    }
}

/// Rotation about Z that points +X along `dir`.
#[inline]
fn facing(dir: Vec2) -> Quat {
    Quat::from_rotation_z(dir.y.atan2(dir.x))
}

/// Smoothly turn `current` towards `dir`. A near-zero `dir` keeps the current rotation.
pub fn turn_towards(current: Quat, dir: Vec2, rotation_speed: f32, dt: f32) -> Quat {
    if dir.length_squared() < 1e-6 {
        return current;
    }
    current.slerp(facing(dir), (rotation_speed * dt).clamp(0.0, 1.0))
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_drone)
        .add_systems(Update, follow_player.run_if(in_state(GameState::InGame)));
}

fn spawn_drone(
    mut commands: Commands,
    tunables: Res<Tunables>,
    profile: Res<EffectProfile>,
    mut rng: ResMut<GameRng>,
) {
    let cfg = tunables.drone;
    let phase = rng.rng.gen_range(0.0f32..100.0);

    commands.spawn((
        Name::new("Drone"),
        Drone::new(&cfg, phase),
        NavAgent::new(cfg.move_speed, cfg.follow_distance),
        Health::new(cfg.max_health),
        DeathEffect(profile.death),
        Sprite {
            color: Color::srgb(0.6, 0.9, 0.6),
            custom_size: Some(Vec2::new(22.0, 14.0)),
            ..default()
        },
        Transform::from_xyz(-60.0, -60.0, 1.2),
        RigidBody::Kinematic,
        Collider::circle(9.0),
        CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Projectile]),
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    q_player: Query<&Transform, (With<Player>, Without<Drone>)>,
    mut q: Query<
        (&mut Transform, &mut Drone, &mut NavAgent, &LinearVelocity),
        (Without<Player>, Without<Dead>),
    >,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let dt = time.delta_secs();
    let cfg = tunables.drone;

    for (mut tf, mut drone, mut nav, vel) in &mut q {
        let pos = tf.translation.truncate();

        match drone.step(dt, pos.distance(player_pos), &cfg) {
            DroneDecision::Teleport => {
                let target = random_point_in_disc(&mut rng.rng, player_pos, cfg.follow_distance);
                tf.translation = target.extend(tf.translation.z);
                nav.clear();
                debug!("drone teleported next to the player");
                continue;
            }
            DroneDecision::Follow => nav.set_destination(player_pos),
            DroneDecision::Stop => nav.stopped = true,
            DroneDecision::Hold => {}
        }

        let bob = drone.hover(dt, &cfg);
        tf.scale = Vec3::splat(1.0 + bob);

        let look = if cfg.look_at_player {
            player_pos - pos
        } else if vel.0.length() > 0.1 {
            vel.0
        } else {
            continue;
        };
        tf.rotation = turn_towards(tf.rotation, look, cfg.rotation_speed, dt);
    }
}
