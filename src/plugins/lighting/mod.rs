//! Lighting plugin (Firefly), render-only.
//!
//! A soft light rides on the player; a short-range light sits on the blaster muzzle and
//! is lit only while its `MuzzleFlash` is.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::effects::{EffectProfile, MuzzleFlash};
use crate::plugins::player::Player;
use crate::plugins::projectiles::launcher::Launcher;

#[derive(Component)]
pub struct PlayerLight;

#[derive(Component)]
pub struct MuzzleLight;

const MUZZLE_RANGE: f32 = 140.0;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), spawn_lights)
        .add_systems(
            Update,
            (follow_player_light, drive_muzzle_light).run_if(in_state(GameState::InGame)),
        );
}

fn spawn_lights(mut commands: Commands, profile: Res<EffectProfile>) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(0.8, 0.85, 1.0),
            radius: 380.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("MuzzleLight"),
        MuzzleLight,
        PointLight2d {
            color: profile.muzzle_color,
            radius: 0.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };
    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

fn drive_muzzle_light(
    q_launcher: Query<(&Transform, &Launcher, &MuzzleFlash), Without<MuzzleLight>>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), With<MuzzleLight>>,
) {
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };
    let Some((tf, launcher, _)) = q_launcher.iter().find(|(_, _, f)| f.is_lit()) else {
        light.radius = 0.0;
        return;
    };

    let muzzle = tf.translation.truncate() + launcher.aim * launcher.muzzle_offset;
    tf_light.translation.x = muzzle.x;
    tf_light.translation.y = muzzle.y;
    light.radius = MUZZLE_RANGE;
}
