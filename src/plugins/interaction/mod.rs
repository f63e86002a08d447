//! Interaction plugin: hover/grab of the blaster, trigger routing, and highlight tint.
//!
//! Pipeline (Update):
//! - `update_hover`: interactables within reach of the player are hovered
//! - `toggle_grab`: `E` grabs the nearest hovered item or drops the held one
//! - `route_trigger`: mouse left press/release on a held launcher -> `TriggerSignal`
//! - `carry_held` / `update_aim_from_cursor`: the held blaster follows the player and aims
//! - `apply_highlight_signals`: hover/grab flags -> sprite tint
//!
//! Trigger signals only exist while an item is held. Dropping a launcher sends a final
//! `Deactivated` so its fire schedule never outlives the grab.

pub mod highlight;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::effects::{EffectProfile, MuzzleFlash};
use crate::plugins::player::Player;
use crate::plugins::projectiles::launcher::Launcher;
use crate::plugins::projectiles::messages::{TriggerPhase, TriggerSignal};

use highlight::{Highlight, HighlightKind, HighlightSignal};

/// Something the player can pick up.
#[derive(Component, Debug, Default)]
pub struct Grabbable {
    pub held_by: Option<Entity>,
}

/// Marker for the blaster item.
#[derive(Component)]
pub struct Blaster;

/// Where a held item sits relative to its holder.
const HOLD_OFFSET: Vec2 = Vec2::new(18.0, 0.0);

pub fn plugin(app: &mut App) {
    app.add_message::<HighlightSignal>()
        .add_systems(OnEnter(GameState::InGame), spawn_blaster)
        .add_systems(
            Update,
            (
                update_hover,
                toggle_grab,
                route_trigger,
                carry_held,
                update_aim_from_cursor,
                highlight::apply_highlight_signals,
            )
                .chain()
                .before(crate::plugins::projectiles::launcher::drive_launchers)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_blaster(mut commands: Commands, tunables: Res<Tunables>, profile: Res<EffectProfile>) {
    let p = tunables.projectile;
    let mut launcher = Launcher::new(p.fire_period(), p.speed, p.muzzle_offset);
    launcher.impact_effect = Some(profile.impact);

    let base = Color::srgb(0.55, 0.58, 0.62);

    commands.spawn((
        Name::new("Blaster"),
        Blaster,
        Grabbable::default(),
        launcher,
        MuzzleFlash::new(profile.muzzle_flash_secs),
        Highlight::new(base),
        Sprite {
            color: base,
            custom_size: Some(Vec2::new(20.0, 8.0)),
            ..default()
        },
        Transform::from_xyz(40.0, -40.0, 1.5),
        RigidBody::Kinematic,
        Collider::rectangle(20.0, 8.0),
        CollisionLayers::new(Layer::Interactable, [Layer::Projectile]),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Pick the closest free item within `range` of `from`.
pub fn nearest_in_reach(
    from: Vec2,
    range: f32,
    items: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Option<Entity> {
    let range_sq = range * range;
    items
        .into_iter()
        .map(|(e, pos)| (e, pos.distance_squared(from)))
        .filter(|&(_, d)| d <= range_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
}

fn update_hover(
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<Player>>,
    q_items: Query<(Entity, &Transform, &Highlight), (With<Grabbable>, Without<Player>)>,
    mut writer: MessageWriter<HighlightSignal>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let from = player_tf.translation.truncate();
    let range_sq = tunables.interact_range * tunables.interact_range;

    for (e, tf, hl) in &q_items {
        let near = tf.translation.truncate().distance_squared(from) <= range_sq;
        if near != hl.hover {
            writer.write(HighlightSignal {
                target: e,
                kind: HighlightKind::Hover,
                active: near,
            });
        }
    }
}

fn toggle_grab(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    tunables: Res<Tunables>,
    q_player: Query<(Entity, &Transform), With<Player>>,
    mut q_items: Query<
        (Entity, &Transform, &mut Grabbable, Option<&mut Launcher>, Option<&mut MuzzleFlash>),
        Without<Player>,
    >,
    mut highlights: MessageWriter<HighlightSignal>,
    mut triggers: MessageWriter<TriggerSignal>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok((player, player_tf)) = q_player.single() else {
        return;
    };

    // Holding something: drop it.
    let mut dropped = false;
    for (e, _, mut grab, launcher, flash) in &mut q_items {
        if grab.held_by != Some(player) {
            continue;
        }
        grab.held_by = None;
        dropped = true;

        if launcher.is_some_and(|l| l.fire.is_firing()) {
            triggers.write(TriggerSignal {
                launcher: e,
                phase: TriggerPhase::Deactivated,
            });
        }
        if let Some(mut flash) = flash {
            flash.stop();
        }
        highlights.write(HighlightSignal {
            target: e,
            kind: HighlightKind::Grab,
            active: false,
        });
    }
    if dropped {
        return;
    }

    let from = player_tf.translation.truncate();
    let candidates = q_items
        .iter()
        .filter(|(_, _, g, _, _)| g.held_by.is_none())
        .map(|(e, tf, _, _, _)| (e, tf.translation.truncate()));
    let Some(target) = nearest_in_reach(from, tunables.interact_range, candidates) else {
        return;
    };

    if let Ok((_, _, mut grab, _, _)) = q_items.get_mut(target) {
        grab.held_by = Some(player);
        highlights.write(HighlightSignal {
            target,
            kind: HighlightKind::Grab,
            active: true,
        });
    }
}

/// Translate trigger button edges into launcher activation signals for held launchers.
fn route_trigger(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    q_held: Query<(Entity, &Grabbable), With<Launcher>>,
    mut writer: MessageWriter<TriggerSignal>,
) {
    let Some(buttons) = buttons else {
        return;
    };

    let phase = if buttons.just_pressed(MouseButton::Left) {
        TriggerPhase::Activated
    } else if buttons.just_released(MouseButton::Left) {
        TriggerPhase::Deactivated
    } else {
        return;
    };

    for (e, grab) in &q_held {
        if grab.held_by.is_some() {
            writer.write(TriggerSignal { launcher: e, phase });
        }
    }
}

/// Keep held items at the holder's side and record the holder as the launcher's wielder.
fn carry_held(
    q_holders: Query<&Transform, Without<Grabbable>>,
    mut q_items: Query<(&Grabbable, &mut Transform, Option<&mut Launcher>)>,
) {
    for (grab, mut tf, launcher) in &mut q_items {
        if let Some(mut launcher) = launcher {
            if launcher.wielder != grab.held_by {
                launcher.wielder = grab.held_by;
            }
        }
        let Some(holder) = grab.held_by else {
            continue;
        };
        let Ok(holder_tf) = q_holders.get(holder) else {
            continue;
        };
        let z = tf.translation.z;
        tf.translation = (holder_tf.translation.truncate() + HOLD_OFFSET).extend(z);
    }
}

/// Aim held launchers at the cursor.
///
/// No window or camera (headless) leaves the aim untouched.
fn update_aim_from_cursor(
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut q_launchers: Query<(&Transform, &Grabbable, &mut Launcher)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_tf)) = q_camera.single() else {
        return;
    };
    let world_cursor = match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => p,
        Err(e) => {
            debug!("viewport_to_world_2d failed: {e:?}");
            return;
        }
    };

    for (tf, grab, mut launcher) in &mut q_launchers {
        if grab.held_by.is_none() {
            continue;
        }
        let dir = world_cursor - tf.translation.truncate();
        if dir.length_squared() > 1e-4 {
            launcher.aim = dir.normalize();
        }
    }
}
