//! Enemies plugin: wandering grunts that chase and attack the player once detected.
//!
//! Each enemy carries a `WanderBrain` (pure decision rules, see `brain`) and a `NavAgent`.
//! `think` runs once per frame: perceive -> decide -> write a navigation command.
//! Entering attack range writes one `EnemyAttack`; `telegraph_attacks` flashes an effect
//! on the attacker. Damage and death come from the combat plugin; dead enemies stop thinking.

pub mod brain;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::rng::GameRng;
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::combat::{Dead, DeathEffect, Health};
use crate::plugins::effects::{EffectProfile, SpawnEffect};
use crate::plugins::navigation::NavAgent;
use crate::plugins::player::Player;

use brain::{EnemyMode, NavCommand, Perception, WanderBrain};

#[derive(Component)]
pub struct Enemy;

/// An enemy entered attack range this frame. Written once per approach, not every frame
/// it stays in range.
#[derive(Message, Clone, Copy, Debug)]
pub struct EnemyAttack {
    pub enemy: Entity,
    pub target: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_message::<EnemyAttack>()
        .add_systems(OnEnter(GameState::InGame), spawn_enemies)
        .add_systems(
            Update,
            (think, telegraph_attacks)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

const SPAWN_POINTS: [Vec2; 3] = [
    Vec2::new(-400.0, 250.0),
    Vec2::new(0.0, 380.0),
    Vec2::new(400.0, 250.0),
];

fn spawn_enemies(mut commands: Commands, tunables: Res<Tunables>, profile: Res<EffectProfile>) {
    let cfg = tunables.enemy;
    let layers = CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::Enemy, Layer::Projectile],
    );

    for (i, home) in SPAWN_POINTS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Enemy{i}")),
            Enemy,
            WanderBrain::new(home, &cfg),
            NavAgent::new(cfg.move_speed, cfg.attack_range * 0.5),
            Health::new(cfg.max_health),
            DeathEffect(profile.death),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(28.0)),
                ..default()
            },
            Transform::from_translation(home.extend(1.0)),
            RigidBody::Kinematic,
            Collider::circle(14.0),
            layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn think(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    q_player: Query<(Entity, &Transform), With<Player>>,
    mut q: Query<(Entity, &Transform, &mut WanderBrain, &mut NavAgent), (With<Enemy>, Without<Dead>)>,
    mut attacks: MessageWriter<EnemyAttack>,
) {
    let Ok((player, player_tf)) = q_player.single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let dt = time.delta_secs();
    let cfg = tunables.enemy;

    for (e, tf, mut brain, mut nav) in &mut q {
        let was_attacking = brain.mode() == EnemyMode::Attacking;
        let seen = Perception {
            player_pos,
            distance_to_player: tf.translation.truncate().distance(player_pos),
            arrived: nav.has_arrived(),
        };

        match brain.step(dt, seen, &cfg, &mut rng.rng) {
            NavCommand::MoveTo(dest) => nav.set_destination(dest),
            NavCommand::Stop => nav.stopped = true,
            NavCommand::Hold => {}
        }

        if !was_attacking && brain.mode() == EnemyMode::Attacking {
            attacks.write(EnemyAttack { enemy: e, target: player });
        }
    }
}

/// Flash the attack effect on each enemy that just started an attack.
fn telegraph_attacks(
    profile: Res<EffectProfile>,
    mut attacks: MessageReader<EnemyAttack>,
    q: Query<&Transform, With<Enemy>>,
    mut effects: MessageWriter<SpawnEffect>,
) {
    for attack in attacks.read() {
        let Ok(tf) = q.get(attack.enemy) else {
            continue;
        };
        debug!("enemy {:?} attacks {:?}", attack.enemy, attack.target);
        effects.write(SpawnEffect {
            pos: tf.translation.truncate(),
            effect: profile.attack,
        });
    }
}

#[cfg(test)]
mod tests;
