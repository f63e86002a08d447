//! Combat plugin: projectile damage and the death transition shared by enemies and drones.
//!
//! Facts live in `Health`. Rules:
//! - `apply_projectile_hits` (FixedPostUpdate, after collision resolve): each `ProjectileHit`
//!   on a living target costs `projectile.damage` HP
//! - `death_trigger`: `hp <= 0` -> disabled (no collisions, no navigation, at rest), death
//!   effect spawned, marked `PendingDespawn`
//! - `despawn_marked` (PostUpdate): structural removal, kept out of the fixed step

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::effects::{ImpactEffect, SpawnEffect};
use crate::plugins::navigation::NavAgent;
use crate::plugins::projectiles::messages::ProjectileHit;
use crate::plugins::projectiles::tracker::process_projectile_collisions;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { hp: max, max }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    /// Apply damage. Returns true when this hit depleted the pool.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_depleted() {
            return false;
        }
        self.hp -= amount;
        self.is_depleted()
    }
}

/// Effect spawned where the entity dies.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathEffect(pub ImpactEffect);

/// Terminal marker: the entity no longer takes part in gameplay.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Entity should be removed from the world at the next structural cleanup.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        (apply_projectile_hits, death_trigger)
            .chain()
            .after(process_projectile_collisions)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        PostUpdate,
        despawn_marked.run_if(in_state(GameState::InGame)),
    );
}

pub fn apply_projectile_hits(
    tunables: Res<Tunables>,
    mut hits: MessageReader<ProjectileHit>,
    mut q: Query<&mut Health, Without<Dead>>,
) {
    for hit in hits.read() {
        let Ok(mut health) = q.get_mut(hit.target) else {
            continue;
        };
        if health.take_damage(tunables.projectile.damage) {
            debug!("{:?} destroyed by {:?}", hit.target, hit.projectile);
        }
    }
}

#[inline]
fn non_interacting_layers(memberships: impl Into<LayerMask>) -> CollisionLayers {
    CollisionLayers::new(memberships, [] as [Layer; 0])
}

pub fn death_trigger(
    mut commands: Commands,
    mut effects: MessageWriter<SpawnEffect>,
    mut q: Query<
        (
            Entity,
            &Health,
            &Transform,
            &mut CollisionLayers,
            Option<&mut NavAgent>,
            Option<&mut LinearVelocity>,
            Option<&DeathEffect>,
        ),
        Without<Dead>,
    >,
) {
    for (e, health, tf, mut layers, nav, vel, death_fx) in &mut q {
        if !health.is_depleted() {
            continue;
        }

        *layers = non_interacting_layers(layers.memberships);
        if let Some(mut nav) = nav {
            nav.stopped = true;
            nav.clear();
        }
        if let Some(mut vel) = vel {
            vel.0 = Vec2::ZERO;
        }
        if let Some(DeathEffect(effect)) = death_fx {
            effects.write(SpawnEffect {
                pos: tf.translation.truncate(),
                effect: *effect,
            });
        }

        commands.entity(e).insert((Dead, PendingDespawn));
    }
}

/// Despawn entities marked for removal.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
