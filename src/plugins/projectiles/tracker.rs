//! Active projectile tracking: decide when an out-of-pool projectile must come back.
//!
//! Two triggers, checked in this order:
//! 1. first qualifying collision (not the launcher or whoever holds it, not another live
//!    projectile)
//! 2. lifetime timeout
//!
//! Both only mark `PendingReturn`; `commit::return_to_pool_commit` does the release.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::effects::SpawnEffect;

use super::components::{PooledProjectile, ProjectileSlot, ProjectileState};
use super::messages::ProjectileHit;
use super::pool::ProjectilePool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Touching the launcher that fired it or the one holding it (muzzle overlap).
    IgnoreOwner,
    /// Touching another live projectile.
    IgnorePeer,
    Impact,
}

/// Classify a contact between a live projectile and `other`.
///
/// `shooters` are the launcher and its wielder. `other_body` is the rigid body behind
/// `other` when it differs from the collider.
#[inline]
pub fn classify_contact(
    shooters: [Option<Entity>; 2],
    other: Entity,
    other_body: Option<Entity>,
    other_is_live_projectile: bool,
) -> ContactOutcome {
    let is_shooter = |e: Entity| shooters.contains(&Some(e));
    if is_shooter(other) || other_body.is_some_and(is_shooter) {
        return ContactOutcome::IgnoreOwner;
    }
    if other_is_live_projectile {
        return ContactOutcome::IgnorePeer;
    }
    ContactOutcome::Impact
}

#[inline]
pub fn lifetime_expired(spawned_at: Duration, now: Duration, lifetime: Duration) -> bool {
    now.saturating_sub(spawned_at) >= lifetime
}

#[derive(Clone, Copy, Debug)]
struct Side {
    collider: Entity,
    body: Option<Entity>,
}

#[inline]
fn sides(ev: &CollisionStart) -> [(Side, Side); 2] {
    let a = Side {
        collider: ev.collider1,
        body: ev.body1,
    };
    let b = Side {
        collider: ev.collider2,
        body: ev.body2,
    };
    [(a, b), (b, a)]
}

/// Resolve collision starts for pooled projectiles.
///
/// Both sides of each message are checked, so projectile-vs-projectile contacts are seen
/// from each projectile and ignored by both.
pub fn process_projectile_collisions(
    mut started: MessageReader<CollisionStart>,
    pool: Res<ProjectilePool>,
    mut q: Query<(&ProjectileSlot, &mut ProjectileState, &Transform), With<PooledProjectile>>,
    mut hits: MessageWriter<ProjectileHit>,
    mut effects: MessageWriter<SpawnEffect>,
) {
    for ev in started.read() {
        for (this, other) in sides(ev) {
            let Ok((slot, state, _)) = q.get(this.collider) else {
                continue;
            };
            if *state != ProjectileState::Active {
                continue;
            }
            let slot = slot.0;

            let other_live = q
                .get(other.collider)
                .is_ok_and(|(_, s, _)| s.is_out());
            let shooters = pool
                .slot(slot)
                .map_or([None, None], |s| [s.owner, s.wielder]);

            match classify_contact(shooters, other.collider, other.body, other_live) {
                ContactOutcome::IgnoreOwner | ContactOutcome::IgnorePeer => continue,
                ContactOutcome::Impact => {}
            }

            let Ok((_, mut state, tf)) = q.get_mut(this.collider) else {
                continue;
            };
            *state = ProjectileState::PendingReturn;
            let pos = tf.translation.truncate();

            if let Some(effect) = pool.slot(slot).and_then(|s| s.impact_effect) {
                effects.write(SpawnEffect { pos, effect });
            }
            hits.write(ProjectileHit {
                projectile: this.collider,
                target: other.body.unwrap_or(other.collider),
                pos,
            });
        }
    }
}

/// Mark projectiles whose lifetime ran out.
pub fn expire_projectiles(
    time: Res<Time<Virtual>>,
    tunables: Res<Tunables>,
    pool: Res<ProjectilePool>,
    mut q: Query<&mut ProjectileState, With<PooledProjectile>>,
) {
    let now = time.elapsed();
    let lifetime = tunables.projectile.lifetime();

    for slot in pool.expired(now, lifetime) {
        let Some(entity) = pool.slot(slot).map(|s| s.entity) else {
            continue;
        };
        let Ok(mut state) = q.get_mut(entity) else {
            continue;
        };
        if *state == ProjectileState::Active {
            *state = ProjectileState::PendingReturn;
        }
    }
}
