//! Return commit: recycle projectiles back into the pool.
//!
//! This system owns the inactive invariants. An inactive projectile is:
//! - hidden
//! - at rest
//! - colliding with nothing (filters empty)
//!
//! It runs after collision resolve in the fixed schedule and again in `PostUpdate` to pick up
//! timeouts. Releasing is idempotent, so the second pass never double-queues a slot.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, ProjectileSlot, ProjectileState};
use super::pool::{inactive_projectile_layers, ProjectilePool};

pub fn return_to_pool_commit(
    mut pool: ResMut<ProjectilePool>,
    mut q: Query<
        (
            &ProjectileSlot,
            &mut ProjectileState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    for (slot, mut state, mut vis, mut vel, mut ang, mut layers) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }

        *state = ProjectileState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        ang.0 = 0.0;
        *layers = inactive_projectile_layers();

        pool.release(slot.0);
    }
}
