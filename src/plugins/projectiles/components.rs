use bevy::prelude::*;

use super::pool::SlotId;

/// Marker for entities owned by the projectile pool.
#[derive(Component)]
pub struct PooledProjectile;

/// Back-reference from a pooled entity to its pool slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileSlot(pub SlotId);

/// Per-entity lifecycle.
///
/// `PendingReturn` is still "out" as far as the pool is concerned; only the commit system
/// moves an entity back to `Inactive` and releases its slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

impl ProjectileState {
    /// True while the slot is checked out of the pool.
    #[inline]
    pub fn is_out(self) -> bool {
        self != Self::Inactive
    }
}
