//! Fixed-ceiling projectile pool.
//!
//! The pool is plain data: it hands out slot ids and remembers, per slot, which entity backs
//! it and what the active projectile is carrying (owner, impact effect, spawn time).
//! Entity creation is injected through a closure so the pool never touches `Commands` itself.
//!
//! Invariants:
//! - `allocated <= capacity_ceiling`
//! - a slot is either active or queued in `available`, never both
//! - `available` holds each inactive slot at most once

use std::collections::VecDeque;
use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::effects::ImpactEffect;

use super::components::{PooledProjectile, ProjectileSlot, ProjectileState};
use super::tracker::lifetime_expired;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u32);

impl SlotId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub entity: Entity,
    pub active: bool,
    pub spawned_at: Duration,
    pub owner: Option<Entity>,
    /// Whoever held the launcher when it fired.
    pub wielder: Option<Entity>,
    pub impact_effect: Option<ImpactEffect>,
}

/// Result of a successful [`ProjectilePool::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired {
    pub slot: SlotId,
    pub entity: Entity,
    /// The slot was allocated by this call rather than reused.
    pub fresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub available: usize,
    pub active: usize,
    pub allocated: usize,
    pub capacity_ceiling: usize,
    pub exhausted: u64,
}

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    slots: Vec<Slot>,
    available: VecDeque<SlotId>,
    capacity_ceiling: usize,
    warm_count: usize,
    exhausted: u64,
}

impl ProjectilePool {
    /// `warm_count` is clamped to the ceiling.
    pub fn new(capacity_ceiling: usize, warm_count: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity_ceiling),
            available: VecDeque::with_capacity(capacity_ceiling),
            capacity_ceiling,
            warm_count: warm_count.min(capacity_ceiling),
            exhausted: 0,
        }
    }

    #[inline]
    pub fn capacity_ceiling(&self) -> usize {
        self.capacity_ceiling
    }

    #[inline]
    pub fn warm_count(&self) -> usize {
        self.warm_count
    }

    #[inline]
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.slots.len() - self.available.len()
    }

    #[inline]
    pub fn exhausted_count(&self) -> u64 {
        self.exhausted
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.available_len(),
            active: self.active_len(),
            allocated: self.allocated(),
            capacity_ceiling: self.capacity_ceiling,
            exhausted: self.exhausted,
        }
    }

    #[inline]
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    #[inline]
    pub fn is_active(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(|s| s.active)
    }

    /// Slot ids in reuse order (front is handed out next).
    pub fn available(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.available.iter().copied()
    }

    fn allocate(&mut self, spawn: impl FnOnce(SlotId) -> Entity) -> Option<SlotId> {
        if self.slots.len() >= self.capacity_ceiling {
            return None;
        }
        let id = SlotId(self.slots.len() as u32);
        let entity = spawn(id);
        self.slots.push(Slot {
            entity,
            active: false,
            spawned_at: Duration::ZERO,
            owner: None,
            wielder: None,
            impact_effect: None,
        });
        Some(id)
    }

    /// Pre-allocate up to `warm_count` inactive slots. Returns how many were created.
    pub fn warm(&mut self, mut spawn: impl FnMut(SlotId) -> Entity) -> usize {
        let mut created = 0;
        while self.slots.len() < self.warm_count {
            let Some(id) = self.allocate(&mut spawn) else {
                break;
            };
            self.available.push_back(id);
            created += 1;
        }
        created
    }

    /// Check a slot out of the pool.
    ///
    /// Reuses the oldest returned slot first; allocates only when nothing is queued and the
    /// ceiling allows it. At the ceiling this returns `None` and counts the miss.
    pub fn acquire(
        &mut self,
        now: Duration,
        spawn: impl FnOnce(SlotId) -> Entity,
    ) -> Option<Acquired> {
        let (id, fresh) = match self.available.pop_front() {
            Some(id) => (id, false),
            None => match self.allocate(spawn) {
                Some(id) => (id, true),
                None => {
                    self.exhausted += 1;
                    return None;
                }
            },
        };

        let slot = &mut self.slots[id.index()];
        debug_assert!(!slot.active, "available queue held an active slot");
        slot.active = true;
        slot.spawned_at = now;
        slot.owner = None;
        slot.wielder = None;
        slot.impact_effect = None;

        Some(Acquired {
            slot: id,
            entity: slot.entity,
            fresh,
        })
    }

    /// Attach launch data to an active slot. No-op (returns `false`) for inactive slots.
    pub fn arm(
        &mut self,
        id: SlotId,
        owner: Option<Entity>,
        wielder: Option<Entity>,
        impact_effect: Option<ImpactEffect>,
    ) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.active => {
                slot.owner = owner;
                slot.wielder = wielder;
                slot.impact_effect = impact_effect;
                true
            }
            _ => false,
        }
    }

    /// Return a slot to the pool.
    ///
    /// Unknown or already-inactive slots are ignored, so returning twice is harmless.
    pub fn release(&mut self, id: SlotId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if !slot.active {
            return false;
        }

        slot.active = false;
        slot.owner = None;
        slot.wielder = None;
        slot.impact_effect = None;

        debug_assert!(!self.available.contains(&id));
        self.available.push_back(id);
        true
    }

    /// Active slots whose age reached `lifetime` at `now`.
    pub fn expired(&self, now: Duration, lifetime: Duration) -> impl Iterator<Item = SlotId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.active && lifetime_expired(s.spawned_at, now, lifetime))
            .map(|(i, _)| SlotId(i as u32))
    }
}

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Projectile,
        [
            Layer::World,
            Layer::Player,
            Layer::Enemy,
            Layer::Projectile,
            Layer::Interactable,
        ],
    )
}

/// Inactive projectiles keep their physics components but collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [] as [Layer; 0])
}

/// Components for a pooled projectile in its inactive state.
pub fn inactive_projectile_bundle(slot: SlotId) -> impl Bundle {
    (
        Name::new(format!("Projectile(Pooled #{})", slot.index())),
        PooledProjectile,
        ProjectileSlot(slot),
        ProjectileState::Inactive,
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.3),
            custom_size: Some(Vec2::splat(8.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
        Visibility::Hidden,
        RigidBody::Dynamic,
        Collider::circle(4.0),
        inactive_projectile_layers(),
        LinearVelocity(Vec2::ZERO),
        AngularVelocity(0.0),
        // Inactive projectiles never report collisions: their filters are empty.
        CollisionEventsEnabled,
    )
}

/// Spawn the warm batch at startup.
pub fn init_projectile_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    let created = pool.warm(|slot| commands.spawn(inactive_projectile_bundle(slot)).id());
    info!(
        "projectile pool warmed: {created} ready, ceiling {}",
        pool.capacity_ceiling()
    );
}
