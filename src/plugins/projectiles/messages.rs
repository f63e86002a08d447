//! Buffered messages of the projectile pipeline.
//!
//! Producers (trigger routing, launchers, collision resolve) only write intent here.
//! The allocator is the single consumer that touches the pool on the spawn side.

use bevy::prelude::*;

use crate::plugins::effects::ImpactEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    Activated,
    Deactivated,
}

/// Trigger press/release for one launcher.
#[derive(Message, Clone, Copy, Debug)]
pub struct TriggerSignal {
    pub launcher: Entity,
    pub phase: TriggerPhase,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnProjectileRequest {
    /// The launcher that fired.
    pub owner: Entity,
    /// The entity holding the launcher, if any.
    pub wielder: Option<Entity>,
    pub pos: Vec2,
    pub vel: Vec2,
    pub impact_effect: Option<ImpactEffect>,
}

/// A projectile struck something that is neither its shooter nor another projectile.
#[derive(Message, Clone, Copy, Debug)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub pos: Vec2,
}
