//! Projectiles plugin: pooled projectiles with a producer → consumer spawn pipeline.
//!
//! # Data flow
//! ```text
//!   Update (virtual time)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) interaction::route_trigger                                            │
//!│      - writes: TriggerSignal { launcher, Activated | Deactivated }          │
//!│                                                                            │
//!│  (B) Producer: launcher::drive_launchers                                   │
//!│      - steps FireControl, applies TriggerSignal                            │
//!│      - writes: SpawnProjectileRequest                                      │
//!│                                                                            │
//!│  (C) Consumer: allocator::allocate_projectiles_from_pool                   │
//!│      - mutates: ProjectilePool (acquire + arm)                             │
//!│      - writes: ProjectileState, Transform, LinearVelocity, Visibility,     │
//!│                CollisionLayers                                             │
//!│                                                                            │
//!│  (D) tracker::expire_projectiles                                           │
//!│      - Active -> PendingReturn once lifetime is reached                    │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) Physics writes CollisionStart messages (avian)                        │
//!│  (F) tracker::process_projectile_collisions                                │
//!│      - owner / peer contacts ignored                                       │
//!│      - Active -> PendingReturn, writes SpawnEffect + ProjectileHit         │
//!│  (G) commit::return_to_pool_commit                                         │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (H) commit::return_to_pool_commit (timeouts from D)                       │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool is one resource inserted here, so every scene has exactly one.
//! Everything except the launcher runs only while that resource exists; the launcher
//! checks for it itself so it can disable firing and report the problem once.

pub mod allocator;
pub mod commit;
pub mod components;
pub mod launcher;
pub mod messages;
pub mod pool;
pub mod tracker;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<Tunables>()
            .map(|t| t.projectile)
            .unwrap_or_default();

        app.insert_resource(pool::ProjectilePool::new(cfg.capacity_ceiling, cfg.warm_count))
            .add_systems(Startup, pool::init_projectile_pool);

        app.add_message::<messages::TriggerSignal>()
            .add_message::<messages::SpawnProjectileRequest>()
            .add_message::<messages::ProjectileHit>();

        let has_pool = resource_exists::<pool::ProjectilePool>;

        app.add_systems(
            Update,
            (
                launcher::drive_launchers,
                allocator::allocate_projectiles_from_pool.run_if(has_pool),
                tracker::expire_projectiles.run_if(has_pool),
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                tracker::process_projectile_collisions,
                commit::return_to_pool_commit,
            )
                .chain()
                .after(CollisionEventSystems)
                .run_if(has_pool)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            commit::return_to_pool_commit
                .run_if(has_pool)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
