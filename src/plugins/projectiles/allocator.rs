//! Spawn consumer: check projectiles out of the pool and launch them.
//!
//! An empty pool at the ceiling is a capacity decision, not a failure: the request is
//! dropped and the pool counts the miss.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::ProjectileState;
use super::messages::SpawnProjectileRequest;
use super::pool::{active_projectile_layers, inactive_projectile_bundle, ProjectilePool};

pub fn allocate_projectiles_from_pool(
    mut commands: Commands,
    time: Res<Time<Virtual>>,
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    let now = time.elapsed();

    for req in reader.read() {
        let Some(acquired) =
            pool.acquire(now, |slot| commands.spawn(inactive_projectile_bundle(slot)).id())
        else {
            warn!(
                "projectile pool exhausted at {} (dropped shots: {})",
                pool.capacity_ceiling(),
                pool.exhausted_count()
            );
            continue;
        };

        if acquired.fresh {
            let stats = pool.stats();
            warn!(
                "projectile pool grew past warm batch: {}/{} allocated",
                stats.allocated, stats.capacity_ceiling
            );
        }

        pool.arm(acquired.slot, Some(req.owner), req.wielder, req.impact_effect);

        let heading = req.vel.y.atan2(req.vel.x);
        commands.entity(acquired.entity).insert((
            ProjectileState::Active,
            Transform::from_translation(req.pos.extend(2.0))
                .with_rotation(Quat::from_rotation_z(heading)),
            LinearVelocity(req.vel),
            AngularVelocity(0.0),
            Visibility::Visible,
            active_projectile_layers(),
        ));
    }
}
