//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a system without
//! building a full schedule. Systems that use `Commands` only enqueue structural changes,
//! so we call `world.flush()` afterwards to apply them before assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time` (generic clock) and a `Time<Virtual>` that have both advanced by `elapsed`.
///
/// Systems in `Update` see the virtual clock through `Res<Time>`; tests that pin timestamps
/// need both resources to agree.
pub fn insert_clock(world: &mut World, elapsed: Duration) {
    let mut virt = Time::<Virtual>::default();
    virt.advance_by(elapsed);
    let mut generic = Time::<()>::default();
    generic.advance_by(elapsed);
    world.insert_resource(virt);
    world.insert_resource(generic);
}

/// Advance both clocks inserted by [`insert_clock`] by `delta`.
pub fn advance_clock(world: &mut World, delta: Duration) {
    world.resource_mut::<Time<Virtual>>().advance_by(delta);
    world.resource_mut::<Time>().advance_by(delta);
}
