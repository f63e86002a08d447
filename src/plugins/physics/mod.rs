//! Physics plugin: avian2d for a top-down arena.
//!
//! No gravity. Lengths are scaled by `Tunables::pixels_per_meter`. The fixed step runs at
//! headset refresh rate so collision resolve (and with it projectile returns and damage)
//! happens once per displayed frame.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub const PHYSICS_HZ: f64 = 90.0;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm))
        .insert_resource(Gravity(Vec2::ZERO))
        .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ));
}
