//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod combat;
pub mod core;
pub mod drone;
pub mod effects;
pub mod enemies;
pub mod interaction;
pub mod navigation;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// `core` runs first: everything after it reads `Tunables`.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    effects::plugin(app);
    world::plugin(app);
    player::plugin(app);
    interaction::plugin(app);
    navigation::plugin(app);
    combat::plugin(app);
    enemies::plugin(app);
    drone::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

