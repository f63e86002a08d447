//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `vr_blaster::game::configure_headless` installs the gameplay plugins.
//! - a manual time step makes every `update` advance the clocks by the same amount, so the
//!   fixed schedule (physics, collision resolve) runs at least once per update.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const STEP: Duration = Duration::from_millis(20);

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    vr_blaster::game::configure_headless(&mut app);
    // Manual `update()` does not run plugin `finish`/`cleanup` the way `App::run` does.
    app.finish();
    app.cleanup();
    app
}

/// Find the single entity carrying component `C`.
pub fn single<C: Component>(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .single(app.world())
        .expect("exactly one entity")
}
