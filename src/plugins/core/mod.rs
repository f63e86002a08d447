//! Core plugin: shared resources and global settings.
//!
//! Tunables may be inserted before the plugins are added (tests, custom launches). Whatever
//! is present is validated once; an invalid set is logged and replaced by the defaults.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app
        .world_mut()
        .remove_resource::<Tunables>()
        .unwrap_or_default();
    let tunables = validated_or_default(tunables);

    app.insert_resource(GameRng::new(tunables.rng_seed));
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

fn validated_or_default(tunables: Tunables) -> Tunables {
    match tunables.validate() {
        Ok(()) => tunables,
        Err(e) => {
            error!("invalid tunables ({e}); falling back to defaults");
            Tunables::default()
        }
    }
}
