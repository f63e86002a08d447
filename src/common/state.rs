//! Session state.
//!
//! The prototype has a single playable state. Everything spawned for a session carries
//! `DespawnOnExit(GameState::InGame)`, and gameplay systems are gated on `in_state`.

use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    InGame,
}
