//! Library entry point.
//!
//! Integration tests in `tests/` are compiled as separate crates; `lib.rs` gives them the
//! public surface to import. The binary in `main.rs` only calls `game::run`.

pub mod common;
pub mod game;
pub mod plugins;
