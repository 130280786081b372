//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`blockdrop_types::Command`] values; key repeat
//! is left to the terminal, matching the engine's discrete-command contract.

pub mod map;

pub use blockdrop_types as types;

pub use map::{handle_key_event, should_quit};
