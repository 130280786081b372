//! Adapter module - JSON observations for external clients.
//!
//! Serializes engine snapshots and drained events into line-delimited JSON
//! frames, so logging sinks, replay recorders, or spectator tooling can
//! observe a game without touching engine internals. Transport is left to
//! the host; this crate only defines the wire shape.

pub mod frame;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use frame::{ActiveFrame, EventFrame, Frame};
