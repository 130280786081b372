//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a simple framebuffer that a terminal backend flushes with diff-based
//! redraws.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
