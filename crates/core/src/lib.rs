//! Core game logic - pure, deterministic, and testable.
//!
//! This crate contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: same piece source and same commands produce the same
//!   game, tick for tick
//! - **Testable**: every rule is exercised without a terminal or a clock
//! - **Portable**: runs in any host (terminal, GUI, headless)
//! - **Fast**: zero-allocation hot paths for moves and line clears
//!
//! # Module Structure
//!
//! - [`shape`]: the seven-piece catalog and clockwise matrix rotation
//! - [`board`]: 10x20 playfield with collision detection and line clearing
//! - [`spawner`]: the [`PieceSource`] trait, seeded LCG, spawn positioning
//! - [`engine`]: the state machine tying it together (commands, gravity,
//!   scoring, events)
//! - [`snapshot`]: plain-data frames for presentation layers
//!
//! # Game Rules
//!
//! - Rotation is a plain clockwise matrix transposition; a rotation that
//!   collides is rejected outright, with no wall kicks
//! - A blocked downward move is a soft landing and locks the piece
//! - Line clears score `[0, 40, 100, 300, 1200]` times the current level;
//!   the level is `lines / 10 + 1`
//! - Gravity speeds up 50ms per level, floored at 50ms
//!
//! # Example
//!
//! ```
//! use blockdrop_core::Engine;
//! use blockdrop_types::Command;
//!
//! let mut game = Engine::new(12345);
//! game.start();
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//! game.apply_command(Command::HardDrop);
//!
//! assert!(game.running());
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. The host calls
//! [`Engine::tick`](engine::Engine::tick) with its own monotonic milliseconds;
//! once the elapsed time since the last drop exceeds the level's drop
//! interval, gravity moves the piece down one row.

pub mod board;
pub mod engine;
pub mod shape;
pub mod snapshot;
pub mod spawner;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::{ActivePiece, ConfigError, Engine, GameEvent, NextPiece, Tuning};
pub use shape::{template, Shape, MAX_SHAPE_SIZE};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::{spawn_position, PieceSource, RandomSource, SimpleRng};
