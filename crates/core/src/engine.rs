//! Engine module - the game state machine.
//!
//! Owns the board, the active and next pieces, the counters, and the gravity
//! timer. External drivers feed it discrete commands plus `tick(now_ms)` with
//! a caller-supplied clock; it never schedules itself, which keeps every
//! game fully deterministic under an injected [`PieceSource`].
//!
//! State machine: `Ready -> Running <-> Paused`, `Running -> GameOver`.
//! Game over is terminal until an explicit restart. Invalid commands are
//! no-ops, never errors.

use std::fmt;

use blockdrop_types::{
    Command, PieceKind, BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
};

use crate::board::Board;
use crate::shape::{template, Shape};
use crate::snapshot::GameSnapshot;
use crate::spawner::{spawn_position, PieceSource, RandomSource};

/// The falling piece. `x`, `y` anchor the shape matrix's top-left cell on
/// the board; `y` may be negative while the piece has not fully entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

/// Pre-generated lookahead piece. Position-less until promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

/// Events emitted by the placement sequence, drained by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LinesCleared { count: u32 },
    GameOver { final_score: u32 },
}

/// Gravity tuning. The interval for a level is
/// `max(min_drop_ms, base_drop_ms - (level - 1) * drop_step_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    pub base_drop_ms: u32,
    pub drop_step_ms: u32,
    pub min_drop_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: MIN_DROP_MS,
        }
    }
}

impl Tuning {
    /// Fail-fast validation for engine construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_drop_ms == 0 {
            return Err(ConfigError::ZeroBaseInterval);
        }
        if self.drop_step_ms == 0 {
            return Err(ConfigError::ZeroDropStep);
        }
        if self.min_drop_ms == 0 || self.min_drop_ms > self.base_drop_ms {
            return Err(ConfigError::InvalidFloor {
                min: self.min_drop_ms,
                base: self.base_drop_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for a level, floored at `min_drop_ms`.
    pub fn interval_for_level(&self, level: u32) -> u32 {
        let reduction = level.saturating_sub(1).saturating_mul(self.drop_step_ms);
        self.base_drop_ms
            .saturating_sub(reduction)
            .max(self.min_drop_ms)
    }
}

/// Construction-time configuration errors.
///
/// The board invariant (fixed positive dimensions and timing) must hold for
/// the engine's entire lifetime, so malformed tuning is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroBaseInterval,
    ZeroDropStep,
    InvalidFloor { min: u32, base: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroBaseInterval => write!(f, "base drop interval must be positive"),
            ConfigError::ZeroDropStep => write!(f, "drop interval step must be positive"),
            ConfigError::InvalidFloor { min, base } => write!(
                f,
                "drop interval floor {min}ms must be positive and not exceed the base {base}ms"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The game engine.
///
/// Single-threaded and synchronous: every command runs to completion with no
/// suspension points. Embedding in a multi-threaded host requires external
/// mutual exclusion.
pub struct Engine {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<NextPiece>,
    source: Box<dyn PieceSource>,
    tuning: Tuning,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Timestamp of the last gravity drop, in the caller's clock.
    last_drop_ms: u64,
    running: bool,
    paused: bool,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Create an engine with the default tuning and a seeded random source.
    pub fn new(seed: u32) -> Self {
        Self::build(Box::new(RandomSource::new(seed)), Tuning::default())
    }

    /// Create an engine with an injected piece source and explicit tuning.
    ///
    /// Returns a [`ConfigError`] when the tuning is malformed.
    pub fn with_source(source: Box<dyn PieceSource>, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(source, tuning))
    }

    fn build(source: Box<dyn PieceSource>, tuning: Tuning) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            source,
            tuning,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: tuning.interval_for_level(1),
            last_drop_ms: 0,
            running: false,
            paused: false,
            game_over: false,
            events: Vec::new(),
        }
    }

    /// Ready -> Running: spawn the first pieces and start accepting commands.
    pub fn start(&mut self) {
        if self.running || self.game_over {
            return;
        }
        self.running = true;
        self.spawn_next();
        self.promote_next();
        if !self.game_over {
            self.spawn_next();
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&NextPiece> {
        self.next.as_ref()
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether movement commands are currently accepted.
    fn accepting_moves(&self) -> bool {
        self.running && !self.paused && !self.game_over
    }

    /// Translate the active piece by (dx, dy).
    ///
    /// A blocked downward move is a soft landing and triggers the placement
    /// sequence; any other blocked move is rejected silently. Returns whether
    /// the piece actually moved.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let fits = match self.active.as_ref() {
            Some(p) => self.board.can_place(&p.shape, p.x, p.y, dx, dy),
            None => return false,
        };

        if fits {
            if let Some(p) = self.active.as_mut() {
                p.x += dx;
                p.y += dy;
            }
            return true;
        }

        if dy > 0 {
            self.apply_placement();
        }
        false
    }

    /// Rotate the active piece 90 degrees clockwise.
    ///
    /// If the rotated matrix collides at the current position the rotation is
    /// rejected and the original shape kept. No wall kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let Some(p) = self.active.as_ref() else {
            return false;
        };
        let rotated = p.shape.rotated_cw();
        if !self.board.can_place(&rotated, p.x, p.y, 0, 0) {
            return false;
        }
        if let Some(p) = self.active.as_mut() {
            p.shape = rotated;
        }
        true
    }

    /// Drop the active piece as far as it goes, then place it.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepting_moves() || self.active.is_none() {
            return false;
        }
        loop {
            let can_drop = match self.active.as_ref() {
                Some(p) => self.board.can_place(&p.shape, p.x, p.y, 0, 1),
                None => return false,
            };
            if !can_drop {
                break;
            }
            if let Some(p) = self.active.as_mut() {
                p.y += 1;
            }
        }
        self.apply_placement();
        true
    }

    /// Time-driven gravity. `now_ms` is any caller-supplied wall clock in
    /// milliseconds; once the elapsed time since the last drop exceeds the
    /// drop interval, the piece moves down one row and the timer resets to
    /// `now_ms`. Returns whether gravity fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || self.paused {
            return false;
        }
        if now_ms.saturating_sub(self.last_drop_ms) > self.drop_interval_ms as u64 {
            self.last_drop_ms = now_ms;
            self.move_piece(0, 1);
            return true;
        }
        false
    }

    /// Flip the paused flag. No effect before start or after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Reset to a fresh running game. Valid from any state; the piece
    /// sequence continues from the source rather than reseeding.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = self.tuning.interval_for_level(1);
        self.last_drop_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.running = true;
        self.events.clear();
        self.spawn_next();
        self.promote_next();
        if !self.game_over {
            self.spawn_next();
        }
    }

    /// Apply a discrete input command.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::SoftDrop => self.move_piece(0, 1),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Placement sequence: lock the active piece, clear lines, update
    /// score/level/gravity, then promote the lookahead and refill it.
    fn apply_placement(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board
            .place(&active.shape, active.kind, active.x, active.y);

        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.lines += cleared;
            // A single piece completes at most four rows.
            self.score += LINE_SCORES[cleared.min(4) as usize] * self.level;
            self.level = self.lines / LINES_PER_LEVEL + 1;
            self.drop_interval_ms = self.tuning.interval_for_level(self.level);
            self.events.push(GameEvent::LinesCleared { count: cleared });
        }

        self.promote_next();
        if !self.game_over {
            self.spawn_next();
        }
    }

    /// Convert the lookahead into the active piece at the spawn position.
    ///
    /// A spawn that collides with existing cells ends the game; the piece is
    /// still considered spawned and stays visible in the frozen state.
    fn promote_next(&mut self) {
        let Some(next) = self.next.take() else {
            return;
        };
        let (x, y) = spawn_position(&next.shape);
        let blocked = !self.board.can_place(&next.shape, x, y, 0, 0);
        self.active = Some(ActivePiece {
            kind: next.kind,
            shape: next.shape,
            x,
            y,
        });
        if blocked {
            self.game_over = true;
            self.running = false;
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
    }

    /// Draw a fresh lookahead piece from the source.
    fn spawn_next(&mut self) {
        let kind = self.source.next_kind();
        self.next = Some(NextPiece {
            kind,
            shape: template(kind),
        });
    }

    /// Fill a reusable snapshot for presentation layers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.as_ref().map(Into::into);
        out.next = self.next.map(|n| n.kind);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    /// Allocate a fresh snapshot of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("active", &self.active)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("level", &self.level)
            .field("drop_interval_ms", &self.drop_interval_ms)
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}
