//! Snapshot module - plain-data view of the game state.
//!
//! Presentation layers and serializers consume snapshots instead of borrowing
//! engine internals. The board is a dense u8 grid (0 = empty, 1-7 = piece
//! index) so renderers can diff frames cheaply.

use blockdrop_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::engine::ActivePiece;
use crate::shape::Shape;

/// The falling piece as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape,
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Complete render-ready state of one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled cells only; the active piece is overlaid separately.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn new() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: 0,
            running: false,
            paused: false,
            game_over: false,
        }
    }

    /// Whether the cell at (x, y) is filled, either by a settled cell or by
    /// the overlaid active piece.
    pub fn cell_at(&self, x: i8, y: i8) -> Option<PieceKind> {
        if let Some(active) = &self.active {
            let col = x - active.x;
            let row = y - active.y;
            if (0..active.shape.size() as i8).contains(&col)
                && (0..active.shape.size() as i8).contains(&row)
                && active.shape.filled(row as u8, col as u8)
            {
                return Some(active.kind);
            }
        }
        if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
            return PieceKind::from_index(self.board[y as usize][x as usize]);
        }
        None
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::template;

    #[test]
    fn test_cell_at_overlays_active_piece() {
        let mut snap = GameSnapshot::new();
        snap.board[19][0] = PieceKind::L.index();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            shape: template(PieceKind::O),
            x: 4,
            y: 0,
        });

        assert_eq!(snap.cell_at(0, 19), Some(PieceKind::L));
        assert_eq!(snap.cell_at(4, 0), Some(PieceKind::O));
        assert_eq!(snap.cell_at(5, 1), Some(PieceKind::O));
        assert_eq!(snap.cell_at(6, 0), None);
        assert_eq!(snap.cell_at(-1, 0), None);
        assert_eq!(snap.cell_at(0, 20), None);
    }

    #[test]
    fn test_default_snapshot_is_empty() {
        let snap = GameSnapshot::default();
        assert!(snap.board.iter().flatten().all(|&c| c == 0));
        assert!(snap.active.is_none());
        assert!(!snap.running);
        assert_eq!(snap.level, 1);
    }
}
