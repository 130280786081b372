//! Frame module - JSON message types for game observation.
//!
//! Field names use camelCase on the wire; piece kinds travel as their
//! one-letter names so clients never depend on internal enum ordering.

use serde::{Deserialize, Serialize};

use crate::core::{GameEvent, GameSnapshot};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// The falling piece as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFrame {
    pub kind: String,
    pub x: i8,
    pub y: i8,
    /// Filled cells as (dx, dy) offsets from (x, y).
    pub cells: Vec<(i8, i8)>,
}

/// One event from the placement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventFrame {
    #[serde(rename_all = "camelCase")]
    LinesCleared { count: u32 },
    #[serde(rename_all = "camelCase")]
    GameOver { final_score: u32 },
}

impl From<&GameEvent> for EventFrame {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::LinesCleared { count } => EventFrame::LinesCleared { count },
            GameEvent::GameOver { final_score } => EventFrame::GameOver { final_score },
        }
    }
}

/// A complete observation of one engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Settled cells, row-major, 0 = empty, 1-7 = piece index.
    pub board: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventFrame>,
}

impl Frame {
    /// Build a frame from a snapshot plus the events drained this step.
    pub fn from_state(snap: &GameSnapshot, events: &[GameEvent]) -> Self {
        let mut board = Vec::with_capacity(BOARD_HEIGHT as usize);
        for y in 0..BOARD_HEIGHT as usize {
            let mut row = Vec::with_capacity(BOARD_WIDTH as usize);
            row.extend_from_slice(&snap.board[y]);
            board.push(row);
        }

        let active = snap.active.as_ref().map(|a| ActiveFrame {
            kind: a.kind.as_str().to_string(),
            x: a.x,
            y: a.y,
            cells: a.shape.cells().into_iter().collect(),
        });

        Self {
            board,
            active,
            next: snap.next.map(|k| k.as_str().to_string()),
            score: snap.score,
            lines: snap.lines,
            level: snap.level,
            drop_interval_ms: snap.drop_interval_ms,
            running: snap.running,
            paused: snap.paused,
            game_over: snap.game_over,
            events: events.iter().map(Into::into).collect(),
        }
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use blockdrop_core::{template, ActiveSnapshot};

    fn sample_snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::new();
        snap.board[19][0] = PieceKind::L.index();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::T,
            shape: template(PieceKind::T),
            x: 4,
            y: 0,
        });
        snap.next = Some(PieceKind::I);
        snap.score = 300;
        snap.lines = 3;
        snap.level = 1;
        snap.drop_interval_ms = 1000;
        snap.running = true;
        snap
    }

    #[test]
    fn test_frame_round_trips() {
        let snap = sample_snapshot();
        let events = [GameEvent::LinesCleared { count: 3 }];
        let frame = Frame::from_state(&snap, &events);

        let json = frame.to_json().unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_wire_field_names() {
        let snap = sample_snapshot();
        let frame = Frame::from_state(&snap, &[GameEvent::GameOver { final_score: 300 }]);
        let json = frame.to_json().unwrap();

        assert!(json.contains("\"dropIntervalMs\":1000"));
        assert!(json.contains("\"gameOver\":false"));
        assert!(json.contains("\"next\":\"i\""));
        assert!(json.contains("\"type\":\"gameOver\""));
        assert!(json.contains("\"finalScore\":300"));
    }

    #[test]
    fn test_active_cells_are_shape_offsets() {
        let snap = sample_snapshot();
        let frame = Frame::from_state(&snap, &[]);
        let active = frame.active.expect("active piece");
        assert_eq!(active.kind, "t");
        assert_eq!(active.cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_empty_events_are_omitted() {
        let frame = Frame::from_state(&GameSnapshot::new(), &[]);
        let json = frame.to_json().unwrap();
        assert!(!json.contains("\"events\""));
        assert!(!json.contains("\"active\""));
    }
}
