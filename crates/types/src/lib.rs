//! Shared data types and constants.
//!
//! Pure data with no external dependencies, usable from the core engine,
//! input mapping, terminal view, and the snapshot adapter alike.
//!
//! # Board dimensions
//!
//! Standard playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity timing
//!
//! Gravity is a single per-level formula rather than a lookup table:
//!
//! ```text
//! drop_interval = max(MIN_DROP_MS, BASE_DROP_MS - (level - 1) * DROP_STEP_MS)
//! ```
//!
//! Level 1 drops every 1000ms; each level shaves 50ms until the 50ms floor.

/// Board dimensions.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Frame cadence used by the terminal driver (milliseconds).
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (milliseconds).
pub const BASE_DROP_MS: u32 = 1000;
/// Gravity interval reduction per level above 1 (milliseconds).
pub const DROP_STEP_MS: u32 = 50;
/// Gravity interval floor (milliseconds).
pub const MIN_DROP_MS: u32 = 50;

/// Line clear scoring, indexed by lines cleared in one placement (1-4).
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// All kinds in catalog order.
pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::J,
    PieceKind::L,
];

impl PieceKind {
    /// Parse piece kind from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Stable 1-based index used in snapshot grids (0 is the empty cell).
    pub fn index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(v: u8) -> Option<Self> {
        match v {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display color as 24-bit RGB.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xff, 0xff),
            PieceKind::O => (0xff, 0xff, 0x00),
            PieceKind::T => (0x80, 0x00, 0x80),
            PieceKind::S => (0x00, 0xff, 0x00),
            PieceKind::Z => (0xff, 0x00, 0x00),
            PieceKind::J => (0x00, 0x00, 0xff),
            PieceKind::L => (0xff, 0xa5, 0x00),
        }
    }
}

/// Discrete engine commands, mapped externally from keyboard/touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    Restart,
}

impl Command {
    /// Parse command from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            "togglepause" => Some(Command::TogglePause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
            Command::TogglePause => "togglePause",
            Command::Restart => "restart",
        }
    }
}

/// Cell on the board (`None` = empty, `Some` = filled with a piece kind).
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_kind_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(PieceKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
        assert_eq!(PieceKind::from_index(0), None);
        assert_eq!(PieceKind::from_index(8), None);
    }

    #[test]
    fn test_piece_colors_distinct() {
        for a in ALL_KINDS {
            for b in ALL_KINDS {
                if a != b {
                    assert_ne!(a.rgb(), b.rgb());
                }
            }
        }
    }

    #[test]
    fn test_command_roundtrip() {
        let commands = [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::Rotate,
            Command::TogglePause,
            Command::Restart,
        ];
        for cmd in commands {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_str("hold"), None);
    }

    #[test]
    fn test_score_table() {
        assert_eq!(LINE_SCORES[0], 0);
        assert_eq!(LINE_SCORES[1], 40);
        assert_eq!(LINE_SCORES[2], 100);
        assert_eq!(LINE_SCORES[3], 300);
        assert_eq!(LINE_SCORES[4], 1200);
    }
}
