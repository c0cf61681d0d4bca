//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data, usable from the engine, the headless driver
//! and any view layer built on top of it.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, rows 0-1 are the hidden spawn rows)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's 4x4 box
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame period used by the driver (~60 FPS) |
//! | `LOCK_DELAY_MS` | 500 | Time a grounded piece waits before it locks |
//!
//! Gravity is not a constant: it is looked up per level from the sparse speed
//! tables in the core crate.
//!
//! # Examples
//!
//! ```
//! use tetrad_types::{GameAction, PieceKind, Tag, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(Tag::Piece(piece).code(), 3);
//! assert_eq!(Tag::Garbage.code(), 8);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows, including the hidden rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows above the visible playfield (pieces spawn here)
pub const HIDDEN_ROWS: u8 = 2;

/// Spawn anchor for every piece kind (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Frame period of the headless driver in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Lock delay when a piece can no longer fall (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Length of the randomizer's anti-repeat history ring
pub const HISTORY_LEN: usize = 4;

/// Rejected draws before the randomizer accepts unconditionally
pub const MAX_REDRAWS: u32 = 4;

/// Single-player gravity table values are expressed in 1/256 rows per frame
pub const GRAVITY_DENOMINATOR: u32 = 256;

/// The seven piece kinds
///
/// - **I**: straight bar
/// - **O**: 2x2 square (single rotation state)
/// - **T**: T-shaped
/// - **S**: snake, offset to the right
/// - **Z**: snake, offset to the left (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in factory index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind for a factory index in `0..7`.
    ///
    /// An out-of-range index is a logic error in the caller, never player
    /// input, so it panics instead of returning an error.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            6 => PieceKind::L,
            _ => unreachable!("piece kind index {index} out of range"),
        }
    }

    /// Factory index of this kind
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Kinds that may not open a game: the square and both snakes
    pub fn is_flat_start(&self) -> bool {
        matches!(self, PieceKind::O | PieceKind::S | PieceKind::Z)
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrad_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
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

    /// Convert to lowercase string representation
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
}

/// What a filled cell was filled by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    /// Written by a locked piece
    Piece(PieceKind),
    /// Pushed in by an opponent's attack
    Garbage,
}

impl Tag {
    /// Compact code for grid snapshots: 1-7 for piece kinds, 8 for garbage.
    /// 0 is reserved for empty cells.
    pub fn code(&self) -> u8 {
        match self {
            Tag::Piece(kind) => kind.index() as u8 + 1,
            Tag::Garbage => 8,
        }
    }

    /// Character used by the ASCII dump
    pub fn glyph(&self) -> char {
        match self {
            Tag::Piece(_) => 'o',
            Tag::Garbage => 'x',
        }
    }
}

/// A cell on the grid
///
/// - `None`: empty
/// - `Some(tag)`: occupied, tagged with what filled it
///
/// Occupancy and tag are one value, so "occupied iff tagged" cannot drift.
pub type Cell = Option<Tag>;

/// Actions an external driver can apply to a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift one cell left
    MoveLeft,
    /// Shift one cell right
    MoveRight,
    /// Rotate counter-clockwise
    RotateLeft,
    /// Rotate clockwise
    RotateRight,
    /// Swap with the held piece (once per spawn)
    Hold,
    /// Drop to the landing row and arm the lock delay
    HardDrop,
    /// Start soft dropping (sped-up gravity)
    SoftDropOn,
    /// Stop soft dropping
    SoftDropOff,
    /// Toggle pause state
    Pause,
    /// Reset the board and start again
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive, a few short aliases)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrad_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rr"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" | "left" | "l" => Some(GameAction::MoveLeft),
            "moveright" | "right" | "r" => Some(GameAction::MoveRight),
            "rotateleft" | "rl" => Some(GameAction::RotateLeft),
            "rotateright" | "rr" => Some(GameAction::RotateRight),
            "hold" | "h" => Some(GameAction::Hold),
            "harddrop" | "drop" | "hd" => Some(GameAction::HardDrop),
            "softdropon" | "soft" => Some(GameAction::SoftDropOn),
            "softdropoff" | "unsoft" => Some(GameAction::SoftDropOff),
            "pause" | "p" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::Hold => "hold",
            GameAction::HardDrop => "hardDrop",
            GameAction::SoftDropOn => "softDropOn",
            GameAction::SoftDropOff => "softDropOff",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
