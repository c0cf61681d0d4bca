//! Core engine - pure, deterministic, and testable
//!
//! Everything a falling-block board needs to play a game, and nothing about
//! how it is shown or controlled. Same seed, same actions, same game.
//!
//! # Module Structure
//!
//! - [`shapes`]: rotation masks for the seven piece kinds
//! - [`piece`]: a piece's kind, anchor and rotation
//! - [`grid`]: the 10x22 tagged playfield, collision and row operations
//! - [`rng`]: seeded LCG and the anti-repeat randomizer
//! - [`lock`]: the one-shot, cancelable lock countdown
//! - [`scoring`]: score, combo, garbage attack and the gravity tables
//! - [`board`]: the per-player engine
//! - [`garbage`]: the shared garbage inbox of linked boards
//! - [`driver`]: frame pacing for gravity and lock time
//! - [`versus`]: two linked boards stepped together
//! - [`snapshot`]: serializable read-only views
//!
//! # Example
//!
//! ```
//! use tetrad_core::{FrameDriver, GameBoard};
//! use tetrad_core::types::GameAction;
//!
//! let mut board = GameBoard::new(12345);
//! board.start();
//!
//! board.apply_action(GameAction::MoveRight);
//! board.apply_action(GameAction::RotateRight);
//! board.apply_action(GameAction::HardDrop);
//!
//! // Hard drop only arms the lock; frames run the delay out
//! let mut driver = FrameDriver::new();
//! for _ in 0..40 {
//!     driver.frame(&mut board);
//! }
//! assert_eq!(board.grid().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Nothing here reads a clock. [`GameBoard::update`] is one gravity step and
//! [`GameBoard::elapse`] moves the lock countdown; [`FrameDriver`] calls both
//! once per frame at the rate the current level asks for.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod garbage;
pub mod grid;
pub mod lock;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod versus;

pub use tetrad_types as types;

pub use board::{GameBoard, LockEvent};
pub use config::BoardConfig;
pub use driver::{parse_script, FrameDriver};
pub use error::{EngineError, Result};
pub use garbage::GarbageInbox;
pub use grid::Grid;
pub use lock::LockTimer;
pub use piece::Piece;
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{attack_lines, calculate_line_clear_score, next_combo, GravityMode};
pub use snapshot::BoardSnapshot;
pub use versus::{PlayerSide, Versus, VersusSnapshot};
