//! Versus module - two linked boards driven in lockstep
//!
//! Each board keeps its own lifetime; the pair only wires their garbage
//! inboxes together and steps both drivers once per frame. Boards that run on
//! separate threads can skip this type and link through
//! [`GameBoard::link_opponent_inbox`] instead.

use serde::Serialize;
use tracing::info;

use crate::board::GameBoard;
use crate::config::BoardConfig;
use crate::driver::FrameDriver;
use crate::error::Result;
use crate::snapshot::BoardSnapshot;
use crate::types::GameAction;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize)]
pub enum PlayerSide {
    Player,
    Opponent,
}

impl PlayerSide {
    pub fn other(self) -> PlayerSide {
        match self {
            PlayerSide::Player => PlayerSide::Opponent,
            PlayerSide::Opponent => PlayerSide::Player,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersusSnapshot {
    pub player: BoardSnapshot,
    pub opponent: BoardSnapshot,
}

impl VersusSnapshot {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.player, &mut self.opponent);
    }
}

#[derive(Debug)]
pub struct Versus {
    player: GameBoard,
    opponent: GameBoard,
    player_driver: FrameDriver,
    opponent_driver: FrameDriver,
}

impl Versus {
    /// Two boards with the same settings except the seed
    pub fn new(player_seed: u32, opponent_seed: u32) -> Self {
        let mut player = GameBoard::new(player_seed);
        let mut opponent = GameBoard::new(opponent_seed);
        player.link_opponent(&opponent);
        opponent.link_opponent(&player);
        Self::from_boards(player, opponent)
    }

    pub fn with_configs(player: BoardConfig, opponent: BoardConfig) -> Result<Self> {
        let mut player = GameBoard::with_config(player)?;
        let mut opponent = GameBoard::with_config(opponent)?;
        player.link_opponent(&opponent);
        opponent.link_opponent(&player);
        Ok(Self::from_boards(player, opponent))
    }

    fn from_boards(player: GameBoard, opponent: GameBoard) -> Self {
        Self {
            player,
            opponent,
            player_driver: FrameDriver::new(),
            opponent_driver: FrameDriver::new(),
        }
    }

    pub fn start(&mut self) {
        self.player.start();
        self.opponent.start();
        info!("versus match started");
    }

    /// Reset both boards in place; the link survives
    pub fn reset(&mut self) {
        self.player.reset();
        self.opponent.reset();
        self.player_driver.reset();
        self.opponent_driver.reset();
    }

    pub fn board(&self, side: PlayerSide) -> &GameBoard {
        match side {
            PlayerSide::Player => &self.player,
            PlayerSide::Opponent => &self.opponent,
        }
    }

    pub fn board_mut(&mut self, side: PlayerSide) -> &mut GameBoard {
        match side {
            PlayerSide::Player => &mut self.player,
            PlayerSide::Opponent => &mut self.opponent,
        }
    }

    pub fn apply_action(&mut self, side: PlayerSide, action: GameAction) -> bool {
        self.board_mut(side).apply_action(action)
    }

    /// One frame on both boards, player first
    pub fn frame(&mut self) -> (u32, u32) {
        let player = self.player_driver.frame(&mut self.player);
        let opponent = self.opponent_driver.frame(&mut self.opponent);
        (player, opponent)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.player.set_paused(paused);
        self.opponent.set_paused(paused);
    }

    /// The match ends when either side tops out
    pub fn is_over(&self) -> bool {
        !self.player.is_running() || !self.opponent.is_running()
    }

    /// The side still standing once the other has topped out
    pub fn winner(&self) -> Option<PlayerSide> {
        match (self.player.is_running(), self.opponent.is_running()) {
            (true, false) => Some(PlayerSide::Player),
            (false, true) => Some(PlayerSide::Opponent),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> VersusSnapshot {
        VersusSnapshot {
            player: self.player.snapshot(),
            opponent: self.opponent.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::GravityMode;

    #[test]
    fn test_boards_are_linked_both_ways() {
        let versus = Versus::new(1, 2);
        for side in [PlayerSide::Player, PlayerSide::Opponent] {
            let board = versus.board(side);
            assert!(board.has_opponent());
            assert_eq!(board.gravity_mode(), GravityMode::Versus);
        }
    }

    #[test]
    fn test_credits_reach_the_other_side() {
        let versus = Versus::new(1, 2);
        versus.board(PlayerSide::Player).credit_garbage_lines(2);
        assert_eq!(versus.board(PlayerSide::Player).pending_garbage(), 2);
        assert_eq!(versus.board(PlayerSide::Opponent).pending_garbage(), 0);
    }

    #[test]
    fn test_winner_needs_a_loser() {
        let mut versus = Versus::new(1, 2);
        assert_eq!(versus.winner(), None);
        versus.start();
        assert!(!versus.is_over());
        assert_eq!(versus.winner(), None);
        versus.board_mut(PlayerSide::Opponent).reset();
        assert!(versus.is_over());
        assert_eq!(versus.winner(), Some(PlayerSide::Player));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(PlayerSide::Player.other(), PlayerSide::Opponent);
        assert_eq!(PlayerSide::Opponent.other(), PlayerSide::Player);
    }

    #[test]
    fn test_snapshot_swap() {
        let mut versus = Versus::new(1, 2);
        versus.board(PlayerSide::Opponent).credit_garbage_lines(1);
        let mut snap = versus.snapshot();
        snap.swap();
        assert_eq!(snap.player.pending_garbage, 1);
        assert_eq!(snap.opponent.pending_garbage, 0);
    }
}
