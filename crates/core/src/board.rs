//! Board module - the per-player engine
//!
//! Ties together the grid, the three piece roles (controlling, queued, held),
//! the randomizer, the lock countdown, scoring and the versus garbage inbox.
//!
//! Time only moves when the caller moves it: [`GameBoard::update`] is one
//! gravity step and [`GameBoard::elapse`] advances the pending lock. Rejected
//! moves, rotations and holds are silent no-ops that return `false`.

use tracing::{debug, info};

use crate::config::BoardConfig;
use crate::error::{EngineError, Result};
use crate::garbage::GarbageInbox;
use crate::grid::Grid;
use crate::lock::LockTimer;
use crate::piece::Piece;
use crate::rng::Randomizer;
use crate::scoring::{attack_lines, calculate_line_clear_score, next_combo, GravityMode};
use crate::snapshot::BoardSnapshot;
use crate::types::{GameAction, BOARD_HEIGHT};

/// Offsets tried, in order, when a rotated pose does not fit
const ROTATION_KICKS: [(i8, i8); 3] = [(0, -1), (-1, 0), (1, 0)];

const BOTTOM_ROW: usize = BOARD_HEIGHT as usize - 1;

/// Outcome of the most recent lock (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub score_delta: u64,
    /// Combo after the lock
    pub combo: u32,
    /// Lines posted to the opponent's inbox
    pub garbage_sent: u32,
    /// Self-owed lines cancelled by this clear (pending or already on the grid)
    pub garbage_cancelled: u32,
}

/// One player's board.
///
/// A clone shares its garbage inbox with the original.
#[derive(Debug, Clone)]
pub struct GameBoard {
    config: BoardConfig,
    grid: Grid,
    controlling: Piece,
    queued: Piece,
    held: Option<Piece>,
    can_hold: bool,
    randomizer: Randomizer,
    lock: LockTimer,
    running: bool,
    paused: bool,
    sped_up: bool,
    soft_drop_frames: u32,
    score: u64,
    level: u32,
    lines: u32,
    combo: u32,
    /// Rows cleared by the current chain of clearing locks (versus only)
    chain: u32,
    /// Raw value from the active gravity table
    gravity: u32,
    mode: GravityMode,
    /// Garbage this board owes itself
    inbox: GarbageInbox,
    /// Handle to the opponent's inbox; the opponent itself is not owned
    opponent: Option<GarbageInbox>,
    last_event: Option<LockEvent>,
}

impl GameBoard {
    /// Create a board with default settings and the given randomizer seed
    pub fn new(seed: u32) -> Self {
        Self::build(BoardConfig::new().with_seed(seed))
    }

    /// Create a board from a validated config
    pub fn with_config(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: BoardConfig) -> Self {
        let mut randomizer = Randomizer::new(config.seed);
        let controlling = Piece::spawn(randomizer.draw_opening());
        let queued = Piece::spawn(randomizer.draw_unfiltered());
        Self {
            config,
            grid: Grid::new(),
            controlling,
            queued,
            held: None,
            can_hold: true,
            randomizer,
            lock: LockTimer::new(),
            running: false,
            paused: false,
            sped_up: false,
            soft_drop_frames: 0,
            score: 0,
            level: 0,
            lines: 0,
            combo: 0,
            chain: 0,
            gravity: GravityMode::Single.initial(),
            mode: GravityMode::Single,
            inbox: GarbageInbox::new(),
            opponent: None,
            last_event: None,
        }
    }

    // ---- lifecycle ----

    /// Start (or resume after a reset) the game
    pub fn start(&mut self) {
        self.running = true;
        info!(seed = self.config.seed, mode = ?self.mode, "board started");
    }

    /// Reinitialize every piece of mutable state in place.
    ///
    /// The randomizer stream and the opponent link survive; everything else is
    /// back to a fresh game that still needs [`start`](Self::start).
    pub fn reset(&mut self) {
        self.controlling = Piece::spawn(self.randomizer.draw_opening());
        self.queued = Piece::spawn(self.randomizer.draw_unfiltered());
        self.randomizer.reset_history();
        self.held = None;
        self.can_hold = true;
        self.grid.clear();
        self.lock.cancel();
        self.running = false;
        self.paused = false;
        self.sped_up = false;
        self.soft_drop_frames = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.combo = 0;
        self.chain = 0;
        self.gravity = self.mode.initial();
        self.inbox.take();
        self.last_event = None;
        info!(seed = self.config.seed, "board reset");
    }

    /// Pausing freezes gravity, the lock countdown and player input. A lock
    /// pending at pause time resumes with the same remaining delay.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "pause toggled");
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// False before `start` and after game over
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn is_active(&self) -> bool {
        self.running && !self.paused
    }

    // ---- timing ----

    /// One gravity step: fall a row if possible, otherwise arm the lock
    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.grid.fits(&self.controlling, 0, 1) {
            self.controlling.fall_one_row();
        } else {
            self.arm_lock();
        }
    }

    /// Advance the pending lock by `elapsed_ms`, resolving it when it runs out
    pub fn elapse(&mut self, elapsed_ms: u32) {
        if !self.is_active() {
            return;
        }
        if self.lock.advance(elapsed_ms) {
            self.lock_piece();
        }
    }

    fn arm_lock(&mut self) {
        if self.lock.arm(self.config.lock_delay_ms) {
            debug!(
                kind = ?self.controlling.kind,
                delay_ms = self.config.lock_delay_ms,
                "lock armed"
            );
        }
    }

    /// Rows per frame at the current level and soft-drop state
    pub fn gravity(&self) -> f64 {
        self.mode.rows_per_frame(self.gravity, self.sped_up)
    }

    /// Gravity as `(rows, frames)`, see [`GravityMode::rate`]
    pub fn gravity_rate(&self) -> (u32, u32) {
        self.mode.rate(self.gravity, self.sped_up)
    }

    pub fn gravity_mode(&self) -> GravityMode {
        self.mode
    }

    pub fn is_sped_up(&self) -> bool {
        self.sped_up
    }

    pub fn set_sped_up(&mut self, sped_up: bool) {
        self.sped_up = sped_up;
    }

    /// Count one frame of soft drop toward the next clear's score
    pub fn count_sped_up_frame(&mut self) {
        self.soft_drop_frames += 1;
    }

    pub fn soft_drop_frames(&self) -> u32 {
        self.soft_drop_frames
    }

    /// Time left on the pending lock, if one is armed
    pub fn lock_remaining_ms(&self) -> Option<u32> {
        self.lock.remaining_ms()
    }

    // ---- player actions ----

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if !self.is_active() || !self.grid.fits(&self.controlling, dx, 0) {
            return false;
        }
        self.controlling.translate(dx, 0);
        self.lock.cancel();
        true
    }

    pub fn rotate_left(&mut self) -> bool {
        self.rotate(false)
    }

    pub fn rotate_right(&mut self) -> bool {
        self.rotate(true)
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_active() {
            return false;
        }
        let before = self.controlling;
        if clockwise {
            self.controlling.rotate_right();
        } else {
            self.controlling.rotate_left();
        }

        if !self.grid.fits(&self.controlling, 0, 0) {
            let kick = ROTATION_KICKS
                .iter()
                .copied()
                .find(|&(dx, dy)| self.grid.fits(&self.controlling, dx, dy));
            match kick {
                Some((dx, dy)) => self.controlling.translate(dx, dy),
                None => {
                    self.controlling = before;
                    return false;
                }
            }
        }

        self.lock.cancel();
        true
    }

    /// Swap the controlling piece into the hold slot, once per spawn
    pub fn hold(&mut self) -> bool {
        if !self.is_active() || !self.can_hold {
            return false;
        }
        let previous = self.held.replace(self.controlling);
        self.controlling = match previous {
            Some(held) => Piece::spawn(held.kind),
            None => {
                let next = self.queued;
                self.queued = Piece::spawn(self.randomizer.draw());
                next
            }
        };
        self.can_hold = false;
        debug!(
            held = ?self.held.map(|p| p.kind),
            controlling = ?self.controlling.kind,
            "hold"
        );
        true
    }

    /// Drop to the landing row and arm the lock; the piece still waits out
    /// the lock delay and can be shifted or rotated meanwhile.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        while self.grid.fits(&self.controlling, 0, 1) {
            self.controlling.fall_one_row();
        }
        self.arm_lock();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateLeft => self.rotate_left(),
            GameAction::RotateRight => self.rotate_right(),
            GameAction::Hold => self.hold(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::SoftDropOn => {
                self.set_sped_up(true);
                true
            }
            GameAction::SoftDropOff => {
                self.set_sped_up(false);
                true
            }
            GameAction::Pause => {
                self.set_paused(!self.paused);
                true
            }
            GameAction::Restart => {
                self.reset();
                self.start();
                true
            }
        }
    }

    // ---- lock resolution ----

    /// Lock the controlling piece if it cannot fall, then spawn the next one.
    ///
    /// Called when the lock countdown runs out. A piece that was moved off its
    /// ledge in the meantime is left alone. Either way the pending lock is
    /// cleared.
    pub fn lock_piece(&mut self) {
        if !self.grid.fits(&self.controlling, 0, 1) {
            let written = self.grid.lock_piece(&self.controlling);
            debug!(
                kind = ?self.controlling.kind,
                x = self.controlling.x,
                y = self.controlling.y,
                written,
                "piece locked"
            );
            self.resolve_clears();
            self.spawn_next();
        }
        self.lock.cancel();
    }

    fn resolve_clears(&mut self) {
        let rows = self.grid.clear_full_rows() as u32;

        for _ in 0..rows {
            self.level += 1;
            self.gravity = self.mode.after_level_up(self.level, self.gravity);
        }
        self.lines += rows;

        let score_delta = calculate_line_clear_score(
            self.level,
            rows,
            self.soft_drop_frames,
            self.combo,
            self.grid.bottom_row_occupied(),
        );
        self.score += score_delta;

        let (garbage_sent, garbage_cancelled) = self.resolve_attack(rows);

        self.combo = next_combo(self.combo, rows);
        if rows > 0 {
            self.soft_drop_frames = 0;
            self.chain += rows;
        } else {
            self.chain = 0;
        }

        if rows > 0 {
            debug!(
                rows,
                score_delta,
                combo = self.combo,
                level = self.level,
                garbage_sent,
                garbage_cancelled,
                "rows cleared"
            );
        }

        self.last_event = Some(LockEvent {
            rows_cleared: rows,
            score_delta,
            combo: self.combo,
            garbage_sent,
            garbage_cancelled,
        });
    }

    /// Returns (lines posted to the opponent, self-owed lines cancelled)
    fn resolve_attack(&mut self, rows: u32) -> (u32, u32) {
        if rows >= 2 {
            let mut attack = attack_lines(rows);

            // Self-owed garbage goes first: still-pending lines, then garbage
            // rows already sitting at the bottom of the stack.
            let mut cancelled = self.inbox.cancel(attack);
            attack -= cancelled;
            while attack > 0 && self.grid.is_garbage_row(BOTTOM_ROW) {
                self.grid.clear_row(BOTTOM_ROW);
                attack -= 1;
                cancelled += 1;
            }

            match &self.opponent {
                Some(opponent) => {
                    opponent.credit(attack);
                    (attack, cancelled)
                }
                None => (0, cancelled),
            }
        } else if self.chain >= 1 {
            // A single inside a running chain sends its row; a lock that
            // clears nothing sends nothing.
            match &self.opponent {
                Some(opponent) => {
                    opponent.credit(rows);
                    (rows, 0)
                }
                None => (0, 0),
            }
        } else {
            (0, 0)
        }
    }

    fn spawn_next(&mut self) {
        self.controlling = self.queued;
        self.queued = Piece::spawn(self.randomizer.draw());
        self.can_hold = true;

        if !self.settle_controlling() {
            return;
        }

        let owed = self.inbox.take();
        if owed > 0 {
            for _ in 0..owed.min(u32::from(BOARD_HEIGHT)) {
                self.grid.push_garbage_row();
            }
            debug!(rows = owed, "garbage applied");
            self.settle_controlling();
        }
    }

    /// Make sure the controlling piece fits, nudging it up one row if that
    /// is all it takes. Ends the game otherwise.
    fn settle_controlling(&mut self) -> bool {
        if self.grid.fits(&self.controlling, 0, 0) {
            return true;
        }
        if self.grid.fits(&self.controlling, 0, -1) {
            self.controlling.translate(0, -1);
            return true;
        }
        self.running = false;
        info!(score = self.score, level = self.level, lines = self.lines, "game over");
        false
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    // ---- versus ----

    /// Post future garbage to `opponent`. The link is one-way; call it on
    /// both boards for a symmetric match.
    pub fn link_opponent(&mut self, opponent: &GameBoard) {
        self.attach(opponent.garbage_inbox());
    }

    /// Link through an inbox handle, for boards that live on other threads
    pub fn link_opponent_inbox(&mut self, inbox: GarbageInbox) -> Result<()> {
        if inbox.same_as(&self.inbox) {
            return Err(EngineError::SelfLink);
        }
        self.attach(inbox);
        Ok(())
    }

    fn attach(&mut self, inbox: GarbageInbox) {
        self.opponent = Some(inbox);
        self.mode = GravityMode::Versus;
        self.gravity = self.mode.at_level(self.level);
        info!("opponent linked");
    }

    pub fn unlink_opponent(&mut self) {
        if self.opponent.take().is_some() {
            self.mode = GravityMode::Single;
            self.gravity = self.mode.at_level(self.level);
            info!("opponent unlinked");
        }
    }

    pub fn has_opponent(&self) -> bool {
        self.opponent.is_some()
    }

    /// Handle other boards use to post garbage to this one
    pub fn garbage_inbox(&self) -> GarbageInbox {
        self.inbox.clone()
    }

    /// Owe this board `lines` more garbage rows, applied at its next spawn
    pub fn credit_garbage_lines(&self, lines: u32) {
        self.inbox.credit(lines);
    }

    pub fn pending_garbage(&self) -> u32 {
        self.inbox.pending()
    }

    // ---- queries ----

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setting up positions in tests
    #[cfg(any(test, feature = "testing"))]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the controlling piece, for setting up positions in tests
    #[cfg(any(test, feature = "testing"))]
    pub fn set_controlling(&mut self, piece: Piece) {
        self.controlling = piece;
        self.lock.cancel();
    }

    pub fn controlling(&self) -> &Piece {
        &self.controlling
    }

    pub fn queued(&self) -> &Piece {
        &self.queued
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Where the controlling piece would land
    pub fn ghost(&self) -> Piece {
        let mut ghost = self.controlling;
        while self.grid.fits(&ghost, 0, 1) {
            ghost.fall_one_row();
        }
        ghost
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.controlling = Some(self.controlling);
        out.ghost = Some(self.ghost());
        out.queued = Some(self.queued);
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.running = self.running;
        out.paused = self.paused;
        out.sped_up = self.sped_up;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.pending_garbage = self.inbox.pending();
        out.gravity = self.gravity();
        out.lock_remaining_ms = self.lock.remaining_ms();
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new(1)
    }
}
