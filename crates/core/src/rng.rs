//! RNG module - anti-repeat piece randomizer
//!
//! Draws are uniform over the seven kinds, with a short lookback: a candidate
//! that matches any of the last four accepted kinds is redrawn, up to four
//! times, after which the next draw is accepted whatever it is.
//!
//! The opening piece of a game is drawn separately and may not be a square or
//! a snake. Opening draws bypass the history ring, which starts out seeded
//! with the snakes so that the first few regular draws lean away from them too.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use crate::types::{PieceKind, HISTORY_LEN, MAX_REDRAWS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods
        (self.next_u32() >> 16) % max
    }

    /// Current state, usable as a seed to replay from this point
    pub fn state(&self) -> u32 {
        self.state
    }
}

const SEEDED_HISTORY: [PieceKind; HISTORY_LEN] =
    [PieceKind::S, PieceKind::S, PieceKind::Z, PieceKind::Z];

/// Piece randomizer with a four-slot anti-repeat history
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: SimpleRng,
    history: [PieceKind; HISTORY_LEN],
    /// Slot the next accepted kind overwrites
    oldest: usize,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            history: SEEDED_HISTORY,
            oldest: 0,
        }
    }

    /// Forget the history (the RNG stream continues)
    pub fn reset_history(&mut self) {
        self.history = SEEDED_HISTORY;
        self.oldest = 0;
    }

    /// One uniform draw, no filtering and no history update
    pub fn draw_unfiltered(&mut self) -> PieceKind {
        PieceKind::from_index(self.rng.next_range(7) as usize)
    }

    /// Opening draw: uniform over the kinds that are not a square or a snake
    pub fn draw_opening(&mut self) -> PieceKind {
        loop {
            let kind = self.draw_unfiltered();
            if !kind.is_flat_start() {
                return kind;
            }
        }
    }

    /// Regular draw with the anti-repeat rule; the result is recorded
    pub fn draw(&mut self) -> PieceKind {
        let mut rejected = 0;
        let kind = loop {
            let candidate = self.draw_unfiltered();
            if rejected >= MAX_REDRAWS || !self.history.contains(&candidate) {
                break candidate;
            }
            rejected += 1;
        };
        self.record(kind);
        kind
    }

    fn record(&mut self, kind: PieceKind) {
        self.history[self.oldest] = kind;
        self.oldest = (self.oldest + 1) % HISTORY_LEN;
    }

    /// The last four accepted kinds (ring order, not draw order)
    pub fn history(&self) -> &[PieceKind; HISTORY_LEN] {
        &self.history
    }

    /// Current RNG state (for restarting a game with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
