//! RNG module - seedable random source and the upcoming-piece queue
//!
//! Piece selection is uniform with replacement over the 7 kinds (no bag
//! shuffle). The queue keeps a fixed lookahead of upcoming pieces buffered so
//! the preview can always show the next N.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, NEXT_LOOKAHEAD};

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
        self.next_u32() % max
    }

    /// Generate a uniform f32 in [0, 1)
    pub fn next_unit_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Current internal state, usable as a seed to continue the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Maximum configurable lookahead depth.
pub const QUEUE_CAP: usize = 8;

/// Peeking past the buffered lookahead is a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    PeekOutOfRange { index: usize, len: usize },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::PeekOutOfRange { index, len } => {
                write!(f, "peek index {} beyond buffered lookahead {}", index, len)
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// Buffered queue of upcoming pieces
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: ArrayVec<PieceKind, QUEUE_CAP>,
    lookahead: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a queue with the default lookahead depth
    pub fn new(seed: u32) -> Self {
        Self::with_lookahead(seed, NEXT_LOOKAHEAD)
    }

    /// Create a queue buffering `lookahead` upcoming pieces (clamped to
    /// 1..=QUEUE_CAP), pre-filled from the seeded RNG
    pub fn with_lookahead(seed: u32, lookahead: usize) -> Self {
        let mut queue = Self {
            upcoming: ArrayVec::new(),
            lookahead: lookahead.clamp(1, QUEUE_CAP),
            rng: SimpleRng::new(seed),
        };
        queue.top_up();
        queue
    }

    fn top_up(&mut self) {
        while self.upcoming.len() < self.lookahead {
            let kind = PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize];
            self.upcoming.push(kind);
        }
    }

    /// Remove and return the front piece, refilling the buffer to the
    /// configured lookahead.
    pub fn pop(&mut self) -> PieceKind {
        let kind = self.upcoming.remove(0);
        self.top_up();
        kind
    }

    /// Look at the n-th upcoming piece without consuming it.
    pub fn peek(&self, index: usize) -> Result<PieceKind, QueueError> {
        self.upcoming
            .get(index)
            .copied()
            .ok_or(QueueError::PeekOutOfRange {
                index,
                len: self.upcoming.len(),
            })
    }

    /// All buffered upcoming pieces, front first.
    pub fn preview(&self) -> &[PieceKind] {
        &self.upcoming
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
