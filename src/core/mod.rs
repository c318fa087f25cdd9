//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI or I/O.

pub mod achievements;
pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

// Re-export commonly used types
pub use achievements::{Achievement, AchievementTracker};
pub use board::{Board, GridError, RowClear, RowClears};
pub use game_state::GameState;
pub use pieces::{fits, merge, rotated_with_kicks, shape, ActivePiece, PieceMatrix};
pub use rng::{PieceQueue, QueueError, SimpleRng};
