//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Upcoming pieces kept buffered ahead of the active piece
pub const NEXT_LOOKAHEAD: usize = 3;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_FALL_MS: u32 = 1000;
pub const FALL_STEP_MS: u32 = 100;
pub const MIN_FALL_MS: u32 = 50;
pub const SOFT_DROP_FALL_MS: u32 = 50;
pub const ACHIEVEMENT_FLASH_MS: u32 = 1500;

/// Points per cleared line, multiplied by the level at lock time
pub const LINE_SCORE: u32 = 100;

/// Lines required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Piece kinds
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

impl PieceKind {
    /// All seven kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// Commands accepted by the game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    Reset,
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
