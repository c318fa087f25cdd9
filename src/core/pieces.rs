//! Pieces module - shape catalog, rotation, and placement checks
//!
//! Shapes are boolean occupancy matrices; rotation derives a new matrix
//! (transpose of the reversed rows, i.e. 90 degrees clockwise) instead of
//! mutating the catalog entry. Rotation against the board uses a three-point
//! kick: the rotated matrix is tried at the current anchor, one column to the
//! right, then one column to the left, and is rejected if all three collide.

use arrayvec::ArrayVec;

use crate::core::Board;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest matrix side across the catalog and its rotations.
const MAX_SIDE: usize = 4;

/// Boolean occupancy matrix of a piece, at most 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl PieceMatrix {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len() as u8;
        let width = rows[0].len() as u8;
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                cells[y][x] = value != 0;
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at (column x, row y) is occupied.
    pub fn filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize][x as usize]
    }

    /// Offsets (dx, dy) of every occupied cell, row-major.
    pub fn filled_cells(&self) -> ArrayVec<(i8, i8), { MAX_SIDE * MAX_SIDE }> {
        let mut offsets = ArrayVec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y as usize][x as usize] {
                    offsets.push((x as i8, y as i8));
                }
            }
        }
        offsets
    }

    /// A new matrix rotated 90 degrees clockwise.
    ///
    /// Width and height swap; `new[y][x] = old[height-1-x][y]`.
    pub fn rotated(&self) -> Self {
        let mut out = Self {
            width: self.height,
            height: self.width,
            cells: [[false; MAX_SIDE]; MAX_SIDE],
        };
        for y in 0..out.height {
            for x in 0..out.width {
                out.cells[y as usize][x as usize] =
                    self.cells[(self.height - 1 - x) as usize][y as usize];
            }
        }
        out
    }
}

/// Get the spawn-orientation matrix for a piece kind
pub fn shape(kind: PieceKind) -> PieceMatrix {
    match kind {
        PieceKind::I => PieceMatrix::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => PieceMatrix::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => PieceMatrix::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
        PieceKind::L => PieceMatrix::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
        PieceKind::J => PieceMatrix::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
        PieceKind::S => PieceMatrix::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::Z => PieceMatrix::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
    }
}

/// Active falling piece: kind, current matrix, and top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its spawn position: horizontally centered, top row.
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = shape(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (matrix.width() / 2) as i8;
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }
}

/// Test whether a matrix fits on the board at the given anchor.
///
/// A filled cell collides when it leaves the horizontal bounds, reaches below
/// the floor, or overlaps an occupied cell. Cells above row 0 never collide
/// with board content; a piece may hang partially above the visible field.
pub fn fits(board: &Board, matrix: &PieceMatrix, x: i8, y: i8) -> bool {
    for (dx, dy) in matrix.filled_cells() {
        let ax = x + dx;
        let ay = y + dy;
        if ax < 0 || ax >= BOARD_WIDTH as i8 {
            return false;
        }
        if ay >= BOARD_HEIGHT as i8 {
            return false;
        }
        if ay >= 0 && board.is_filled(ax, ay) {
            return false;
        }
    }
    true
}

/// Kick offsets tried when a rotation collides, in order.
pub const KICK_OFFSETS: [i8; 3] = [0, 1, -1];

/// Compute the rotated matrix and kicked anchor column for a piece, or None
/// when every kick position collides. Pure: the caller commits the result.
pub fn rotated_with_kicks(board: &Board, piece: &ActivePiece) -> Option<(PieceMatrix, i8)> {
    let rotated = piece.matrix.rotated();
    for dx in KICK_OFFSETS {
        let x = piece.x + dx;
        if fits(board, &rotated, x, piece.y) {
            return Some((rotated, x));
        }
    }
    None
}

/// Write the piece's fill-tag into every cell it occupies.
///
/// Performs no validity checking; only call immediately after a failed
/// downward `fits` test. Cells above the top edge are dropped.
pub fn merge(board: &mut Board, piece: &ActivePiece) {
    for (dx, dy) in piece.matrix.filled_cells() {
        let ay = piece.y + dy;
        if ay >= 0 {
            board.set(piece.x + dx, ay, Some(piece.kind));
        }
    }
}
