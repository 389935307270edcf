//! Bit-packed Gomoku board.
//!
//! Cells are linearised row-major: `index = row * 15 + column`, both in
//! `0..15`. Every external board abstraction must use this exact mapping.

pub mod bitboard;
pub mod state;

pub use bitboard::Bitboard;
pub use state::BoardState;

use serde::{Deserialize, Serialize};

use crate::core::{GomokuError, Result};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Centre cell, the forced opening move (row 7, column 7).
pub const CENTRE: Move = Move((BOARD_SIZE * (BOARD_SIZE / 2) + BOARD_SIZE / 2) as u8);

/// A single cell index in `0..225`.
///
/// Serializes as the plain index. Deserializing goes through
/// [`Move::from_index`], so an off-board index is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Move(u8);

impl Move {
    /// Create a move from a flat cell index.
    pub fn from_index(index: usize) -> Result<Self> {
        if index < CELL_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(GomokuError::OutOfBounds(index))
        }
    }

    /// Create a move from a (row, column) pair.
    ///
    /// ```
    /// use gomoku_mcts::board::{Move, CENTRE};
    ///
    /// assert_eq!(Move::from_row_col(7, 7).unwrap(), CENTRE);
    /// assert!(Move::from_row_col(0, 15).is_err());
    /// ```
    pub fn from_row_col(row: usize, col: usize) -> Result<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GomokuError::OffBoard { row, col });
        }
        Ok(Self((row * BOARD_SIZE + col) as u8))
    }

    /// Unchecked constructor for indices already known to be on the board.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self(index as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_SIZE
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_SIZE
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Move> for usize {
    fn from(mv: Move) -> usize {
        mv.index()
    }
}

impl TryFrom<usize> for Move {
    type Error = GomokuError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}
