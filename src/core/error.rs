//! Error type shared by the board, the search engine and the agents.
//!
//! Everything here is a caller bug or a closed move source. An exhausted
//! board is not an error; it is reported as `GameResult::Draw`.

use thiserror::Error;

use crate::board::Move;

/// Errors raised by checked entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GomokuError {
    /// A flat cell index outside `0..225`.
    #[error("position {0} is outside the board")]
    OutOfBounds(usize),

    /// A (row, column) pair with either coordinate outside `0..15`.
    #[error("row {row}, column {col} is outside the board")]
    OffBoard { row: usize, col: usize },

    /// The target cell already holds a stone.
    #[error("cell {0} is already occupied")]
    Occupied(Move),

    /// The target cell is empty but not in the legal move set.
    #[error("move {0} is not a legal move in this position")]
    NotLegal(Move),

    /// The position already has a winner or no legal moves.
    #[error("the game is already over")]
    GameOver,

    /// A search was requested with an iteration count of zero.
    #[error("search needs at least one iteration")]
    ZeroIterations,

    /// A best move was requested before any child of the root was expanded.
    #[error("the search root has no expanded children")]
    NoChildren,

    /// The channel feeding externally provided moves was closed.
    #[error("move source disconnected")]
    SourceDisconnected,
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, GomokuError>;
