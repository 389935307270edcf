//! # gomoku-mcts
//!
//! Gomoku (five in a row on a 15x15 board) played by Monte Carlo Tree Search
//! over a bit-packed board.
//!
//! ## Design Principles
//!
//! 1. **Bitboards**: Each side's stones are one 225-bit set. Legal moves
//!    come from a dilation of the occupied cells and five-in-a-row from a
//!    shift-and reduction, both word-parallel.
//!
//! 2. **Tree Reuse**: The search keeps its tree between turns. Committing a
//!    move reroots the tree at the matching child.
//!
//! 3. **Plain Values**: No callbacks and no threads. Callers run a search
//!    wherever they like and hand the result back through their own
//!    channels.
//!
//! ## Modules
//!
//! - `core`: Players, results, RNG, errors
//! - `board`: Moves, bitboards, `BoardState`
//! - `mcts`: Search tree, policies, the search loop
//! - `agents`: Human and search move sources

pub mod core;
pub mod board;
pub mod mcts;
pub mod agents;

// Re-export commonly used types
pub use crate::core::{GameResult, GameRng, GomokuError, Player, Result};

pub use crate::board::{Bitboard, BoardState, Move, BOARD_SIZE, CELL_COUNT, CENTRE};

pub use crate::mcts::{
    MctsSearch, SearchConfig, SearchNode, SearchStats, SearchTree, NodeId, TreeStats,
    SelectionPolicy, SimulationPolicy, Uct, RandomRollout,
};

pub use crate::agents::{Agent, HumanAgent, SearchAgent};
