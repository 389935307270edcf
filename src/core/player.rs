//! Side identification and game outcomes.
//!
//! ## Player
//!
//! Gomoku has exactly two sides. `Player::First` (side 1) places the
//! opening stone; sides alternate after every move.
//!
//! ## GameResult
//!
//! A finished position is either won by one side or drawn by exhaustion.
//! Together that gives three distinct outcomes, never a boolean.

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Side 1, moves first.
    First,
    /// Side 2.
    Second,
}

impl Player {
    /// Both sides in turn order.
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// The opposing side.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// External side number: 1 for the first player, 2 for the second.
    ///
    /// ```
    /// use gomoku_mcts::Player;
    ///
    /// assert_eq!(Player::First.number(), 1);
    /// assert_eq!(Player::Second.number(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::First => 1,
            Player::Second => 2,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One side completed five in a row.
    Winner(Player),
    /// The board ran out of legal moves with no five in a row.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{} wins", p),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}
