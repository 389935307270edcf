//! Pluggable move sources, one per side.
//!
//! The collaborator driving a game decides which agent plays which side;
//! the core never does. After every committed move, both agents should be
//! told about it through [`Agent::observe_move`].

mod human;
mod search;

pub use human::HumanAgent;
pub use search::SearchAgent;

use crate::board::{BoardState, Move};
use crate::core::Result;

/// A source of moves for one side.
pub trait Agent: Send {
    /// Produce the next move for the side to move in `state`.
    fn choose_move(&mut self, state: &BoardState) -> Result<Move>;

    /// Record a move that was committed to the game, by either side.
    fn observe_move(&mut self, _mv: Move) -> Result<()> {
        Ok(())
    }

    /// Short label for logs.
    fn name(&self) -> &str;
}
