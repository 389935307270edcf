//! Move source fed from outside the engine.
//!
//! The input layer holds the `Sender` half of a channel; the agent validates
//! each received move against the position it is asked about.

use std::sync::mpsc::{Receiver, Sender};

use crate::agents::Agent;
use crate::board::{BoardState, Move};
use crate::core::{GomokuError, Result};

/// Moves supplied from outside, e.g. by an input layer on another thread.
///
/// The input side keeps the `Sender`; `choose_move` blocks until a move
/// arrives, unless the game is already over.
pub struct HumanAgent {
    moves: Receiver<Move>,
}

impl HumanAgent {
    pub fn new(moves: Receiver<Move>) -> Self {
        Self { moves }
    }

    /// Create an agent together with the sender that feeds it.
    pub fn channel() -> (Sender<Move>, Self) {
        let (tx, rx) = std::sync::mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl Agent for HumanAgent {
    fn choose_move(&mut self, state: &BoardState) -> Result<Move> {
        if state.is_terminal() {
            return Err(GomokuError::GameOver);
        }
        let mv = self.moves.recv().map_err(|_| GomokuError::SourceDisconnected)?;
        if state.occupied().contains(mv) {
            return Err(GomokuError::Occupied(mv));
        }
        if !state.legal_moves().contains(mv) {
            return Err(GomokuError::NotLegal(mv));
        }
        Ok(mv)
    }

    fn name(&self) -> &str {
        "human"
    }
}
