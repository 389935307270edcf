use log::debug;

use crate::agents::Agent;
use crate::board::{BoardState, Move};
use crate::core::Result;
use crate::mcts::{MctsSearch, SearchConfig};

/// Moves chosen by MCTS, with the tree carried across turns.
pub struct SearchAgent {
    search: MctsSearch,
    iterations: u32,
}

impl SearchAgent {
    /// Agent starting from the empty board, using `config.iterations`
    /// iterations per move.
    pub fn new(config: SearchConfig) -> Self {
        let iterations = config.iterations;
        Self {
            search: MctsSearch::from_start(config),
            iterations,
        }
    }

    pub fn search(&self) -> &MctsSearch {
        &self.search
    }
}

impl Agent for SearchAgent {
    fn choose_move(&mut self, state: &BoardState) -> Result<Move> {
        if self.search.root_state() != state {
            debug!("search agent out of sync, rebuilding tree");
            self.search.reset(*state);
        }
        self.search.search(self.iterations)
    }

    fn observe_move(&mut self, mv: Move) -> Result<()> {
        self.search.advance(mv)
    }

    fn name(&self) -> &str {
        "mcts"
    }
}
