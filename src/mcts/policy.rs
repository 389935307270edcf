//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCT)
//! - `SimulationPolicy`: How to run rollouts (uniform random)

use crate::board::BoardState;
use crate::core::{GameResult, GameRng};

use super::config::SearchConfig;
use super::node::SearchNode;
use super::tree::SearchTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child of `node` to descend into.
    ///
    /// Returns an index into `node.children`. Only called when `node` has
    /// at least one child.
    fn select(&self, tree: &SearchTree, node: &SearchNode, config: &SearchConfig) -> usize;
}

/// UCT (UCB1 applied to trees) selection policy.
///
/// Balances exploitation (high win rate) with exploration (low visits).
/// Formula: wins/n + c * sqrt(ln(N) / n), from the child's own statistics.
/// Ties keep the earliest-expanded child.
#[derive(Clone, Debug, Default)]
pub struct Uct;

impl SelectionPolicy for Uct {
    fn select(&self, tree: &SearchTree, node: &SearchNode, config: &SearchConfig) -> usize {
        let ln_parent = (node.visits.max(1) as f64).ln();

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, child) in node.children.iter().enumerate() {
            let child = tree.get(child.node);
            let score = if child.visits == 0 {
                f64::INFINITY
            } else {
                child.win_rate()
                    + config.exploration_constant * (ln_parent / child.visits as f64).sqrt()
            };
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy: Send + Sync {
    /// Play `state` out to a terminal position.
    ///
    /// The state is modified during simulation. Returns the final result and
    /// the number of moves played.
    fn simulate(&self, state: &mut BoardState, rng: &mut GameRng) -> (GameResult, u32);
}

/// Random simulation policy.
///
/// Plays uniformly random legal moves until the game ends.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl SimulationPolicy for RandomRollout {
    fn simulate(&self, state: &mut BoardState, rng: &mut GameRng) -> (GameResult, u32) {
        let mut plies = 0;
        loop {
            if let Some(result) = state.result() {
                return (result, plies);
            }
            let legal = state.legal_moves();
            // Non-terminal implies a non-empty legal set
            if state.random_move(&legal, rng).is_none() {
                return (GameResult::Draw, plies);
            }
            plies += 1;
        }
    }
}
