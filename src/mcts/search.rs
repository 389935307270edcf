//! Core MCTS search algorithm.
//!
//! Every iteration runs the four classic phases against a disposable copy of
//! a position: UCT selection down the expanded tree, expansion of one random
//! untried move, a uniformly random rollout, and backpropagation of the
//! result along parent links up to the root.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::debug;

use crate::board::{BoardState, Move};
use crate::core::{GameResult, GameRng, GomokuError, Result};

use super::config::SearchConfig;
use super::node::NodeId;
use super::policy::{RandomRollout, SelectionPolicy, SimulationPolicy, Uct};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Main MCTS search context.
///
/// Owns the search tree, configuration and RNG. The tree is kept between
/// calls: after a move is committed, [`advance`](Self::advance) reroots it
/// so the next search starts from a warm subtree.
pub struct MctsSearch {
    /// Search configuration.
    config: SearchConfig,

    /// The search tree.
    tree: SearchTree,

    /// RNG for expansion and simulations.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Statistics of the most recent search call.
    stats: SearchStats,
}

impl MctsSearch {
    /// Create a search rooted at `state`.
    pub fn new(state: BoardState, config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            tree: SearchTree::with_capacity(state, config.max_nodes.min(1 << 16)),
            config,
            rng,
            selection: Box::new(Uct),
            simulation: Box::new(RandomRollout),
            stats: SearchStats::default(),
        }
    }

    /// Create a search rooted at the empty board.
    pub fn from_start(config: SearchConfig) -> Self {
        Self::new(BoardState::new(), config)
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run `iterations` MCTS iterations and return the best move.
    ///
    /// Statistics already in the tree are kept and added to.
    pub fn search(&mut self, iterations: u32) -> Result<Move> {
        self.search_until(iterations, &AtomicBool::new(false))
    }

    /// Like [`search`](Self::search), but stops between iterations once
    /// `cancel` is set.
    pub fn search_until(&mut self, iterations: u32, cancel: &AtomicBool) -> Result<Move> {
        if iterations == 0 {
            return Err(GomokuError::ZeroIterations);
        }
        if self.tree.root_state().is_terminal() {
            return Err(GomokuError::GameOver);
        }

        let start = Instant::now();
        self.stats.reset();

        for _ in 0..iterations {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            self.iteration();
            self.stats.iterations += 1;

            // Check node limit
            if self.tree.len() >= self.config.max_nodes {
                debug!("node limit {} reached", self.config.max_nodes);
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let best = self.best_move()?;
        debug!("search: best move {}, {} nodes, {}", best, self.tree.len(), self.stats);
        Ok(best)
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self) {
        let mut current = self.tree.root();

        // === SELECTION ===
        loop {
            let node = self.tree.get(current);
            if !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            let idx = self.selection.select(&self.tree, node, &self.config);
            current = node.children[idx].node;
        }

        // The node's stored position equals replaying the selected moves.
        let mut state = self.tree.get(current).state;

        // === EXPANSION ===
        let untried = self.tree.get(current).untried;
        if let Some(mv) = state.random_move(&untried, &mut self.rng) {
            current = self.tree.add_child(current, mv, state);
            self.stats.nodes_expanded += 1;

            let depth = self.tree.get(current).depth;
            if depth > self.stats.max_depth {
                self.stats.max_depth = depth;
            }
        }

        // === SIMULATION ===
        let mut sim_rng = self.rng.fork();
        let (result, plies) = self.simulation.simulate(&mut state, &mut sim_rng);
        self.stats.record_rollout(result, plies);

        // === BACKPROPAGATION ===
        self.backpropagate(current, result);
    }

    /// Walk from `leaf` to the root, updating every node on the way.
    fn backpropagate(&mut self, leaf: NodeId, result: GameResult) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.tree.get_mut(current);
            node.visits += 1;
            if result.is_winner(node.perspective) {
                node.wins += 1;
            }
            current = node.parent;
        }
    }

    /// Move of the root child with the most visits.
    ///
    /// Ties go to the child expanded first.
    pub fn best_move(&self) -> Result<Move> {
        let root = self.tree.root_node();
        let mut best: Option<(Move, u32)> = None;
        for child in &root.children {
            let visits = self.tree.get(child.node).visits;
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((child.mv, visits));
            }
        }
        best.map(|(mv, _)| mv).ok_or(GomokuError::NoChildren)
    }

    /// Reroot the tree past a move that was actually played, by either side.
    pub fn advance(&mut self, mv: Move) -> Result<()> {
        self.tree.advance(mv)
    }

    /// Search, then advance the tree past the chosen move.
    pub fn choose_move(&mut self, iterations: u32) -> Result<Move> {
        let mv = self.search(iterations)?;
        self.advance(mv)?;
        Ok(mv)
    }

    /// [`choose_move`](Self::choose_move) with the configured iteration count.
    pub fn choose_default_move(&mut self) -> Result<Move> {
        self.choose_move(self.config.iterations)
    }

    /// Discard the tree and root it at `state`.
    pub fn reset(&mut self, state: BoardState) {
        self.tree.reset(state);
    }

    /// Position at the root.
    #[must_use]
    pub fn root_state(&self) -> &BoardState {
        self.tree.root_state()
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Per-child statistics at the root.
    ///
    /// Returns (move, visits, wins) in expansion order.
    pub fn child_visits(&self) -> Vec<(Move, u32, u32)> {
        self.tree
            .root_node()
            .children
            .iter()
            .map(|c| {
                let node = self.tree.get(c.node);
                (c.mv, node.visits, node.wins)
            })
            .collect()
    }

    /// Visit distribution over the root's children.
    ///
    /// Returns (move, probability) pairs where probabilities sum to ~1.0.
    pub fn move_probabilities(&self) -> Vec<(Move, f64)> {
        let visits = self.child_visits();
        let total: u32 = visits.iter().map(|(_, v, _)| v).sum();

        if total == 0 {
            let uniform = 1.0 / visits.len().max(1) as f64;
            return visits.iter().map(|&(mv, _, _)| (mv, uniform)).collect();
        }

        visits
            .iter()
            .map(|&(mv, v, _)| (mv, v as f64 / total as f64))
            .collect()
    }
}
