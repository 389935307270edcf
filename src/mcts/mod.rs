//! Monte Carlo Tree Search over [`BoardState`](crate::board::BoardState).
//!
//! ## Overview
//!
//! - **Four phases per iteration**: UCT selection, random expansion,
//!   random rollout, backpropagation along parent links
//! - **Robust child**: the reported move is the most visited root child
//! - **Tree reuse**: after a real move, the matching subtree becomes the new
//!   root instead of being thrown away
//! - **Deterministic**: a fixed seed reproduces the whole search
//!
//! ## Usage
//!
//! ```rust
//! use gomoku_mcts::mcts::{MctsSearch, SearchConfig};
//!
//! let mut search = MctsSearch::from_start(SearchConfig::default().with_seed(7));
//!
//! // Our move: search, then reroot past it
//! let ours = search.choose_move(200).unwrap();
//!
//! // Their move, observed from outside
//! let reply = search.root_state().legal_moves().iter_ones().next().unwrap();
//! search.advance(reply).unwrap();
//!
//! let next = search.choose_move(200).unwrap();
//! assert_ne!(ours, next);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{SearchConfig, DEFAULT_ITERATIONS};
pub use node::{Child, NodeId, SearchNode};
pub use policy::{RandomRollout, SelectionPolicy, SimulationPolicy, Uct};
pub use search::MctsSearch;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
