//! MCTS node structures.
//!
//! Nodes live in the `SearchTree` arena and refer to each other by `NodeId`.
//! A parent link is only an index used to walk upwards during
//! backpropagation; ownership of every node belongs to the arena.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Bitboard, BoardState, Move};
use crate::core::Player;

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Link from a node to one expanded child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Move leading to the child.
    pub mv: Move,
    /// Child node.
    pub node: NodeId,
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Position after `mv` was played.
    pub state: BoardState,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Move that produced this node from its parent. `None` for the root.
    pub mv: Option<Move>,

    /// Expanded children in expansion order. Moves are unique.
    /// Children are added one per visit, so most nodes hold only a few.
    pub children: SmallVec<[Child; 8]>,

    /// Legal moves of `state` that have no child yet.
    pub untried: Bitboard,

    /// Total visits to this node.
    pub visits: u32,

    /// Rollouts through this node won by `perspective`.
    pub wins: u32,

    /// The side whose move produced this node.
    pub perspective: Player,

    /// Depth below the current root (root = 0).
    pub depth: u16,
}

impl SearchNode {
    /// Create a node wrapping `state`.
    ///
    /// A terminal state gets no untried moves, so the search never expands
    /// past a finished game.
    pub fn new(state: BoardState, parent: NodeId, mv: Option<Move>, depth: u16) -> Self {
        let untried = if state.is_terminal() {
            Bitboard::new()
        } else {
            state.legal_moves()
        };
        Self {
            state,
            parent,
            mv,
            children: SmallVec::new(),
            untried,
            visits: 0,
            wins: 0,
            perspective: state.current_player().other(),
            depth,
        }
    }

    /// Create a root node.
    pub fn root(state: BoardState) -> Self {
        Self::new(state, NodeId::NONE, None, 0)
    }

    /// Fraction of visits won by `perspective`.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// Check if every legal move has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Child reached by `mv`, if expanded.
    #[must_use]
    pub fn child_for(&self, mv: Move) -> Option<NodeId> {
        self.children.iter().find(|c| c.mv == mv).map(|c| c.node)
    }
}
