//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references, which keeps
//! the tree compact and serializable. Advancing the root compacts the
//! surviving subtree into a fresh arena, so nodes above the new root are
//! freed instead of lingering behind stale indices.

use log::trace;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::node::{Child, NodeId, SearchNode};
use crate::board::{BoardState, Move};
use crate::core::Result;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// This avoids reference counting overhead and enables serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    /// All nodes in the tree.
    nodes: Vec<SearchNode>,

    /// The root node ID (always 0 after initialization or advance).
    root: NodeId,
}

impl SearchTree {
    /// Create a new tree rooted at `state`.
    pub fn new(state: BoardState) -> Self {
        Self::with_capacity(state, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(state: BoardState, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Expand `mv` under `parent`, wrapping the already-advanced `state`.
    ///
    /// Removes `mv` from the parent's untried set and records the child.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, state: BoardState) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let child = self.alloc(SearchNode::new(state, parent, Some(mv), depth));

        let node = self.get_mut(parent);
        node.untried.clear(mv);
        node.children.push(Child { mv, node: child });
        child
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Get the root node mutably.
    pub fn root_node_mut(&mut self) -> &mut SearchNode {
        self.get_mut(self.root)
    }

    /// Position at the root.
    #[must_use]
    pub fn root_state(&self) -> &BoardState {
        &self.root_node().state
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, state: BoardState) {
        self.nodes.clear();
        self.nodes.push(SearchNode::root(state));
        self.root = NodeId::new(0);
    }

    /// Move the root past a move that was actually played.
    ///
    /// If `mv` was expanded, its subtree becomes the whole tree with all of
    /// its statistics kept. Otherwise the tree restarts from a single node
    /// for the resulting position. An illegal `mv` leaves the tree untouched.
    pub fn advance(&mut self, mv: Move) -> Result<()> {
        match self.root_node().child_for(mv) {
            Some(child) => {
                self.reroot(child);
                trace!("advance {}: reused subtree of {} nodes", mv, self.len());
            }
            None => {
                let mut state = *self.root_state();
                state.play(mv)?;
                self.reset(state);
                trace!("advance {}: move was unexplored, fresh root", mv);
            }
        }
        Ok(())
    }

    /// Make `new_root` the root, dropping everything outside its subtree.
    fn reroot(&mut self, new_root: NodeId) {
        // Breadth-first order; position in `order` is the new index.
        let mut order = vec![new_root];
        let mut remap: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut i = 0;
        while i < order.len() {
            let id = order[i];
            remap.insert(id, NodeId::new(i as u32));
            order.extend(self.get(id).children.iter().map(|c| c.node));
            i += 1;
        }

        let depth_offset = self.get(new_root).depth;
        let mut old: Vec<Option<SearchNode>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());

        for id in order {
            let Some(mut node) = old[id.index()].take() else {
                continue;
            };
            node.parent = if id == new_root {
                NodeId::NONE
            } else {
                remap[&node.parent]
            };
            for child in node.children.iter_mut() {
                child.node = remap[&child.node];
            }
            node.depth -= depth_offset;
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId::new(0);
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.state.is_terminal()).count();
        let expanded_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let untried_moves: usize = self.nodes.iter().map(|n| n.untried.count() as usize).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_children,
            untried_moves,
            root_visits: self.root_node().visits,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth below the root.
    pub max_depth: u16,

    /// Number of nodes holding a finished game.
    pub terminal_count: usize,

    /// Total number of parent-child links.
    pub expanded_children: usize,

    /// Legal moves not yet expanded, summed over all nodes.
    pub untried_moves: usize,

    /// Visits recorded at the root.
    pub root_visits: u32,
}

impl TreeStats {
    /// Get the expansion ratio (expanded moves / all known moves).
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        let total = self.expanded_children + self.untried_moves;
        if total == 0 {
            0.0
        } else {
            self.expanded_children as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTRE;
    use crate::core::GomokuError;

    fn mv(row: usize, col: usize) -> Move {
        Move::from_row_col(row, col).unwrap()
    }

    /// Root -> centre -> two replies, plus a grandchild under the first.
    fn small_tree() -> SearchTree {
        let mut tree = SearchTree::new(BoardState::new());
        let root = tree.root();

        let mut s1 = BoardState::new();
        s1.apply_move(CENTRE);
        let c1 = tree.add_child(root, CENTRE, s1);

        let mut s2 = s1;
        s2.apply_move(mv(6, 6));
        let c2 = tree.add_child(c1, mv(6, 6), s2);

        let mut s3 = s1;
        s3.apply_move(mv(8, 8));
        tree.add_child(c1, mv(8, 8), s3);

        let mut s4 = s2;
        s4.apply_move(mv(5, 5));
        tree.add_child(c2, mv(5, 5), s4);

        for (id, visits) in [(0, 10), (1, 10), (2, 6), (3, 4), (4, 3)] {
            tree.get_mut(NodeId::new(id)).visits = visits;
        }
        tree
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(BoardState::new());

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(*tree.root_state(), BoardState::new());
    }

    #[test]
    fn test_add_child() {
        let mut tree = SearchTree::new(BoardState::new());
        let mut state = BoardState::new();
        state.apply_move(CENTRE);

        let child = tree.add_child(tree.root(), CENTRE, state);

        assert_eq!(child, NodeId::new(1));
        assert!(tree.root_node().untried.is_empty());
        assert_eq!(tree.root_node().child_for(CENTRE), Some(child));
        assert_eq!(tree.get(child).parent, tree.root());
        assert_eq!(tree.get(child).depth, 1);
    }

    #[test]
    fn test_tree_reset() {
        let mut tree = small_tree();
        assert_eq!(tree.len(), 5);

        let mut state = BoardState::new();
        state.apply_move(CENTRE);
        tree.reset(state);

        assert_eq!(tree.len(), 1);
        assert_eq!(*tree.root_state(), state);
    }

    #[test]
    fn test_advance_reuses_subtree() {
        let mut tree = small_tree();
        tree.advance(CENTRE).unwrap();

        assert_eq!(tree.len(), 4);
        let root = tree.root_node();
        assert!(root.parent.is_none());
        assert_eq!(root.depth, 0);
        assert_eq!(root.visits, 10);
        assert_eq!(root.children.len(), 2);

        tree.advance(mv(6, 6)).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root_node().visits, 6);
        let grandchild = tree.root_node().child_for(mv(5, 5)).unwrap();
        assert_eq!(tree.get(grandchild).parent, tree.root());
        assert_eq!(tree.get(grandchild).depth, 1);
        assert_eq!(tree.get(grandchild).visits, 3);
    }

    #[test]
    fn test_advance_unexplored_move() {
        let mut tree = small_tree();
        tree.advance(CENTRE).unwrap();

        let mut expected = *tree.root_state();
        expected.play(mv(7, 8)).unwrap();

        tree.advance(mv(7, 8)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(*tree.root_state(), expected);
        assert_eq!(tree.root_node().visits, 0);
    }

    #[test]
    fn test_advance_illegal_move_keeps_tree() {
        let mut tree = small_tree();
        let err = tree.advance(mv(0, 0)).unwrap_err();
        assert_eq!(err, GomokuError::NotLegal(mv(0, 0)));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_tree_stats() {
        let tree = small_tree();
        let stats = tree.stats();

        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.terminal_count, 0);
        assert_eq!(stats.expanded_children, 4);
        assert_eq!(stats.root_visits, 10);
        assert!(stats.expansion_ratio() > 0.0 && stats.expansion_ratio() < 1.0);
    }

    #[test]
    fn test_tree_iter() {
        let tree = small_tree();
        let nodes: Vec<_> = tree.iter().collect();

        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].0, NodeId::new(0));
        assert_eq!(nodes[4].0, NodeId::new(4));
    }

    #[test]
    fn test_tree_serialization() {
        let tree = small_tree();

        let json = serde_json::to_string(&tree).unwrap();
        let deserialized: SearchTree = serde_json::from_str(&json).unwrap();

        assert_eq!(tree.len(), deserialized.len());
        assert_eq!(tree.root_node().visits, deserialized.root_node().visits);
    }
}
