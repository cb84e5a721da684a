//! Per-episode node pool.
//!
//! Nodes live in a `Vec` and refer to their parents by [`NodeId`]. A dense
//! position index maps every grid cell to its canonical node, so the frontier
//! holds ids only and there is exactly one authoritative copy of each node.
//! Dropping the arena drops the whole search tree.

use gridpath_kernel::grid::position::Position;

use crate::node::{NodeId, NodeStatus, SearchNode};

#[derive(Debug, Clone)]
pub struct EpisodeArena {
    rows: usize,
    cols: usize,
    nodes: Vec<SearchNode>,
    by_position: Vec<Option<NodeId>>,
}

impl EpisodeArena {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            nodes: Vec::new(),
            by_position: vec![None; rows * cols],
        }
    }

    fn slot(&self, pos: Position) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    /// Add a node for a position that has none yet.
    ///
    /// Returns `None` if the position is outside the grid or already owns a node.
    pub fn insert(&mut self, node: SearchNode) -> Option<NodeId> {
        let slot = self.slot(node.position)?;
        if self.by_position[slot].is_some() {
            return None;
        }
        let id = NodeId(self.nodes.len());
        self.by_position[slot] = Some(id);
        self.nodes.push(node);
        Some(id)
    }

    /// The canonical node for `pos`, if one was ever created this episode.
    #[must_use]
    pub fn lookup(&self, pos: Position) -> Option<NodeId> {
        self.slot(pos).and_then(|s| self.by_position[s])
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn is_closed(&self, pos: Position) -> bool {
        self.lookup(pos)
            .is_some_and(|id| self.get(id).status == NodeStatus::Closed)
    }

    /// Positions from the root down to `id`, both ends included.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<Position> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current);
            path.push(node.position);
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    /// Number of nodes created this episode.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}
