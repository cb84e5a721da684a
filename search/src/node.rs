//! Search nodes and the frontier ordering key.

use gridpath_kernel::grid::position::Position;

use crate::policy::TieBreak;

/// Index of a node inside its episode's [`crate::arena::EpisodeArena`].
///
/// Only meaningful within the episode that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Lifecycle of a node within one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Has a live frontier entry.
    Open,
    /// Popped as the goal; never expanded.
    Reached,
    /// Expanded; member of the closed set.
    Closed,
}

/// A node in the episode's search tree.
///
/// Invariant: `g` equals the number of unit moves along the parent chain
/// back to the root. `f` is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub position: Position,
    /// Parent in the search tree (`None` for the root).
    pub parent: Option<NodeId>,
    /// Cost from the root.
    pub g: u32,
    /// Heuristic estimate to the goal.
    pub h: u32,
    /// Sequence number of this node's live frontier entry.
    pub creation_order: u64,
    pub status: NodeStatus,
}

impl SearchNode {
    /// `f = g + h`, the primary frontier key.
    #[must_use]
    pub fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }

    #[must_use]
    pub fn key(&self, tie_break: TieBreak) -> FrontierKey {
        FrontierKey {
            f: self.f(),
            tie: tie_break.secondary(self.g, self.h),
            creation_order: self.creation_order,
        }
    }
}

/// A child proposed to the frontier, before it owns an arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: Position,
    pub parent: Option<NodeId>,
    pub g: u32,
    pub h: u32,
}

impl Candidate {
    #[must_use]
    pub fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }
}

/// The frontier ordering key: `(f, tie, creation_order)`.
///
/// Lower `f` first, then the tie-break secondary, then the older entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f: u32,
    pub tie: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .cmp(&other.f)
            .then(self.tie.cmp(&other.tie))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
