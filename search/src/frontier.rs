//! Best-first open list with replace-on-improvement and lazy deletion.
//!
//! The heap holds `(key, node id)` pairs; the arena holds the node itself.
//! When a strictly better `f` is found for an open position, the arena node is
//! updated in place and a fresh heap entry is pushed under a new sequence
//! number. The old entry stays in the heap and is discarded when popped,
//! because its `creation_order` no longer matches the node's.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::arena::EpisodeArena;
use crate::error::SearchError;
use crate::node::{Candidate, FrontierKey, NodeId, NodeStatus, SearchNode};
use crate::policy::TieBreak;

/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest `(f, tie, creation_order)` first.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// What `push` did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// First time this position was seen; a node was created.
    Inserted(NodeId),
    /// The open node for this position got a strictly better `f`.
    Improved(NodeId),
    /// Not better than the open node, already expanded, or outside the grid.
    Rejected,
}

/// Min-frontier with at most one live entry per position.
pub struct OpenList {
    heap: BinaryHeap<FrontierEntry>,
    tie_break: TieBreak,
    next_sequence: u64,
    live: usize,
    high_water: u64,
    stale_discarded: u64,
}

impl OpenList {
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            next_sequence: 0,
            live: 0,
            high_water: 0,
            stale_discarded: 0,
        }
    }

    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn enqueue(&mut self, id: NodeId, node: &SearchNode) {
        self.heap.push(FrontierEntry {
            key: Reverse(node.key(self.tie_break)),
            node: id,
        });
    }

    fn take_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }

    /// Insert a candidate, or improve the open node at the same position.
    ///
    /// An existing open node is overwritten (`g`, `h`, parent, sequence) only
    /// when `candidate.f()` is strictly smaller than its current `f`.
    pub fn push(&mut self, arena: &mut EpisodeArena, candidate: Candidate) -> PushOutcome {
        match arena.lookup(candidate.position) {
            None => {
                let node = SearchNode {
                    position: candidate.position,
                    parent: candidate.parent,
                    g: candidate.g,
                    h: candidate.h,
                    creation_order: self.next_sequence,
                    status: NodeStatus::Open,
                };
                let Some(id) = arena.insert(node) else {
                    return PushOutcome::Rejected;
                };
                self.next_sequence += 1;
                self.enqueue(id, arena.get(id));
                self.live += 1;
                self.high_water = self.high_water.max(self.live as u64);
                PushOutcome::Inserted(id)
            }
            Some(id) => {
                let existing = arena.get(id);
                if existing.status != NodeStatus::Open || candidate.f() >= existing.f() {
                    return PushOutcome::Rejected;
                }
                let seq = self.take_sequence();
                let node = arena.get_mut(id);
                node.g = candidate.g;
                node.h = candidate.h;
                node.parent = candidate.parent;
                node.creation_order = seq;
                self.enqueue(id, arena.get(id));
                PushOutcome::Improved(id)
            }
        }
    }

    /// Pop the live entry with the smallest key.
    ///
    /// The returned node is marked [`NodeStatus::Reached`]; the caller decides
    /// whether it becomes [`NodeStatus::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyFrontier`] when no live entries remain.
    pub fn pop_min(&mut self, arena: &mut EpisodeArena) -> Result<NodeId, SearchError> {
        while let Some(entry) = self.heap.pop() {
            let node = arena.get_mut(entry.node);
            if node.status != NodeStatus::Open || node.creation_order != entry.key.0.creation_order
            {
                self.stale_discarded += 1;
                continue;
            }
            node.status = NodeStatus::Reached;
            self.live -= 1;
            return Ok(entry.node);
        }
        Err(SearchError::EmptyFrontier)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// High-water mark of live entries.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Superseded heap entries dropped so far.
    #[must_use]
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }
}
