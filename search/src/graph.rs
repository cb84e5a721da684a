//! `EpisodeGraph`: the expansion log of one search episode.
//!
//! The normative record is the ordered list of [`PopEvent`]s. Counters in
//! [`EpisodeMetadata`] are derived from the same loop and exist so callers can
//! report or compare episodes without walking the log.

use gridpath_kernel::grid::position::Position;
use gridpath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use gridpath_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_EXPANSION_LOG};

use crate::policy::TieBreak;

/// Why the episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The goal position was popped.
    GoalReached,
    /// The frontier ran out before the goal was popped.
    FrontierExhausted,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
        }
    }
}

/// One live frontier pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    /// Zero-based pop index within the episode.
    pub order: u64,
    pub position: Position,
    /// `f` after `h` was refreshed at pop time.
    pub f: u32,
    pub g: u32,
    pub h: u32,
    /// Sequence number of the entry that was popped.
    pub creation_order: u64,
    /// Children accepted into the frontier (inserted or improved).
    pub children_pushed: u32,
    /// `true` for the goal pop, which is never expanded.
    pub is_goal: bool,
}

/// Aggregate counters for an episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMetadata {
    pub root: Position,
    pub goal: Position,
    pub tie_break: TieBreak,
    pub termination: TerminationReason,
    /// Closed-set size.
    pub total_expansions: u64,
    pub children_inserted: u64,
    pub children_improved: u64,
    pub children_rejected: u64,
    pub stale_entries_discarded: u64,
    pub frontier_high_water: u64,
}

/// The complete episode log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeGraph {
    pub pops: Vec<PopEvent>,
    pub metadata: EpisodeMetadata,
}

impl EpisodeGraph {
    /// Positions in the order they were expanded (goal pop excluded).
    #[must_use]
    pub fn expansion_order(&self) -> Vec<Position> {
        self.pops
            .iter()
            .filter(|p| !p.is_goal)
            .map(|p| p.position)
            .collect()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let m = &self.metadata;
        serde_json::json!({
            "metadata": {
                "children_improved": m.children_improved,
                "children_inserted": m.children_inserted,
                "children_rejected": m.children_rejected,
                "frontier_high_water": m.frontier_high_water,
                "goal": position_to_json(m.goal),
                "root": position_to_json(m.root),
                "stale_entries_discarded": m.stale_entries_discarded,
                "termination": m.termination.as_str(),
                "tie_break": m.tie_break.as_str(),
                "total_expansions": m.total_expansions,
            },
            "pops": self.pops.iter().map(pop_to_json).collect::<Vec<_>>(),
        })
    }

    /// Serialize the log to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical log. Identical inputs give identical digests.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_EXPANSION_LOG, &bytes))
    }
}

/// `[row, col]`, the same shape as the persisted world records.
#[must_use]
pub fn position_to_json(pos: Position) -> serde_json::Value {
    serde_json::json!([pos.row, pos.col])
}

fn pop_to_json(p: &PopEvent) -> serde_json::Value {
    serde_json::json!({
        "children_pushed": p.children_pushed,
        "creation_order": p.creation_order,
        "f": p.f,
        "g": p.g,
        "h": p.h,
        "is_goal": p.is_goal,
        "order": p.order,
        "position": position_to_json(p.position),
    })
}
