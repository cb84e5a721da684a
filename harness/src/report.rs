//! Run report: the JSON document a run produces.
//!
//! The body is serialized as canonical JSON (sorted keys, no whitespace) and
//! hashed under [`DOMAIN_RUN_REPORT`]. Identical inputs produce identical
//! bytes, so the digest can be compared across processes.

use gridpath_kernel::grid::position::Position;
use gridpath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use gridpath_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};
use gridpath_search::graph::position_to_json;
use gridpath_search::policy::TieBreak;
use gridpath_search::strategy::StrategyKind;

/// How a planning episode ended, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// A route was found and handed to execution.
    Planned,
    /// No believed route exists; the run failed.
    Unreachable,
}

impl EpisodeOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Unreachable => "unreachable",
        }
    }
}

/// One planning episode and what execution did with its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub root: Position,
    pub goal: Position,
    /// Where the agent stood when the episode was planned.
    pub agent: Position,
    pub expansions: u64,
    pub outcome: EpisodeOutcome,
    /// Route length, agent cell excluded. Zero when unreachable.
    pub planned_length: usize,
    pub cells_executed: usize,
    /// The ground-truth obstacle that halted execution, if one did.
    pub halted_at: Option<Position>,
}

/// Obstacles first seen from `agent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub agent: Position,
    pub blocked: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Index in the world collection, when the run came from one.
    pub world_index: Option<usize>,
    pub strategy: StrategyKind,
    pub tie_break: TieBreak,
    pub rows: usize,
    pub cols: usize,
    pub start: Position,
    pub target: Position,
    pub reached_target: bool,
    pub final_position: Position,
    /// Sum of expansions over every episode, including a failing one.
    pub total_expanded: u64,
    /// Cells entered, in order, start excluded.
    pub travelled_path: Vec<Position>,
    pub episodes: Vec<EpisodeSummary>,
    pub discoveries: Vec<Discovery>,
}

fn path_to_json(path: &[Position]) -> serde_json::Value {
    serde_json::Value::Array(path.iter().copied().map(position_to_json).collect())
}

fn episode_to_json(e: &EpisodeSummary) -> serde_json::Value {
    serde_json::json!({
        "agent": position_to_json(e.agent),
        "cells_executed": e.cells_executed,
        "expansions": e.expansions,
        "goal": position_to_json(e.goal),
        "halted_at": e.halted_at.map(position_to_json),
        "outcome": e.outcome.as_str(),
        "planned_length": e.planned_length,
        "root": position_to_json(e.root),
    })
}

fn discovery_to_json(d: &Discovery) -> serde_json::Value {
    serde_json::json!({
        "agent": position_to_json(d.agent),
        "blocked": path_to_json(&d.blocked),
    })
}

impl RunReport {
    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// The report body, without the digest.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cols": self.cols,
            "discoveries": self.discoveries.iter().map(discovery_to_json).collect::<Vec<_>>(),
            "episodes": self.episodes.iter().map(episode_to_json).collect::<Vec<_>>(),
            "final_position": position_to_json(self.final_position),
            "reached_target": self.reached_target,
            "rows": self.rows,
            "start": position_to_json(self.start),
            "strategy": self.strategy.as_str(),
            "target": position_to_json(self.target),
            "tie_break": self.tie_break.as_str(),
            "total_expanded": self.total_expanded,
            "travelled_path": path_to_json(&self.travelled_path),
            "world_index": self.world_index,
        })
    }

    /// Content hash of the canonical body.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &bytes))
    }

    /// Body plus a `digest` field, as canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        let digest = self.digest()?;
        let mut value = self.to_json_value();
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "digest".to_string(),
                serde_json::Value::String(digest.as_str().to_string()),
            );
        }
        canonical_json_bytes(&value)
    }
}
