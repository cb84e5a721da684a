//! Planning strategies layered on the one search engine.
//!
//! Each planner decides the episode's orientation and heuristic source, runs
//! [`crate::search::search`], and turns the result into an agent-to-target
//! [`Plan`]. All three share the same frontier, arena and expansion loop.

use gridpath_kernel::grid::knowledge::KnowledgeState;
use gridpath_kernel::grid::position::Position;

use crate::error::SearchError;
use crate::graph::{EpisodeGraph, TerminationReason};
use crate::heuristic::{HeuristicSource, HeuristicTable, ManhattanHeuristic};
use crate::policy::SearchPolicy;
use crate::search::{search, EpisodeRequest, SearchResult};

/// Which planner drives a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// Agent to target, Manhattan heuristic, replanned from the agent each time.
    #[default]
    Forward,
    /// Target to agent, Manhattan heuristic to the agent, path reversed.
    Backward,
    /// Agent to target over a heuristic table learned from completed episodes.
    Adaptive,
}

impl StrategyKind {
    pub const ALL: [Self; 3] = [Self::Forward, Self::Backward, Self::Adaptive];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Adaptive => "adaptive",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "fwd" => Ok(Self::Forward),
            "backward" | "bwd" => Ok(Self::Backward),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(format!(
                "unknown strategy `{other}` (expected forward, backward or adaptive)"
            )),
        }
    }
}

/// What an episode produced for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Agent-to-target positions, agent's own cell excluded. Empty when the
    /// agent already stands on the target.
    Path(Vec<Position>),
    /// No believed route exists. `closest` is the last position the engine
    /// popped, if any.
    Unreachable { closest: Option<Position> },
}

/// One planning episode as seen by the controller.
#[derive(Debug, Clone)]
pub struct Plan {
    pub kind: StrategyKind,
    /// Search root (the agent, or the target for backward planning).
    pub root: Position,
    /// Search goal.
    pub goal: Position,
    pub outcome: PlanOutcome,
    pub expansions: u64,
    pub termination: TerminationReason,
    pub graph: EpisodeGraph,
}

impl Plan {
    fn from_result(kind: StrategyKind, result: &SearchResult, path: Option<Vec<Position>>) -> Self {
        let outcome = match path {
            Some(path) => PlanOutcome::Path(path),
            None => PlanOutcome::Unreachable {
                closest: result.closest_effort(),
            },
        };
        Self {
            kind,
            root: result.request.root,
            goal: result.request.goal,
            outcome,
            expansions: result.expansions(),
            termination: result.termination,
            graph: result.graph.clone(),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&[Position]> {
        match &self.outcome {
            PlanOutcome::Path(path) => Some(path),
            PlanOutcome::Unreachable { .. } => None,
        }
    }
}

/// A replanning strategy. Implementations may carry state across episodes.
pub trait Planner {
    fn kind(&self) -> StrategyKind;

    /// Plan a route from `agent` to `target` over the believed map.
    ///
    /// # Errors
    ///
    /// Propagates pre-flight [`SearchError`]s from the engine.
    fn plan(
        &mut self,
        agent: Position,
        target: Position,
        knowledge: &KnowledgeState,
    ) -> Result<Plan, SearchError>;

    /// The learned table, for planners that keep one.
    fn heuristic_table(&self) -> Option<&HeuristicTable> {
        None
    }
}

fn run_episode(
    kind: StrategyKind,
    request: &EpisodeRequest,
    heuristic: &dyn HeuristicSource,
    knowledge: &KnowledgeState,
    policy: &SearchPolicy,
) -> Result<SearchResult, SearchError> {
    let result = search(request, heuristic, knowledge, policy)?;
    tracing::debug!(
        strategy = kind.as_str(),
        root = %request.root,
        goal = %request.goal,
        expansions = result.expansions(),
        termination = result.termination.as_str(),
        "search episode finished"
    );
    Ok(result)
}

/// Drop the leading agent cell from a root-first forward path.
fn without_first(mut path: Vec<Position>) -> Vec<Position> {
    if !path.is_empty() {
        path.remove(0);
    }
    path
}

#[derive(Debug, Clone, Default)]
pub struct ForwardPlanner {
    policy: SearchPolicy,
}

impl ForwardPlanner {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self { policy }
    }
}

impl Planner for ForwardPlanner {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Forward
    }

    fn plan(
        &mut self,
        agent: Position,
        target: Position,
        knowledge: &KnowledgeState,
    ) -> Result<Plan, SearchError> {
        let request = EpisodeRequest {
            root: agent,
            goal: target,
        };
        let heuristic = ManhattanHeuristic::new(target);
        let result = run_episode(self.kind(), &request, &heuristic, knowledge, &self.policy)?;
        let path = result.path().map(without_first);
        Ok(Plan::from_result(self.kind(), &result, path))
    }
}

/// Searches from the stationary target toward the moving agent.
#[derive(Debug, Clone, Default)]
pub struct BackwardPlanner {
    policy: SearchPolicy,
}

impl BackwardPlanner {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self { policy }
    }
}

impl Planner for BackwardPlanner {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Backward
    }

    fn plan(
        &mut self,
        agent: Position,
        target: Position,
        knowledge: &KnowledgeState,
    ) -> Result<Plan, SearchError> {
        let request = EpisodeRequest {
            root: target,
            goal: agent,
        };
        let heuristic = ManhattanHeuristic::new(agent);
        let result = run_episode(self.kind(), &request, &heuristic, knowledge, &self.policy)?;
        // Engine path runs target -> agent.
        let path = result.path().map(|mut path| {
            path.reverse();
            without_first(path)
        });
        Ok(Plan::from_result(self.kind(), &result, path))
    }
}

/// Forward planner whose heuristic improves with every successful episode.
///
/// The table is created on the first call and re-keyed whenever the target
/// or grid dimensions change.
#[derive(Debug, Clone, Default)]
pub struct AdaptivePlanner {
    policy: SearchPolicy,
    table: Option<HeuristicTable>,
}

impl AdaptivePlanner {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            policy,
            table: None,
        }
    }

    fn table_for(&mut self, target: Position, knowledge: &KnowledgeState) -> &mut HeuristicTable {
        let (rows, cols) = (knowledge.rows(), knowledge.cols());
        let table = self
            .table
            .get_or_insert_with(|| HeuristicTable::new(rows, cols, target));
        if table.rows() != rows || table.cols() != cols {
            *table = HeuristicTable::new(rows, cols, target);
        } else if table.target() != target {
            table.rekey(target);
        }
        table
    }
}

impl Planner for AdaptivePlanner {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Adaptive
    }

    fn plan(
        &mut self,
        agent: Position,
        target: Position,
        knowledge: &KnowledgeState,
    ) -> Result<Plan, SearchError> {
        let kind = self.kind();
        let policy = self.policy;
        let request = EpisodeRequest {
            root: agent,
            goal: target,
        };
        let table = self.table_for(target, knowledge);
        let result = run_episode(kind, &request, &*table, knowledge, &policy)?;
        if let Some(g_goal) = result.goal_cost() {
            let changed = table.update_from_closed(result.closed_costs(), g_goal);
            tracing::trace!(changed, g_goal, "heuristic table updated");
        }
        let path = result.path().map(without_first);
        Ok(Plan::from_result(kind, &result, path))
    }

    fn heuristic_table(&self) -> Option<&HeuristicTable> {
        self.table.as_ref()
    }
}

#[must_use]
pub fn build_planner(kind: StrategyKind, policy: SearchPolicy) -> Box<dyn Planner> {
    match kind {
        StrategyKind::Forward => Box::new(ForwardPlanner::new(policy)),
        StrategyKind::Backward => Box::new(BackwardPlanner::new(policy)),
        StrategyKind::Adaptive => Box::new(AdaptivePlanner::new(policy)),
    }
}
