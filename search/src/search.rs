//! Search entry point and expansion loop.

use gridpath_kernel::grid::knowledge::KnowledgeState;
use gridpath_kernel::grid::position::{neighbors, Position};

use crate::arena::EpisodeArena;
use crate::error::SearchError;
use crate::frontier::{OpenList, PushOutcome};
use crate::graph::{EpisodeGraph, EpisodeMetadata, PopEvent, TerminationReason};
use crate::heuristic::HeuristicSource;
use crate::node::{Candidate, NodeId, NodeStatus};
use crate::policy::SearchPolicy;

/// Endpoints of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRequest {
    /// Where the search tree is rooted (`g = 0`).
    pub root: Position,
    /// The position whose pop ends the episode.
    pub goal: Position,
}

/// Result of one search episode.
///
/// Owns the episode's arena. Copy the path out with [`SearchResult::path`]
/// before dropping it.
#[derive(Debug)]
pub struct SearchResult {
    pub request: EpisodeRequest,
    pub termination: TerminationReason,
    /// The goal node, when reached.
    pub goal: Option<NodeId>,
    /// The last node popped: the goal on success, the closest effort otherwise.
    pub last_popped: Option<NodeId>,
    /// Closed nodes in expansion order.
    pub closed: Vec<NodeId>,
    pub arena: EpisodeArena,
    pub graph: EpisodeGraph,
}

impl SearchResult {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination == TerminationReason::GoalReached
    }

    /// Closed-set size.
    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.closed.len() as u64
    }

    /// Root-to-goal positions, both ends included. `None` if the goal was not reached.
    #[must_use]
    pub fn path(&self) -> Option<Vec<Position>> {
        self.goal.map(|id| self.arena.path_to(id))
    }

    /// Cost of the goal node, when reached.
    #[must_use]
    pub fn goal_cost(&self) -> Option<u32> {
        self.goal.map(|id| self.arena.get(id).g)
    }

    /// Position of the last popped node.
    #[must_use]
    pub fn closest_effort(&self) -> Option<Position> {
        self.last_popped.map(|id| self.arena.get(id).position)
    }

    /// `(position, g)` for every closed node, in expansion order.
    pub fn closed_costs(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.closed.iter().map(|&id| {
            let node = self.arena.get(id);
            (node.position, node.g)
        })
    }
}

fn check_bounds(
    role: &'static str,
    position: Position,
    knowledge: &KnowledgeState,
) -> Result<(), SearchError> {
    if position.row < knowledge.rows() && position.col < knowledge.cols() {
        Ok(())
    } else {
        Err(SearchError::EndpointOutOfBounds {
            role,
            position,
            rows: knowledge.rows(),
            cols: knowledge.cols(),
        })
    }
}

/// Run best-first search from `request.root` to `request.goal` over the
/// believed map.
///
/// `h` is looked up when a node is pushed and refreshed from `heuristic` when
/// it is popped, using the popped node's own position. Children are generated
/// in `policy.move_order`, skipping cells believed blocked and cells already
/// closed. A root that is known to be blocked yields an immediate
/// [`TerminationReason::FrontierExhausted`].
///
/// # Errors
///
/// Pre-flight failures only: [`SearchError::InvalidMoveOrder`] and
/// [`SearchError::EndpointOutOfBounds`]. Frontier exhaustion is a normal
/// result, not an error.
pub fn search(
    request: &EpisodeRequest,
    heuristic: &dyn HeuristicSource,
    knowledge: &KnowledgeState,
    policy: &SearchPolicy,
) -> Result<SearchResult, SearchError> {
    policy.validate()?;
    check_bounds("root", request.root, knowledge)?;
    check_bounds("goal", request.goal, knowledge)?;

    let (rows, cols) = (knowledge.rows(), knowledge.cols());
    let mut arena = EpisodeArena::new(rows, cols);
    let mut frontier = OpenList::new(policy.tie_break);
    let mut pops: Vec<PopEvent> = Vec::new();
    let mut closed: Vec<NodeId> = Vec::new();
    let mut last_popped = None;
    let mut goal = None;
    let mut children_inserted = 0u64;
    let mut children_improved = 0u64;
    let mut children_rejected = 0u64;

    if knowledge.believed_traversable(request.root) {
        frontier.push(
            &mut arena,
            Candidate {
                position: request.root,
                parent: None,
                g: 0,
                h: heuristic.estimate(request.root),
            },
        );
    }

    let termination = loop {
        let current = match frontier.pop_min(&mut arena) {
            Ok(id) => id,
            Err(SearchError::EmptyFrontier) => break TerminationReason::FrontierExhausted,
            Err(other) => return Err(other),
        };
        last_popped = Some(current);

        let node = arena.get_mut(current);
        node.h = heuristic.estimate(node.position);
        let (position, g) = (node.position, node.g);
        let mut event = PopEvent {
            order: pops.len() as u64,
            position,
            f: node.f(),
            g,
            h: node.h,
            creation_order: node.creation_order,
            children_pushed: 0,
            is_goal: position == request.goal,
        };

        if event.is_goal {
            pops.push(event);
            goal = Some(current);
            break TerminationReason::GoalReached;
        }

        node.status = NodeStatus::Closed;
        closed.push(current);

        for child in neighbors(position, rows, cols, &policy.move_order) {
            if !knowledge.believed_traversable(child) || arena.is_closed(child) {
                continue;
            }
            let candidate = Candidate {
                position: child,
                parent: Some(current),
                g: g + 1,
                h: heuristic.estimate(child),
            };
            match frontier.push(&mut arena, candidate) {
                PushOutcome::Inserted(_) => {
                    children_inserted += 1;
                    event.children_pushed += 1;
                }
                PushOutcome::Improved(_) => {
                    children_improved += 1;
                    event.children_pushed += 1;
                }
                PushOutcome::Rejected => children_rejected += 1,
            }
        }
        pops.push(event);
    };

    let graph = EpisodeGraph {
        pops,
        metadata: EpisodeMetadata {
            root: request.root,
            goal: request.goal,
            tie_break: policy.tie_break,
            termination,
            total_expansions: closed.len() as u64,
            children_inserted,
            children_improved,
            children_rejected,
            stale_entries_discarded: frontier.stale_discarded(),
            frontier_high_water: frontier.high_water(),
        },
    };

    Ok(SearchResult {
        request: *request,
        termination,
        goal,
        last_popped,
        closed,
        arena,
        graph,
    })
}
