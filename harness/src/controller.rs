//! Replanning controller: plan on belief, walk in truth, learn, repeat.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            v                              │ halted by an obstacle
//! Observing ──> Planning ──> Executing ─────┘
//!                  │             │
//!                  v             v
//!               Failed       Succeeded
//! ```
//!
//! The controller owns the agent's [`KnowledgeState`] and its planner for the
//! whole run. Every halt happens right after the halting obstacle became
//! known, so each loop adds at least one blocked cell to knowledge and the
//! run terminates.

use gridpath_kernel::grid::knowledge::KnowledgeState;
use gridpath_kernel::grid::position::Position;
use gridpath_kernel::grid::world::GridWorld;
use gridpath_search::error::SearchError;
use gridpath_search::heuristic::HeuristicTable;
use gridpath_search::policy::SearchPolicy;
use gridpath_search::strategy::{build_planner, PlanOutcome, Planner, StrategyKind};

use crate::report::{Discovery, EpisodeOutcome, EpisodeSummary, RunReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Observing,
    Planning,
    Executing,
    Succeeded,
    Failed,
}

impl ControllerState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

pub struct ReplanningController<'w> {
    world: &'w GridWorld,
    planner: Box<dyn Planner>,
    policy: SearchPolicy,
    knowledge: KnowledgeState,
    state: ControllerState,
    agent: Position,
    /// Route handed from Planning to Executing.
    pending: Vec<Position>,
    travelled: Vec<Position>,
    total_expanded: u64,
    episodes: Vec<EpisodeSummary>,
    discoveries: Vec<Discovery>,
}

impl<'w> ReplanningController<'w> {
    /// A controller at the world's start with an all-free belief.
    ///
    /// When start and target coincide the controller is already
    /// [`ControllerState::Succeeded`] and no episode will run.
    #[must_use]
    pub fn new(world: &'w GridWorld, strategy: StrategyKind, policy: SearchPolicy) -> Self {
        let state = if world.start() == world.target() {
            ControllerState::Succeeded
        } else {
            ControllerState::Observing
        };
        Self {
            world,
            planner: build_planner(strategy, policy),
            policy,
            knowledge: KnowledgeState::for_world(world),
            state,
            agent: world.start(),
            pending: Vec::new(),
            travelled: Vec::new(),
            total_expanded: 0,
            episodes: Vec::new(),
            discoveries: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub fn agent(&self) -> Position {
        self.agent
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeState {
        &self.knowledge
    }

    #[must_use]
    pub fn total_expanded(&self) -> u64 {
        self.total_expanded
    }

    #[must_use]
    pub fn travelled(&self) -> &[Position] {
        &self.travelled
    }

    /// The adaptive planner's learned table, if the strategy keeps one.
    #[must_use]
    pub fn heuristic_table(&self) -> Option<&HeuristicTable> {
        self.planner.heuristic_table()
    }

    fn observe(&mut self) {
        let blocked = self.knowledge.observe(self.agent, self.world);
        if !blocked.is_empty() {
            self.discoveries.push(Discovery {
                agent: self.agent,
                blocked,
            });
        }
    }

    /// Advance exactly one state transition. Terminal states are sticky.
    ///
    /// # Errors
    ///
    /// Propagates pre-flight [`SearchError`]s from the planner.
    pub fn step(&mut self) -> Result<ControllerState, SearchError> {
        self.state = match self.state {
            ControllerState::Observing => {
                self.observe();
                ControllerState::Planning
            }
            ControllerState::Planning => self.plan()?,
            ControllerState::Executing => self.execute(),
            terminal => terminal,
        };
        Ok(self.state)
    }

    fn plan(&mut self) -> Result<ControllerState, SearchError> {
        let target = self.world.target();
        let plan = self.planner.plan(self.agent, target, &self.knowledge)?;
        self.total_expanded += plan.expansions;

        let (outcome, next, planned_length) = match plan.outcome {
            PlanOutcome::Path(path) => {
                let len = path.len();
                self.pending = path;
                (EpisodeOutcome::Planned, ControllerState::Executing, len)
            }
            PlanOutcome::Unreachable { closest } => {
                tracing::warn!(
                    agent = %self.agent,
                    target = %target,
                    closest = ?closest,
                    total_expanded = self.total_expanded,
                    known_blocked = self.knowledge.known_blocked_count(),
                    "target unreachable on current knowledge"
                );
                (EpisodeOutcome::Unreachable, ControllerState::Failed, 0)
            }
        };
        self.episodes.push(EpisodeSummary {
            root: plan.root,
            goal: plan.goal,
            agent: self.agent,
            expansions: plan.expansions,
            outcome,
            planned_length,
            cells_executed: 0,
            halted_at: None,
        });
        Ok(next)
    }

    fn execute(&mut self) -> ControllerState {
        let route = std::mem::take(&mut self.pending);
        let mut executed = 0;
        let mut halted_at = None;
        for next in route {
            if !self.world.is_traversable(next) {
                halted_at = Some(next);
                break;
            }
            self.agent = next;
            self.travelled.push(next);
            executed += 1;
            self.observe();
        }
        if let Some(episode) = self.episodes.last_mut() {
            episode.cells_executed = executed;
            episode.halted_at = halted_at;
        }

        if self.agent == self.world.target() {
            ControllerState::Succeeded
        } else {
            tracing::debug!(
                agent = %self.agent,
                executed,
                halted_at = ?halted_at,
                "execution stopped, replanning"
            );
            ControllerState::Observing
        }
    }

    /// Drive the run to a terminal state and report it.
    ///
    /// # Errors
    ///
    /// Propagates pre-flight [`SearchError`]s from the planner.
    pub fn run(mut self) -> Result<RunReport, SearchError> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        let report = self.report();
        tracing::info!(
            strategy = report.strategy.as_str(),
            reached_target = report.reached_target,
            episodes = report.episode_count(),
            total_expanded = report.total_expanded,
            steps = report.travelled_path.len(),
            "run finished"
        );
        Ok(report)
    }

    /// Snapshot of the run so far.
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport {
            world_index: None,
            strategy: self.planner.kind(),
            tie_break: self.policy.tie_break,
            rows: self.world.rows(),
            cols: self.world.cols(),
            start: self.world.start(),
            target: self.world.target(),
            reached_target: self.state == ControllerState::Succeeded,
            final_position: self.agent,
            total_expanded: self.total_expanded,
            travelled_path: self.travelled.clone(),
            episodes: self.episodes.clone(),
            discoveries: self.discoveries.clone(),
        }
    }
}
