//! Shared helpers for gridpath benchmark suites.

use gridpath_harness::controller::ReplanningController;
use gridpath_harness::report::RunReport;
use gridpath_harness::worlds::fixtures;
use gridpath_kernel::grid::knowledge::KnowledgeState;
use gridpath_kernel::grid::world::GridWorld;
use gridpath_search::heuristic::ManhattanHeuristic;
use gridpath_search::policy::{SearchPolicy, TieBreak};
use gridpath_search::search::{search, EpisodeRequest, SearchResult};
use gridpath_search::strategy::StrategyKind;

/// A named world used across suites.
pub struct Scenario {
    pub name: &'static str,
    pub world: GridWorld,
}

/// The worlds every suite measures.
///
/// # Panics
///
/// Panics if a built-in layout fails validation. Benchmark setup failures are fatal.
#[must_use]
pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "open_64",
            world: fixtures::open_field(64, 64).expect("open_field"),
        },
        Scenario {
            name: "switchback_31",
            world: fixtures::switchback(31).expect("switchback"),
        },
        Scenario {
            name: "switchback_101",
            world: fixtures::switchback(101).expect("switchback"),
        },
        Scenario {
            name: "wall_gap",
            world: fixtures::wall_gap().expect("wall_gap"),
        },
    ]
}

/// One engine episode from start to target with ground truth fully known.
///
/// # Panics
///
/// Panics on a pre-flight search error.
#[must_use]
pub fn search_fully_known(world: &GridWorld, tie_break: TieBreak) -> SearchResult {
    let knowledge = KnowledgeState::fully_known(world);
    search(
        &EpisodeRequest {
            root: world.start(),
            goal: world.target(),
        },
        &ManhattanHeuristic::new(world.target()),
        &knowledge,
        &SearchPolicy::with_tie_break(tie_break),
    )
    .expect("search")
}

/// A full replanning run from an all-free belief.
///
/// # Panics
///
/// Panics on a pre-flight search error.
#[must_use]
pub fn run_replanning(world: &GridWorld, strategy: StrategyKind, tie_break: TieBreak) -> RunReport {
    ReplanningController::new(world, strategy, SearchPolicy::with_tie_break(tie_break))
        .run()
        .expect("run")
}
