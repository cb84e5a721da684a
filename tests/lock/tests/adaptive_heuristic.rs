//! Learned heuristic lock tests.
//!
//! After every planning episode of an adaptive run, each table value must be
//! at most the true shortest distance to the target, and no value may ever
//! drop below what it was after the previous episode.

use std::collections::VecDeque;

use gridpath_harness::controller::{ControllerState, ReplanningController};
use gridpath_harness::worlds::fixtures;
use gridpath_kernel::grid::position::Position;
use gridpath_kernel::grid::world::GridWorld;
use gridpath_search::heuristic::HeuristicTable;
use gridpath_search::policy::{SearchPolicy, TieBreak};
use gridpath_search::strategy::StrategyKind;

/// True distance to the target for every cell; `None` where unreachable.
fn true_distances(world: &GridWorld) -> Vec<Vec<Option<u32>>> {
    let mut dist = vec![vec![None; world.cols()]; world.rows()];
    let target = world.target();
    dist[target.row][target.col] = Some(0);
    let mut queue = VecDeque::from([(target, 0u32)]);
    while let Some((pos, d)) = queue.pop_front() {
        for next in world.neighbors(pos) {
            if world.is_traversable(next) && dist[next.row][next.col].is_none() {
                dist[next.row][next.col] = Some(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    dist
}

fn snapshot(table: &HeuristicTable) -> Vec<u32> {
    (0..table.rows())
        .flat_map(|row| (0..table.cols()).map(move |col| (row, col)))
        .map(|(row, col)| table.get(Position::new(row, col)))
        .collect()
}

/// Run adaptively, checking the table after each planning step. Returns the
/// number of episodes observed.
fn check_run(world: &GridWorld, tie_break: TieBreak) -> usize {
    let truth = true_distances(world);
    let mut controller = ReplanningController::new(
        world,
        StrategyKind::Adaptive,
        SearchPolicy::with_tie_break(tie_break),
    );
    let mut previous: Option<Vec<u32>> = None;
    let mut episodes = 0;

    while !controller.state().is_terminal() {
        let before = controller.state();
        controller.step().expect("step failed");
        if before != ControllerState::Planning {
            continue;
        }
        episodes += 1;
        let table = controller.heuristic_table().expect("adaptive keeps a table");
        assert_eq!(table.target(), world.target());

        for row in 0..world.rows() {
            for col in 0..world.cols() {
                let pos = Position::new(row, col);
                if let Some(d) = truth[row][col] {
                    assert!(
                        table.get(pos) <= d,
                        "h{pos} = {} exceeds true distance {d} after episode {episodes}",
                        table.get(pos)
                    );
                }
            }
        }

        let current = snapshot(table);
        if let Some(prev) = &previous {
            for (i, (old, new)) in prev.iter().zip(&current).enumerate() {
                assert!(
                    new >= old,
                    "cell {i} dropped from {old} to {new} after episode {episodes}"
                );
            }
        }
        previous = Some(current);
    }
    episodes
}

#[test]
fn learned_values_are_admissible_and_monotone_on_wall() {
    let world = fixtures::wall_gap().expect("valid world");
    for tie_break in TieBreak::ALL {
        assert!(check_run(&world, tie_break) > 1);
    }
}

#[test]
fn learned_values_are_admissible_and_monotone_on_switchback() {
    for n in [6, 9, 12] {
        let world = fixtures::switchback(n).expect("valid world");
        for tie_break in TieBreak::ALL {
            assert!(check_run(&world, tie_break) > 1, "switchback({n})");
        }
    }
}

#[test]
fn failed_run_keeps_admissible_values() {
    let world = fixtures::sealed_target().expect("valid world");
    check_run(&world, TieBreak::LargeG);
}

#[test]
fn repeat_plan_keeps_optimal_length_with_dominating_table() {
    use gridpath_kernel::grid::knowledge::KnowledgeState;
    use gridpath_search::strategy::{AdaptivePlanner, ForwardPlanner, Planner};

    let world = fixtures::switchback(9).expect("valid world");
    let knowledge = KnowledgeState::fully_known(&world);
    let mut adaptive = AdaptivePlanner::new(SearchPolicy::default());
    let mut forward = ForwardPlanner::new(SearchPolicy::default());

    let first = adaptive
        .plan(world.start(), world.target(), &knowledge)
        .expect("plan failed");
    let baseline = forward
        .plan(world.start(), world.target(), &knowledge)
        .expect("plan failed");
    // A fresh table is exactly Manhattan, so the first episode matches forward.
    assert_eq!(first.expansions, baseline.expansions);
    assert_eq!(first.graph, baseline.graph);

    let second = adaptive
        .plan(world.start(), world.target(), &knowledge)
        .expect("plan failed");
    assert_eq!(second.path().map(<[_]>::len), baseline.path().map(<[_]>::len));

    let table = adaptive.heuristic_table().expect("table exists");
    for row in 0..world.rows() {
        for col in 0..world.cols() {
            let pos = Position::new(row, col);
            assert!(table.get(pos) >= pos.manhattan(world.target()));
        }
    }
    assert_eq!(
        table.get(world.start()),
        u32::try_from(baseline.path().expect("solvable").len()).expect("fits")
    );
}
