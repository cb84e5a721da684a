//! Binary that runs the built-in worlds through every strategy and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `replan_fixture`
//!
//! Output: one `key=value` line per (world, strategy, tie-break) field.

use gridpath_harness::controller::ReplanningController;
use gridpath_harness::worlds::fixtures;
use gridpath_search::policy::{SearchPolicy, TieBreak};
use gridpath_search::strategy::StrategyKind;

fn main() {
    let worlds = [
        ("wall_gap", fixtures::wall_gap().expect("wall_gap is valid")),
        ("switchback_9", fixtures::switchback(9).expect("switchback is valid")),
        ("sealed_target", fixtures::sealed_target().expect("sealed_target is valid")),
    ];

    for (name, world) in &worlds {
        for strategy in StrategyKind::ALL {
            for tie_break in TieBreak::ALL {
                let report = ReplanningController::new(
                    world,
                    strategy,
                    SearchPolicy::with_tie_break(tie_break),
                )
                .run()
                .expect("fixture run failed");
                let digest = report.digest().expect("report digest failed");
                let key = format!("{name}.{strategy}.{tie_break}");

                println!("{key}.digest={}", digest.as_str());
                println!("{key}.reached_target={}", report.reached_target);
                println!("{key}.total_expanded={}", report.total_expanded);
                println!("{key}.episodes={}", report.episode_count());
                println!("{key}.steps={}", report.travelled_path.len());
            }
        }
    }
}
