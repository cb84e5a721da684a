//! Gridpath Search: one deterministic A* engine and the planners built on it.
//!
//! This crate depends only on `gridpath_kernel`. It does NOT depend on
//! `gridpath_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! gridpath_kernel  ←  gridpath_search  ←  gridpath_harness
//! (grid, knowledge)   (engine, planners)   (controller, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`node::SearchNode`] : arena-resident node with `g`/`h`/`f` accounting
//! - [`arena::EpisodeArena`] : per-episode node pool addressed by [`node::NodeId`]
//! - [`frontier::OpenList`] : min-frontier keyed by `(f, tie-break, sequence)`
//! - [`search::search`] : the best-first expansion loop
//! - [`heuristic::HeuristicSource`] : Manhattan or learned heuristic lookup
//! - [`strategy::Planner`] : forward, backward and adaptive replanning strategies
//! - [`graph::EpisodeGraph`] : expansion log with a canonical digest

#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
pub mod strategy;
