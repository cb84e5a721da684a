//! Gridpath Harness: runs worlds through the replanning loop.
//!
//! The harness owns orchestration only. Search logic lives in
//! `gridpath_search`; grid truth and belief live in `gridpath_kernel`.
//!
//! ```text
//! RunConfig ─> WorldCollection ─> ReplanningController ─> RunReport
//!                                        │
//!                                        └─> Planner (forward | backward | adaptive)
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod controller;
pub mod report;
pub mod runner;
pub mod worlds;
