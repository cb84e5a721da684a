//! Gridpath Kernel: the grid world and the agent's knowledge of it.
//!
//! # API Surface
//!
//! - [`grid::world::GridWorld`] -- immutable ground truth (cells, start, target)
//! - [`grid::knowledge::KnowledgeState`] -- the agent's believed map, grown by observation
//! - [`grid::record::WorldRecord`] -- the persisted `{Start, Target, Grid}` record
//! - [`proof::hash::canonical_hash`] -- domain-separated content hashing for reports
//!
//! # Module Dependency Direction
//!
//! `grid` and `proof` do not depend on each other. `proof` only hashes the
//! bytes handed to it.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grid;
pub mod proof;
