//! Grid module: positions, ground truth, believed knowledge, and world records.
//!
//! `position` is the foundational layer; `world` and `knowledge` build on it,
//! `record` decodes persisted worlds into a [`world::GridWorld`].

pub mod knowledge;
pub mod position;
pub mod record;
pub mod world;
