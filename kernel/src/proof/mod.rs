//! Proof module: canonical JSON and domain-separated content hashing.
//!
//! Run reports and expansion logs are hashed through this module so that two
//! runs can be compared by digest alone.

pub mod canon;
pub mod hash;
