//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and the frontier's empty signal.
//! Frontier exhaustion during a search is not an error: it is reported as
//! [`crate::graph::TerminationReason::FrontierExhausted`] and the planners
//! turn it into an unreachable plan.

use gridpath_kernel::grid::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `pop_min` was called with no live entries left.
    EmptyFrontier,
    /// The policy's move order is not a permutation of the four unit moves.
    InvalidMoveOrder { detail: String },
    /// The search root or goal lies outside the believed grid.
    EndpointOutOfBounds {
        role: &'static str,
        position: Position,
        rows: usize,
        cols: usize,
    },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrontier => write!(f, "frontier has no live entries"),
            Self::InvalidMoveOrder { detail } => write!(f, "invalid move order: {detail}"),
            Self::EndpointOutOfBounds {
                role,
                position,
                rows,
                cols,
            } => write!(f, "search {role} {position} is outside the {rows}x{cols} grid"),
        }
    }
}

impl std::error::Error for SearchError {}
