//! Search policy types.

use gridpath_kernel::grid::position::{Move, MOVE_ORDER};

use crate::error::SearchError;

/// Which of two equal-`f` candidates the frontier pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Prefer the larger `g`: drills toward the goal, usually fewer expansions.
    #[default]
    LargeG,
    /// Prefer the smaller `g`: breadth-biased.
    SmallG,
}

impl TieBreak {
    pub const ALL: [Self; 2] = [Self::LargeG, Self::SmallG];

    /// Secondary frontier key, ascending.
    ///
    /// Among entries with equal `f = g + h`, a smaller `h` is a larger `g`, so
    /// `LargeG` keys on `h` and `SmallG` keys on `g`.
    #[must_use]
    pub fn secondary(self, g: u32, h: u32) -> u32 {
        match self {
            Self::LargeG => h,
            Self::SmallG => g,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LargeG => "large_g",
            Self::SmallG => "small_g",
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "large_g" | "largeg" | "large" => Ok(Self::LargeG),
            "small_g" | "smallg" | "small" => Ok(Self::SmallG),
            other => Err(format!("unknown tie-break `{other}` (expected large_g or small_g)")),
        }
    }
}

/// Per-episode search configuration, threaded explicitly into every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Equal-`f` preference.
    pub tie_break: TieBreak,
    /// Child generation order. Must be a permutation of the four moves.
    pub move_order: [Move; 4],
}

impl SearchPolicy {
    #[must_use]
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            ..Self::default()
        }
    }

    /// Check that `move_order` names each unit move exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidMoveOrder`] on a repeated move.
    pub fn validate(&self) -> Result<(), SearchError> {
        for (i, mv) in self.move_order.iter().enumerate() {
            if self.move_order[..i].contains(mv) {
                return Err(SearchError::InvalidMoveOrder {
                    detail: format!("{mv:?} appears more than once in {:?}", self.move_order),
                });
            }
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::LargeG,
            move_order: MOVE_ORDER,
        }
    }
}
