//! Grid coordinates and the four axis-aligned unit moves.

/// A cell coordinate: `row` grows downward, `col` grows rightward.
///
/// Ordering is row-major, which gives deterministic iteration wherever
/// positions are collected into ordered sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Norm-1 distance between two positions.
    ///
    /// Saturates at `u32::MAX`; grids that large are not addressable anyway.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        let d = self.row.abs_diff(other.row) + self.col.abs_diff(other.col);
        u32::try_from(d).unwrap_or(u32::MAX)
    }

    /// Apply `mv` inside an `rows × cols` grid.
    ///
    /// Returns `None` when the result would leave the grid. Out-of-bounds
    /// neighbors are excluded from move generation, never reported as errors.
    #[must_use]
    pub fn step(self, mv: Move, rows: usize, cols: usize) -> Option<Self> {
        let (dr, dc) = mv.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }

    /// Whether the two positions are 4-adjacent.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One of the four unit moves. No diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    East,
    West,
    North,
    South,
}

/// Canonical move enumeration order.
///
/// Child insertion order during expansion follows this array, so it feeds
/// directly into the frontier's insertion-sequence tie-break.
pub const MOVE_ORDER: [Move; 4] = [Move::East, Move::West, Move::North, Move::South];

impl Move {
    /// `(row, col)` offset of the move.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::East => (0, 1),
            Self::West => (0, -1),
            Self::North => (-1, 0),
            Self::South => (1, 0),
        }
    }
}

/// In-bounds 4-neighbors of `pos`, in `order`.
pub fn neighbors(
    pos: Position,
    rows: usize,
    cols: usize,
    order: &[Move],
) -> impl Iterator<Item = Position> + '_ {
    order.iter().filter_map(move |&mv| pos.step(mv, rows, cols))
}
