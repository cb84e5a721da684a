//! `GridWorld`: immutable ground-truth occupancy plus start and target.

use crate::grid::position::{neighbors, Position, MOVE_ORDER};
use crate::grid::record::WorldRecordError;

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Free,
    Blocked,
}

impl CellState {
    /// Decode the persisted `0`/`1` cell encoding.
    #[must_use]
    pub fn from_bit(bit: i64) -> Option<Self> {
        match bit {
            0 => Some(Self::Free),
            1 => Some(Self::Blocked),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_bit(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Blocked => 1,
        }
    }
}

/// One world: an `rows × cols` grid of ground-truth cells, a start and a target.
///
/// Created once (by a generator or from a [`crate::grid::record::WorldRecord`])
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    start: Position,
    target: Position,
}

impl GridWorld {
    /// Build a world from row-major cell rows.
    ///
    /// # Errors
    ///
    /// - [`WorldRecordError::EmptyGrid`] if there are no rows or the first row is empty.
    /// - [`WorldRecordError::RaggedGrid`] if rows differ in length.
    /// - [`WorldRecordError::OutOfBounds`] if `start` or `target` lies outside the grid.
    pub fn new(
        grid: Vec<Vec<CellState>>,
        start: Position,
        target: Position,
    ) -> Result<Self, WorldRecordError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(WorldRecordError::EmptyGrid);
        }
        if let Some(row) = grid.iter().position(|r| r.len() != cols) {
            return Err(WorldRecordError::RaggedGrid {
                row,
                expected: cols,
                actual: grid[row].len(),
            });
        }
        for (field, pos) in [("Start", start), ("Target", target)] {
            if pos.row >= rows || pos.col >= cols {
                return Err(WorldRecordError::OutOfBounds {
                    field,
                    position: pos,
                    rows,
                    cols,
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            cells: grid.into_iter().flatten().collect(),
            start,
            target,
        })
    }

    /// Build a world from `0`/`1` rows, the persisted encoding.
    ///
    /// # Errors
    ///
    /// Same as [`GridWorld::new`], plus [`WorldRecordError::InvalidCell`] for
    /// any value other than `0` or `1`.
    pub fn from_bits(
        bits: &[Vec<i64>],
        start: Position,
        target: Position,
    ) -> Result<Self, WorldRecordError> {
        let mut grid = Vec::with_capacity(bits.len());
        for (row, line) in bits.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, &bit) in line.iter().enumerate() {
                let cell = CellState::from_bit(bit)
                    .ok_or(WorldRecordError::InvalidCell { row, col, value: bit })?;
                cells.push(cell);
            }
            grid.push(cells);
        }
        Self::new(grid, start, target)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Ground-truth cell state; `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.contains(pos)
            .then(|| self.cells[pos.row * self.cols + pos.col])
    }

    /// Whether the agent can physically occupy `pos`.
    ///
    /// Out-of-bounds positions are treated as not traversable.
    #[must_use]
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(CellState::Free)
    }

    /// In-bounds 4-neighbors of `pos` in canonical move order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        neighbors(pos, self.rows, self.cols, &MOVE_ORDER)
    }

    /// Row-major `0`/`1` encoding of the ground truth.
    #[must_use]
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.to_bit()).collect())
            .collect()
    }

    /// Number of blocked cells in the ground truth.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellState::Blocked).count()
    }
}
