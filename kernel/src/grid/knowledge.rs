//! `KnowledgeState`: the agent's believed map.
//!
//! Every cell starts believed-free. Observation flips cells to blocked once
//! their ground truth is seen; nothing ever flips a cell back. Planning reads
//! only this map, so known obstacles are always avoided while unknown ones are
//! discovered on approach.

use crate::grid::position::{neighbors, Position, MOVE_ORDER};
use crate::grid::world::{CellState, GridWorld};

/// Believed occupancy for an `rows × cols` grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeState {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    blocked: usize,
}

impl KnowledgeState {
    /// An all-free belief of the given dimensions.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Free; rows * cols],
            blocked: 0,
        }
    }

    /// An all-free belief sized for `world`.
    #[must_use]
    pub fn for_world(world: &GridWorld) -> Self {
        Self::new(world.rows(), world.cols())
    }

    /// A belief that already matches the ground truth of `world`.
    #[must_use]
    pub fn fully_known(world: &GridWorld) -> Self {
        let mut knowledge = Self::for_world(world);
        for row in 0..world.rows() {
            for col in 0..world.cols() {
                let pos = Position::new(row, col);
                if !world.is_traversable(pos) {
                    knowledge.mark_blocked(pos);
                }
            }
        }
        knowledge
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    /// Bounds check plus belief lookup. Used by the search engine.
    #[must_use]
    pub fn believed_traversable(&self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|i| self.cells[i] == CellState::Free)
    }

    /// Whether `pos` is known to be blocked.
    #[must_use]
    pub fn is_known_blocked(&self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|i| self.cells[i] == CellState::Blocked)
    }

    /// Record `pos` as blocked. Returns `true` only if this changed the belief.
    pub fn mark_blocked(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i] == CellState::Free => {
                self.cells[i] = CellState::Blocked;
                self.blocked += 1;
                true
            }
            _ => false,
        }
    }

    /// Look at the 4-neighborhood of `pos` in ground truth.
    ///
    /// Every neighbor that is blocked in `world` but still believed free is
    /// marked blocked and returned, in canonical move order. A second call at
    /// the same position returns an empty list.
    pub fn observe(&mut self, pos: Position, world: &GridWorld) -> Vec<Position> {
        neighbors(pos, self.rows, self.cols, &MOVE_ORDER)
            .filter(|&n| world.cell(n) == Some(CellState::Blocked))
            .filter(|&n| self.mark_blocked(n))
            .collect()
    }

    /// Number of cells currently believed blocked.
    #[must_use]
    pub fn known_blocked_count(&self) -> usize {
        self.blocked
    }
}
