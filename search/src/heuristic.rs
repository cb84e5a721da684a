//! Heuristic sources for the engine.
//!
//! Moves have unit cost and there are no diagonals, so Manhattan distance is
//! admissible and consistent. The learned table starts from it and only ever
//! raises values to costs proven by a completed episode.

use gridpath_kernel::grid::position::Position;

/// Estimate of the remaining cost from a position to the episode's goal.
pub trait HeuristicSource {
    fn estimate(&self, pos: Position) -> u32;
}

/// Manhattan distance to a fixed goal. Rebuilt for every episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManhattanHeuristic {
    pub goal: Position,
}

impl ManhattanHeuristic {
    #[must_use]
    pub fn new(goal: Position) -> Self {
        Self { goal }
    }
}

impl HeuristicSource for ManhattanHeuristic {
    fn estimate(&self, pos: Position) -> u32 {
        pos.manhattan(self.goal)
    }
}

/// Learned per-cell heuristic keyed on one target.
///
/// Persists across episodes of a run. After an episode reaches its goal with
/// cost `g_goal`, every closed cell `s` is set to `g_goal - g(s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicTable {
    rows: usize,
    cols: usize,
    target: Position,
    values: Vec<u32>,
}

impl HeuristicTable {
    /// A table holding Manhattan distances to `target`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, target: Position) -> Self {
        let mut table = Self {
            rows,
            cols,
            target,
            values: vec![0; rows * cols],
        };
        table.rekey(target);
        table
    }

    /// Discard everything learned and reset to Manhattan distances to `target`.
    pub fn rekey(&mut self, target: Position) {
        self.target = target;
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.values[row * self.cols + col] = Position::new(row, col).manhattan(target);
            }
        }
    }

    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current value at `pos`; Manhattan distance when `pos` is off the table.
    #[must_use]
    pub fn get(&self, pos: Position) -> u32 {
        if pos.row < self.rows && pos.col < self.cols {
            self.values[pos.row * self.cols + pos.col]
        } else {
            pos.manhattan(self.target)
        }
    }

    /// Apply `h(s) = g_goal - g(s)` to every closed `(s, g(s))`.
    ///
    /// Only call this for an episode that reached the goal; `g(s) <= g_goal`
    /// holds for every closed cell of such an episode. Returns the number of
    /// cells whose value changed.
    pub fn update_from_closed<I>(&mut self, closed: I, g_goal: u32) -> usize
    where
        I: IntoIterator<Item = (Position, u32)>,
    {
        let mut changed = 0;
        for (pos, g) in closed {
            if pos.row >= self.rows || pos.col >= self.cols {
                continue;
            }
            let slot = &mut self.values[pos.row * self.cols + pos.col];
            let learned = g_goal.saturating_sub(g);
            if *slot != learned {
                *slot = learned;
                changed += 1;
            }
        }
        changed
    }
}

impl HeuristicSource for HeuristicTable {
    fn estimate(&self, pos: Position) -> u32 {
        self.get(pos)
    }
}
