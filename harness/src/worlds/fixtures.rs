//! Built-in worlds used by tests, the fixture binary, and benchmarks.

use gridpath_kernel::grid::position::Position;
use gridpath_kernel::grid::record::WorldRecordError;
use gridpath_kernel::grid::world::{CellState, GridWorld};

/// 5×5, wall down column 2 with a single gap at `(4, 2)`. `(0,0)` → `(3,3)`.
///
/// Shortest route is 8 moves.
///
/// # Errors
///
/// Never in practice; the layout is fixed and valid.
pub fn wall_gap() -> Result<GridWorld, WorldRecordError> {
    GridWorld::from_bits(
        &[
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 0, 0, 0],
        ],
        Position::new(0, 0),
        Position::new(3, 3),
    )
}

/// Obstacle-free `rows × cols`, corner to corner.
///
/// # Errors
///
/// [`WorldRecordError::EmptyGrid`] if either dimension is zero.
pub fn open_field(rows: usize, cols: usize) -> Result<GridWorld, WorldRecordError> {
    GridWorld::new(
        vec![vec![CellState::Free; cols]; rows],
        Position::new(0, 0),
        Position::new(rows.saturating_sub(1), cols.saturating_sub(1)),
    )
}

/// 5×5 whose target `(4,4)` is boxed in by `(3,4)`, `(4,3)` and `(3,3)`.
///
/// # Errors
///
/// Never in practice; the layout is fixed and valid.
pub fn sealed_target() -> Result<GridWorld, WorldRecordError> {
    GridWorld::from_bits(
        &[
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 1, 1],
            vec![0, 0, 0, 1, 0],
        ],
        Position::new(0, 0),
        Position::new(4, 4),
    )
}

/// `n × n` switchback corridor.
///
/// Every odd row is a wall with one opening, alternating between the right
/// and left edge, so the route from `(0,0)` to the last row zigzags through
/// the whole grid. Unknown at the start, the walls force many replans.
///
/// # Errors
///
/// [`WorldRecordError::EmptyGrid`] if `n` is zero.
pub fn switchback(n: usize) -> Result<GridWorld, WorldRecordError> {
    let gap = |row: usize| if (row / 2) % 2 == 0 { n - 1 } else { 0 };
    let mut grid = vec![vec![CellState::Free; n]; n];
    for (row, cells) in grid.iter_mut().enumerate().skip(1).step_by(2) {
        let open = gap(row);
        for (col, cell) in cells.iter_mut().enumerate() {
            if col != open {
                *cell = CellState::Blocked;
            }
        }
    }
    let last = n.saturating_sub(1);
    let target_col = if last % 2 == 1 { gap(last) } else { last };
    GridWorld::new(grid, Position::new(0, 0), Position::new(last, target_col))
}
