//! Persisted world records: `{"Start": [r, c], "Target": [r, c], "Grid": [[0|1, ...], ...]}`.
//!
//! A collection of records is a JSON object keyed by the decimal world index.
//! Records are decoded into a [`GridWorld`] at load time; any malformed record
//! is fatal before an episode runs.

use serde::{Deserialize, Serialize};

use crate::grid::position::Position;
use crate::grid::world::GridWorld;

/// A raw world record, exactly as stored.
///
/// Fields are optional so that a missing field is reported by name rather
/// than as an opaque deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRecord {
    #[serde(rename = "Start")]
    pub start: Option<Vec<i64>>,
    #[serde(rename = "Target")]
    pub target: Option<Vec<i64>>,
    #[serde(rename = "Grid")]
    pub grid: Option<Vec<Vec<i64>>>,
}

/// Why a world record could not be turned into a [`GridWorld`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldRecordError {
    /// A required field (`Start`, `Target`, `Grid`) is absent.
    MissingField { field: &'static str },
    /// A coordinate is not a pair of non-negative integers.
    BadCoordinate { field: &'static str, raw: Vec<i64> },
    /// The grid has no rows or no columns.
    EmptyGrid,
    /// Row `row` has `actual` cells where `expected` were required.
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A cell value other than `0` or `1`.
    InvalidCell { row: usize, col: usize, value: i64 },
    /// `Start` or `Target` lies outside the grid.
    OutOfBounds {
        field: &'static str,
        position: Position,
        rows: usize,
        cols: usize,
    },
}

impl std::fmt::Display for WorldRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "world record is missing `{field}`"),
            Self::BadCoordinate { field, raw } => {
                write!(f, "`{field}` must be [row, col] with non-negative values, got {raw:?}")
            }
            Self::EmptyGrid => write!(f, "world grid is empty"),
            Self::RaggedGrid {
                row,
                expected,
                actual,
            } => write!(
                f,
                "world grid is not rectangular: row {row} has {actual} cells, expected {expected}"
            ),
            Self::InvalidCell { row, col, value } => {
                write!(f, "grid cell ({row}, {col}) must be 0 or 1, got {value}")
            }
            Self::OutOfBounds {
                field,
                position,
                rows,
                cols,
            } => write!(f, "`{field}` {position} lies outside the {rows}x{cols} grid"),
        }
    }
}

impl std::error::Error for WorldRecordError {}

fn decode_position(field: &'static str, raw: Option<&[i64]>) -> Result<Position, WorldRecordError> {
    let raw = raw.ok_or(WorldRecordError::MissingField { field })?;
    let bad = || WorldRecordError::BadCoordinate {
        field,
        raw: raw.to_vec(),
    };
    match raw {
        [row, col] => {
            let row = usize::try_from(*row).map_err(|_| bad())?;
            let col = usize::try_from(*col).map_err(|_| bad())?;
            Ok(Position::new(row, col))
        }
        _ => Err(bad()),
    }
}

impl WorldRecord {
    /// Validate and decode the record.
    ///
    /// # Errors
    ///
    /// Returns [`WorldRecordError`] for missing fields, malformed coordinates,
    /// empty or non-rectangular grids, invalid cell values, and endpoints
    /// outside the grid.
    pub fn to_world(&self) -> Result<GridWorld, WorldRecordError> {
        let start = decode_position("Start", self.start.as_deref())?;
        let target = decode_position("Target", self.target.as_deref())?;
        let grid = self
            .grid
            .as_ref()
            .ok_or(WorldRecordError::MissingField { field: "Grid" })?;
        GridWorld::from_bits(grid, start, target)
    }

    /// Encode a world back into its persisted record form.
    #[must_use]
    pub fn from_world(world: &GridWorld) -> Self {
        let coord = |p: Position| {
            vec![
                i64::try_from(p.row).unwrap_or(i64::MAX),
                i64::try_from(p.col).unwrap_or(i64::MAX),
            ]
        };
        Self {
            start: Some(coord(world.start())),
            target: Some(coord(world.target())),
            grid: Some(
                world
                    .to_bits()
                    .into_iter()
                    .map(|row| row.into_iter().map(i64::from).collect())
                    .collect(),
            ),
        }
    }
}
