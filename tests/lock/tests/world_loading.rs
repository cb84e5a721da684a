//! World collection loading from disk, including malformed inputs.

use std::io::Write;

use gridpath_harness::config::RunConfig;
use gridpath_harness::runner::{execute, RunError, RunOutput};
use gridpath_harness::worlds::{WorldCollection, WorldLoadError};
use gridpath_kernel::grid::record::WorldRecordError;
use gridpath_search::strategy::StrategyKind;

fn write_collection(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write collection");
    file
}

fn load_err(json: &str) -> WorldLoadError {
    let file = write_collection(json);
    WorldCollection::load(file.path()).expect_err("collection should be rejected")
}

#[test]
fn valid_collection_runs_end_to_end() {
    let file = write_collection(
        r#"{
            "0": {"Start": [0, 0], "Target": [2, 2], "Grid": [[0, 0, 0], [1, 1, 0], [0, 0, 0]]},
            "1": {"Start": [2, 0], "Target": [0, 0], "Grid": [[0, 1, 0], [0, 1, 0], [0, 0, 0]]}
        }"#,
    );
    let config = RunConfig {
        worlds_path: file.path().to_path_buf(),
        world_index: 1,
        strategy: StrategyKind::Backward,
        ..RunConfig::default()
    };
    let RunOutput::Single(report) = execute(&config).expect("run failed") else {
        panic!("expected single-world output");
    };
    assert_eq!(report.world_index, Some(1));
    assert!(report.reached_target);
    assert_eq!(report.travelled_path.len(), 2);
}

#[test]
fn ragged_grid_is_rejected() {
    let err = load_err(r#"{"0": {"Start": [0, 0], "Target": [1, 0], "Grid": [[0, 0], [0]]}}"#);
    assert!(matches!(
        err,
        WorldLoadError::Malformed {
            index: 0,
            source: WorldRecordError::RaggedGrid { row: 1, expected: 2, actual: 1 }
        }
    ));
}

#[test]
fn invalid_cell_value_is_rejected() {
    let err = load_err(r#"{"0": {"Start": [0, 0], "Target": [0, 1], "Grid": [[0, 2]]}}"#);
    assert!(matches!(
        err,
        WorldLoadError::Malformed {
            source: WorldRecordError::InvalidCell { row: 0, col: 1, value: 2 },
            ..
        }
    ));
}

#[test]
fn negative_or_short_coordinates_are_rejected() {
    let err = load_err(r#"{"0": {"Start": [0, -1], "Target": [0, 0], "Grid": [[0]]}}"#);
    assert!(matches!(
        err,
        WorldLoadError::Malformed {
            source: WorldRecordError::BadCoordinate { field: "Start", .. },
            ..
        }
    ));
    let err = load_err(r#"{"0": {"Start": [0, 0], "Target": [0], "Grid": [[0]]}}"#);
    assert!(matches!(
        err,
        WorldLoadError::Malformed {
            source: WorldRecordError::BadCoordinate { field: "Target", .. },
            ..
        }
    ));
}

#[test]
fn empty_grid_is_rejected() {
    let err = load_err(r#"{"0": {"Start": [0, 0], "Target": [0, 0], "Grid": []}}"#);
    assert!(matches!(
        err,
        WorldLoadError::Malformed {
            source: WorldRecordError::EmptyGrid,
            ..
        }
    ));
}

#[test]
fn missing_file_is_a_run_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = RunConfig {
        worlds_path: dir.path().join("nope.json"),
        ..RunConfig::default()
    };
    let err = execute(&config).expect_err("missing file must fail");
    assert!(matches!(err, RunError::Load(WorldLoadError::Io { .. })));
    assert!(err.to_string().contains("nope.json"));
}
