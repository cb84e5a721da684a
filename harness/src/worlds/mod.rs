//! World collections: loading persisted records and a few built-in layouts.
//!
//! A collection file is a JSON object keyed by decimal world index. Keys and
//! records are validated when the collection is loaded, so a malformed entry
//! fails before any episode runs.

pub mod fixtures;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gridpath_kernel::grid::record::{WorldRecord, WorldRecordError};
use gridpath_kernel::grid::world::GridWorld;

/// Why a world collection (or one world in it) could not be loaded.
#[derive(Debug)]
pub enum WorldLoadError {
    /// The collection file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The collection is not a JSON object of world records.
    Json(serde_json::Error),
    /// A key is not a decimal world index.
    InvalidKey { key: String },
    /// No world with this index exists in the collection.
    UnknownIndex { index: usize },
    /// The record at `index` failed validation.
    Malformed {
        index: usize,
        source: WorldRecordError,
    },
}

impl std::fmt::Display for WorldLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read world collection {}: {source}", path.display())
            }
            Self::Json(e) => write!(f, "world collection is not valid JSON: {e}"),
            Self::InvalidKey { key } => write!(f, "world key `{key}` is not a decimal index"),
            Self::UnknownIndex { index } => write!(f, "no world with index {index}"),
            Self::Malformed { index, source } => write!(f, "world {index}: {source}"),
        }
    }
}

impl std::error::Error for WorldLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Malformed { source, .. } => Some(source),
            Self::InvalidKey { .. } | Self::UnknownIndex { .. } => None,
        }
    }
}

impl From<serde_json::Error> for WorldLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Validated worlds keyed by index.
#[derive(Debug, Clone, Default)]
pub struct WorldCollection {
    worlds: BTreeMap<usize, GridWorld>,
}

impl WorldCollection {
    /// Parse and validate a collection from JSON bytes.
    ///
    /// # Errors
    ///
    /// [`WorldLoadError::Json`] for bad JSON, [`WorldLoadError::InvalidKey`]
    /// for a non-numeric key, [`WorldLoadError::Malformed`] for the first
    /// (lowest-index) record that fails validation.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WorldLoadError> {
        let raw: BTreeMap<String, WorldRecord> = serde_json::from_slice(bytes)?;
        let mut records = BTreeMap::new();
        for (key, record) in raw {
            let index = parse_index(&key)?;
            records.insert(index, record);
        }
        let mut worlds = BTreeMap::new();
        for (index, record) in records {
            let world = record
                .to_world()
                .map_err(|source| WorldLoadError::Malformed { index, source })?;
            worlds.insert(index, world);
        }
        Ok(Self { worlds })
    }

    /// Read and validate a collection file.
    ///
    /// # Errors
    ///
    /// [`WorldLoadError::Io`] if the file cannot be read, otherwise as
    /// [`WorldCollection::from_slice`].
    pub fn load(path: &Path) -> Result<Self, WorldLoadError> {
        let bytes = std::fs::read(path).map_err(|source| WorldLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// Build a collection from worlds already in memory.
    #[must_use]
    pub fn from_worlds<I: IntoIterator<Item = (usize, GridWorld)>>(worlds: I) -> Self {
        Self {
            worlds: worlds.into_iter().collect(),
        }
    }

    /// # Errors
    ///
    /// Returns [`WorldLoadError::UnknownIndex`] if `index` is absent.
    pub fn get(&self, index: usize) -> Result<&GridWorld, WorldLoadError> {
        self.worlds
            .get(&index)
            .ok_or(WorldLoadError::UnknownIndex { index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.worlds.keys().copied()
    }

    /// Serialize back to the persisted collection format.
    ///
    /// # Errors
    ///
    /// Returns [`WorldLoadError::Json`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, WorldLoadError> {
        let raw: BTreeMap<String, WorldRecord> = self
            .worlds
            .iter()
            .map(|(index, world)| (index.to_string(), WorldRecord::from_world(world)))
            .collect();
        Ok(serde_json::to_vec(&raw)?)
    }
}

fn parse_index(key: &str) -> Result<usize, WorldLoadError> {
    let invalid = || WorldLoadError::InvalidKey {
        key: key.to_string(),
    };
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    key.parse().map_err(|_| invalid())
}
