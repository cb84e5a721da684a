//! Run configuration.
//!
//! Defaults cover the common case (forward planning, large-g tie-break,
//! world 0 of `gridworlds.json`). [`RunConfig::from_env`] overrides them from
//! `GRIDPATH_*` variables; the binary loads a `.env` file before calling it.

use std::path::PathBuf;

use gridpath_search::policy::TieBreak;
use gridpath_search::strategy::StrategyKind;

pub const ENV_WORLDS: &str = "GRIDPATH_WORLDS";
pub const ENV_WORLD_INDEX: &str = "GRIDPATH_WORLD_INDEX";
pub const ENV_STRATEGY: &str = "GRIDPATH_STRATEGY";
pub const ENV_TIE_BREAK: &str = "GRIDPATH_TIE_BREAK";
pub const ENV_COMPARE_COUNT: &str = "GRIDPATH_COMPARE_COUNT";

pub const DEFAULT_WORLDS_PATH: &str = "gridworlds.json";

/// A configuration value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStrategy { raw: String, detail: String },
    InvalidTieBreak { raw: String, detail: String },
    /// A variable that must hold a non-negative integer does not.
    InvalidNumber { variable: &'static str, raw: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStrategy { raw, detail } => {
                write!(f, "{ENV_STRATEGY}=`{raw}`: {detail}")
            }
            Self::InvalidTieBreak { raw, detail } => {
                write!(f, "{ENV_TIE_BREAK}=`{raw}`: {detail}")
            }
            Self::InvalidNumber { variable, raw } => {
                write!(f, "{variable}=`{raw}` is not a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub worlds_path: PathBuf,
    pub world_index: usize,
    pub strategy: StrategyKind,
    pub tie_break: TieBreak,
    /// When set, run the strategy comparison over worlds `0..n` instead of a
    /// single world.
    pub compare_count: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            worlds_path: PathBuf::from(DEFAULT_WORLDS_PATH),
            world_index: 0,
            strategy: StrategyKind::Forward,
            tie_break: TieBreak::LargeG,
            compare_count: None,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first variable that is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unset and empty values keep the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first value that is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_WORLDS) {
            config.worlds_path = PathBuf::from(path);
        }
        if let Some(raw) = get(ENV_WORLD_INDEX) {
            config.world_index = parse_number(ENV_WORLD_INDEX, &raw)?;
        }
        if let Some(raw) = get(ENV_STRATEGY) {
            config.strategy = raw
                .parse()
                .map_err(|detail| ConfigError::InvalidStrategy { raw, detail })?;
        }
        if let Some(raw) = get(ENV_TIE_BREAK) {
            config.tie_break = raw
                .parse()
                .map_err(|detail| ConfigError::InvalidTieBreak { raw, detail })?;
        }
        if let Some(raw) = get(ENV_COMPARE_COUNT) {
            config.compare_count = Some(parse_number(ENV_COMPARE_COUNT, &raw)?);
        }
        Ok(config)
    }
}

fn parse_number(variable: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        variable,
        raw: raw.to_string(),
    })
}
