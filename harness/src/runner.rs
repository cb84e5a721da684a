//! Runner: single-world runs and strategy comparisons.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig → WorldCollection::load → get(index)
//!   → ReplanningController::new → run → RunReport (+ digest)
//! ```
//!
//! Comparison mode repeats the single-world run for each variant over worlds
//! `0..count` and aggregates the per-world numbers.

use std::time::Instant;

use gridpath_kernel::proof::canon::CanonError;
use gridpath_search::error::SearchError;
use gridpath_search::policy::{SearchPolicy, TieBreak};
use gridpath_search::strategy::StrategyKind;

use crate::config::{ConfigError, RunConfig};
use crate::controller::ReplanningController;
use crate::report::RunReport;
use crate::worlds::{WorldCollection, WorldLoadError};

/// Error during a run or comparison.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Load(WorldLoadError),
    Search(SearchError),
    Canon(CanonError),
    /// A comparison was asked to cover zero worlds or zero variants.
    EmptyComparison,
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Load(e) => write!(f, "loading worlds: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
            Self::Canon(e) => write!(f, "report serialization: {e}"),
            Self::EmptyComparison => write!(f, "comparison needs at least one world and one variant"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
            Self::EmptyComparison => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<WorldLoadError> for RunError {
    fn from(e: WorldLoadError) -> Self {
        Self::Load(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Run one world of a collection to completion.
///
/// # Errors
///
/// [`RunError::Load`] if `index` is not in the collection,
/// [`RunError::Search`] on a pre-flight search failure.
pub fn run_world(
    worlds: &WorldCollection,
    index: usize,
    strategy: StrategyKind,
    policy: SearchPolicy,
) -> Result<RunReport, RunError> {
    let world = worlds.get(index)?;
    let _span = tracing::debug_span!("run", world = index, strategy = strategy.as_str()).entered();
    let mut report = ReplanningController::new(world, strategy, policy).run()?;
    report.world_index = Some(index);
    Ok(report)
}

/// One strategy × tie-break combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    pub strategy: StrategyKind,
    pub tie_break: TieBreak,
}

impl Variant {
    #[must_use]
    pub fn new(strategy: StrategyKind, tie_break: TieBreak) -> Self {
        Self {
            strategy,
            tie_break,
        }
    }

    /// `strategy/tie_break`, e.g. `forward/large_g`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.strategy, self.tie_break)
    }
}

/// The three standard pairings: forward vs adaptive, forward vs backward,
/// large-g vs small-g (forward).
#[must_use]
pub fn standard_comparisons() -> [[Variant; 2]; 3] {
    let forward = Variant::new(StrategyKind::Forward, TieBreak::LargeG);
    [
        [forward, Variant::new(StrategyKind::Adaptive, TieBreak::LargeG)],
        [forward, Variant::new(StrategyKind::Backward, TieBreak::LargeG)],
        [forward, Variant::new(StrategyKind::Forward, TieBreak::SmallG)],
    ]
}

/// One variant on one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantOutcome {
    pub variant: Variant,
    pub expanded: u64,
    pub reached_target: bool,
    pub path_length: usize,
    /// Wall time of the run. Not part of any digest.
    pub elapsed_micros: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldComparison {
    pub world_index: usize,
    pub outcomes: Vec<VariantOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantTotals {
    pub variant: Variant,
    pub worlds: usize,
    pub successes: usize,
    pub expanded: u64,
    pub path_length: usize,
    pub elapsed_micros: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub variants: Vec<Variant>,
    pub worlds: Vec<WorldComparison>,
    pub totals: Vec<VariantTotals>,
}

impl ComparisonReport {
    /// Totals for `variant`, if it was part of the comparison.
    #[must_use]
    pub fn totals_for(&self, variant: Variant) -> Option<&VariantTotals> {
        self.totals.iter().find(|t| t.variant == variant)
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let outcome = |o: &VariantOutcome| {
            serde_json::json!({
                "elapsed_micros": o.elapsed_micros,
                "expanded": o.expanded,
                "path_length": o.path_length,
                "reached_target": o.reached_target,
                "variant": o.variant.label(),
            })
        };
        serde_json::json!({
            "totals": self.totals.iter().map(|t| serde_json::json!({
                "elapsed_micros": t.elapsed_micros,
                "expanded": t.expanded,
                "path_length": t.path_length,
                "successes": t.successes,
                "variant": t.variant.label(),
                "worlds": t.worlds,
            })).collect::<Vec<_>>(),
            "variants": self.variants.iter().map(Variant::label).collect::<Vec<_>>(),
            "worlds": self.worlds.iter().map(|w| serde_json::json!({
                "outcomes": w.outcomes.iter().map(outcome).collect::<Vec<_>>(),
                "world_index": w.world_index,
            })).collect::<Vec<_>>(),
        })
    }
}

/// Run every variant on worlds `0..count`.
///
/// # Errors
///
/// [`RunError::EmptyComparison`] for zero worlds or variants,
/// [`RunError::Load`] if an index in `0..count` is missing,
/// [`RunError::Search`] on a pre-flight search failure.
pub fn compare(
    worlds: &WorldCollection,
    count: usize,
    variants: &[Variant],
) -> Result<ComparisonReport, RunError> {
    if count == 0 || variants.is_empty() {
        return Err(RunError::EmptyComparison);
    }
    let mut totals: Vec<VariantTotals> = variants
        .iter()
        .map(|&variant| VariantTotals {
            variant,
            worlds: 0,
            successes: 0,
            expanded: 0,
            path_length: 0,
            elapsed_micros: 0,
        })
        .collect();
    let mut rows = Vec::with_capacity(count);

    for index in 0..count {
        let mut outcomes = Vec::with_capacity(variants.len());
        for (variant, total) in variants.iter().zip(totals.iter_mut()) {
            let started = Instant::now();
            let report = run_world(
                worlds,
                index,
                variant.strategy,
                SearchPolicy::with_tie_break(variant.tie_break),
            )?;
            let elapsed_micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            let outcome = VariantOutcome {
                variant: *variant,
                expanded: report.total_expanded,
                reached_target: report.reached_target,
                path_length: report.travelled_path.len(),
                elapsed_micros,
            };
            total.worlds += 1;
            total.successes += usize::from(outcome.reached_target);
            total.expanded += outcome.expanded;
            total.path_length += outcome.path_length;
            total.elapsed_micros = total.elapsed_micros.saturating_add(elapsed_micros);
            outcomes.push(outcome);
        }
        rows.push(WorldComparison {
            world_index: index,
            outcomes,
        });
    }

    for total in &totals {
        tracing::info!(
            variant = %total.variant.label(),
            worlds = total.worlds,
            successes = total.successes,
            expanded = total.expanded,
            elapsed_micros = total.elapsed_micros,
            "comparison totals"
        );
    }

    Ok(ComparisonReport {
        variants: variants.to_vec(),
        worlds: rows,
        totals,
    })
}

/// What the binary prints.
#[derive(Debug, Clone)]
pub enum RunOutput {
    Single(RunReport),
    Comparison(Vec<ComparisonReport>),
}

impl RunOutput {
    /// Canonical JSON for a single run (digest included); plain JSON for
    /// comparisons.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Canon`] if canonicalization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        match self {
            Self::Single(report) => Ok(report.to_canonical_json_bytes()?),
            Self::Comparison(reports) => {
                let value = serde_json::Value::Array(
                    reports.iter().map(ComparisonReport::to_json_value).collect(),
                );
                Ok(gridpath_kernel::proof::canon::canonical_json_bytes(&value)?)
            }
        }
    }
}

/// Load the configured collection and run what `config` asks for.
///
/// # Errors
///
/// Any [`RunError`] from loading, running, or comparing.
pub fn execute(config: &RunConfig) -> Result<RunOutput, RunError> {
    let worlds = WorldCollection::load(&config.worlds_path)?;
    tracing::debug!(
        path = %config.worlds_path.display(),
        worlds = worlds.len(),
        "world collection loaded"
    );
    match config.compare_count {
        Some(count) => {
            let reports = standard_comparisons()
                .iter()
                .map(|pair| compare(&worlds, count, pair))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RunOutput::Comparison(reports))
        }
        None => Ok(RunOutput::Single(run_world(
            &worlds,
            config.world_index,
            config.strategy,
            SearchPolicy::with_tie_break(config.tie_break),
        )?)),
    }
}
