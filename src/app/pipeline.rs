//! Shared analysis pipeline used by the charge and discharge commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> resolve columns -> merge with overlap removal -> order -> fit
//!
//! The command handlers can then focus on presentation and exports.

use crate::domain::{AnalysisConfig, Dataset, DatasetStats, TrendModel};
use crate::error::{AppError, DatasetSide};
use crate::merge::MergeOutcome;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Reference dataset after column resolution.
    pub reference: Dataset,
    /// Secondary dataset after column resolution.
    pub secondary: Dataset,
    pub merge: MergeOutcome,
    /// Merged records sorted by the key column in the run's direction.
    pub ordered: Dataset,
    pub trend: TrendModel,
    pub reference_stats: DatasetStats,
    pub secondary_stats: DatasetStats,
    pub merged_stats: DatasetStats,
}

/// Execute the full analysis pipeline from the configured input files.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    let raw_reference = crate::io::ingest::load_dataset(&config.dataset1)?;
    let raw_secondary = crate::io::ingest::load_dataset(&config.dataset2)?;
    analyze_loaded(config, raw_reference, raw_secondary)
}

/// Execute the analysis pipeline on already-loaded datasets.
///
/// Split out from [`run_analysis`] so the whole workflow is testable without
/// touching the filesystem.
pub fn analyze_loaded(
    config: &AnalysisConfig,
    raw_reference: Dataset,
    raw_secondary: Dataset,
) -> Result<AnalysisOutput, AppError> {
    if raw_reference.is_empty() {
        return Err(AppError::EmptyDataset {
            which: DatasetSide::Reference,
        });
    }
    if raw_secondary.is_empty() {
        return Err(AppError::EmptyDataset {
            which: DatasetSide::Secondary,
        });
    }

    let reference = crate::schema::resolve_columns(&raw_reference)?;
    let secondary = crate::schema::resolve_columns(&raw_secondary)?;

    let merge = crate::merge::merge_with_overlap_removal(&reference, &secondary, &config.key)?;
    log::info!(
        "merged {} reference + {} secondary records (window [{}, {}], {} dropped)",
        reference.len(),
        secondary.len(),
        merge.lo,
        merge.hi,
        merge.dropped
    );

    let ordered = crate::order::order_by_key(&merge.merged, &config.key, config.direction)?;
    let trend = crate::fit::fit_trend(&ordered)?;

    let reference_stats = crate::report::dataset_stats(&reference)?;
    let secondary_stats = crate::report::dataset_stats(&secondary)?;
    let merged_stats = crate::report::dataset_stats(&ordered)?;

    Ok(AnalysisOutput {
        reference,
        secondary,
        merge,
        ordered,
        trend,
        reference_stats,
        secondary_stats,
        merged_stats,
    })
}
