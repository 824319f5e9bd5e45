//! Overlap-aware dataset merging.
//!
//! The reference dataset wins inside its own key range: secondary records
//! whose key falls inside `[lo, hi]` are discarded, the survivors are placed
//! in front of the reference block, and nothing is sorted here.
//!
//! `lo`/`hi` come from the reference's FIRST and LAST records in acquisition
//! order, not from its overall minimum/maximum. A non-monotonic reference
//! with interior excursions outside `[firstKey, lastKey]` therefore does not
//! widen the removal window.

use crate::domain::{Dataset, FieldValue, Record, SOC};
use crate::error::{AppError, DatasetSide};

/// Result of one merge: the merged dataset plus the diagnostics the report
/// layer prints (removal window, drop counts).
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub merged: Dataset,
    /// Lower bound of the removal window (inclusive).
    pub lo: f64,
    /// Upper bound of the removal window (inclusive).
    pub hi: f64,
    /// Secondary records dropped because their key fell inside `[lo, hi]`.
    pub dropped: usize,
    /// Secondary records kept in front of the reference block.
    pub kept_secondary: usize,
}

/// Merge a secondary dataset into a reference dataset, removing secondary
/// records that overlap the reference's key range.
///
/// The merged record order is: surviving secondary records (original relative
/// order), then all reference records (original relative order). Ordering by
/// key is a separate stage.
///
/// Pure function of its inputs: neither dataset is mutated and no other state
/// is touched.
pub fn merge_with_overlap_removal(
    reference: &Dataset,
    secondary: &Dataset,
    key: &str,
) -> Result<MergeOutcome, AppError> {
    if reference.is_empty() {
        return Err(AppError::EmptyDataset {
            which: DatasetSide::Reference,
        });
    }
    if secondary.is_empty() {
        return Err(AppError::EmptyDataset {
            which: DatasetSide::Secondary,
        });
    }

    let reference_keys = reference.numeric_column(key)?;
    let secondary_keys = secondary.numeric_column(key)?;

    let first_key = reference_keys[0];
    let last_key = reference_keys[reference_keys.len() - 1];
    let lo = first_key.min(last_key);
    let hi = first_key.max(last_key);

    let mut records = Vec::with_capacity(reference.len() + secondary.len());
    let mut dropped = 0usize;

    for (record, &k) in secondary.records().iter().zip(secondary_keys.iter()) {
        if k >= lo && k <= hi {
            dropped += 1;
        } else {
            records.push(project_record(record, secondary.columns(), reference.columns()));
        }
    }
    let kept_secondary = records.len();

    records.extend(reference.records().iter().cloned());

    Ok(MergeOutcome {
        merged: Dataset::new(reference.columns().to_vec(), records),
        lo,
        hi,
        dropped,
        kept_secondary,
    })
}

/// Default-key convenience wrapper.
pub fn merge_default(reference: &Dataset, secondary: &Dataset) -> Result<MergeOutcome, AppError> {
    merge_with_overlap_removal(reference, secondary, SOC)
}

/// Reshape a secondary record onto the reference column layout. Passthrough
/// columns absent from the reference are dropped; reference columns absent
/// from the secondary become empty cells.
fn project_record(record: &Record, from: &[String], to: &[String]) -> Record {
    if from == to {
        return record.clone();
    }
    Record::new(
        to.iter()
            .map(|col| {
                from.iter()
                    .position(|c| c == col)
                    .and_then(|i| record.values.get(i).cloned())
                    .unwrap_or(FieldValue::Empty)
            })
            .collect(),
    )
}
