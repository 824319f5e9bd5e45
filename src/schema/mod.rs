//! Column-name canonicalization.
//!
//! Instrument exports rarely agree on column naming (`SoC`, `state_of_charge`,
//! `Cell Voltage [V]`, ...), so the pipeline normalizes each dataset to the two
//! canonical columns before any other stage runs.
//!
//! Resolution policy, applied per canonical field in three phases:
//!
//! 1. exact match on the canonical name
//! 2. case-insensitive exact match against a fixed alias set
//! 3. case-insensitive substring match of the canonical name's lowercase form
//!
//! Within a phase, columns are scanned in dataset order and the first match
//! wins. A column already claimed for one canonical field is never eligible
//! for the other.

use crate::domain::{Dataset, SOC, VOLTAGE};
use crate::error::AppError;

const SOC_ALIASES: &[&str] = &["soc", "state_of_charge", "stateofcharge"];
const VOLTAGE_ALIASES: &[&str] = &["voltage", "v", "volt", "volts"];

/// Produce a new dataset whose column names are canonicalized to `SOC` and
/// `Voltage`. The input is untouched; passthrough columns keep their names
/// and values.
///
/// After renaming, both canonical columns must hold finite numeric values in
/// every record.
pub fn resolve_columns(dataset: &Dataset) -> Result<Dataset, AppError> {
    let mut columns = dataset.columns().to_vec();

    let soc_idx = resolve_one(&columns, SOC, SOC_ALIASES, None)?;
    let voltage_idx = resolve_one(&columns, VOLTAGE, VOLTAGE_ALIASES, Some(soc_idx))?;

    columns[soc_idx] = SOC.to_string();
    columns[voltage_idx] = VOLTAGE.to_string();

    let resolved = Dataset::new(columns, dataset.records().to_vec());

    // The Dataset invariant downstream stages rely on: canonical columns are
    // finite numbers in every record.
    resolved.numeric_column(SOC)?;
    resolved.numeric_column(VOLTAGE)?;

    Ok(resolved)
}

fn resolve_one(
    columns: &[String],
    canonical: &str,
    aliases: &[&str],
    claimed: Option<usize>,
) -> Result<usize, AppError> {
    let eligible = |i: usize| claimed != Some(i);

    // Phase 1: exact canonical name.
    if let Some(i) = columns
        .iter()
        .position(|c| c == canonical)
        .filter(|&i| eligible(i))
    {
        return Ok(i);
    }

    // Phase 2: case-insensitive alias match.
    for (i, col) in columns.iter().enumerate() {
        if eligible(i) && aliases.iter().any(|a| col.eq_ignore_ascii_case(a)) {
            return Ok(i);
        }
    }

    // Phase 3: substring match on the lowercase canonical name.
    let needle = canonical.to_ascii_lowercase();
    for (i, col) in columns.iter().enumerate() {
        if eligible(i) && col.to_ascii_lowercase().contains(&needle) {
            return Ok(i);
        }
    }

    Err(AppError::schema(
        canonical,
        "not found after alias resolution",
        columns,
    ))
}
