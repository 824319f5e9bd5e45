//! Merged dataset export.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one header row with the canonical column names, then records in
//! their current (merged, ordered) order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Dataset;
use crate::error::AppError;

/// Write a dataset to a CSV file.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    write_dataset(file, dataset)
        .map_err(|e| AppError::io(format!("Failed to write export CSV '{}': {e}", path.display())))
}

/// Write a dataset to any writer. Split out from [`write_dataset_csv`] so
/// tests can capture the output in memory.
pub fn write_dataset<W: Write>(writer: W, dataset: &Dataset) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(dataset.columns())?;
    for record in dataset.records() {
        writer.write_record(record.values.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
