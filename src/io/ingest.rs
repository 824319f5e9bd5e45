//! CSV dataset loading.
//!
//! The loader is deliberately permissive about content and strict about
//! structure: every cell that parses as a finite number becomes a number,
//! everything else stays text, and blank cells stay empty. Column names are
//! preserved verbatim (minus BOM and surrounding whitespace) so the schema
//! resolver sees exactly what the instrument wrote.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{Dataset, FieldValue, Record};
use crate::error::AppError;

/// Load a dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_dataset(file)
}

/// Read a dataset from any reader. Split out from [`load_dataset`] so tests
/// can feed in-memory CSV text.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header)
        .collect();
    let width = columns.len();

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV line numbers
        // are 1-based.
        let line = idx + 2;
        let record =
            result.map_err(|e| AppError::io(format!("CSV parse error at line {line}: {e}")))?;

        let mut values: Vec<FieldValue> = record.iter().take(width).map(parse_field).collect();
        // Short rows are padded so every record matches the header width.
        values.resize(width, FieldValue::Empty);
        records.push(Record::new(values));
    }

    Ok(Dataset::new(columns, records))
}

fn normalize_header(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, alias resolution will
    // incorrectly report a missing column.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_field(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Empty;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => FieldValue::Number(v),
        _ => FieldValue::Text(s.to_string()),
    }
}
