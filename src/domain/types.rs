//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during merging and fitting
//! - exported to CSV/JSON
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Canonical key column name required by every pipeline stage.
pub const SOC: &str = "SOC";

/// Canonical value column name required by every pipeline stage.
pub const VOLTAGE: &str = "Voltage";

/// A single table cell.
///
/// Instrument CSV exports mix numbers with free text (cycle labels, operator
/// notes) and blank cells. Numbers are parsed once at load time so the
/// pipeline never re-parses strings.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Empty,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// One measurement row. Values are positional, parallel to [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<FieldValue>,
}

impl Record {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }
}

/// An ordered sequence of records sharing one column set.
///
/// Record order is acquisition order and is semantically meaningful: the
/// overlap merger derives its removal window from the first and last records,
/// not from the dataset's overall minimum/maximum.
///
/// No pipeline stage mutates a `Dataset` in place; each stage returns a new
/// value, so datasets can be shared freely across call sites and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extract a column as finite numbers, in record order.
    ///
    /// Fails with a schema error when the column is absent or any record
    /// holds a non-numeric (or non-finite) value in it.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, AppError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| AppError::schema(name, "not found", &self.columns))?;

        let mut out = Vec::with_capacity(self.records.len());
        for (row, record) in self.records.iter().enumerate() {
            let value = record
                .values
                .get(idx)
                .and_then(FieldValue::as_number)
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    AppError::schema(
                        name,
                        format!("non-numeric value at record {row}"),
                        &self.columns,
                    )
                })?;
            out.push(value);
        }
        Ok(out)
    }
}

/// Ordering direction for the merged dataset.
///
/// `Ascending` corresponds to a charging sweep (SOC rising), `Descending` to
/// a discharging sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Direction::Ascending => "charging (ascending SOC)",
            Direction::Descending => "discharging (descending SOC)",
        }
    }
}

/// A fitted quadratic trend: `v(s) = c0 + c1*s + c2*s^2`.
///
/// Coefficients are stored in ascending powers. The evaluator is pure and
/// will extrapolate outside the observed SOC range; whether extrapolation is
/// meaningful is the caller's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub coefficients: [f64; 3],
}

impl TrendModel {
    pub fn new(coefficients: [f64; 3]) -> Self {
        Self { coefficients }
    }

    /// Evaluate the trend at a SOC value (Horner form).
    pub fn evaluate(&self, soc: f64) -> f64 {
        let [c0, c1, c2] = self.coefficients;
        c0 + soc * (c1 + soc * c2)
    }
}

/// Summary stats for a resolved dataset, used in run reports.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: usize,
    pub soc_min: f64,
    pub soc_max: f64,
    pub voltage_min: f64,
    pub voltage_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Reference dataset path (wins inside its own key range).
    pub dataset1: PathBuf,
    /// Secondary dataset path (fills in outside the reference range).
    pub dataset2: PathBuf,
    /// Key column used for overlap removal and ordering.
    pub key: String,
    pub direction: Direction,

    pub export: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// A saved trend file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub direction: Direction,
    pub model: TrendModel,
    pub grid: TrendGrid,
}

/// Precomputed trend evaluations for quick plotting without refitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendGrid {
    pub soc: Vec<f64>,
    pub voltage: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_row(values: &[f64]) -> Record {
        Record::new(values.iter().map(|&v| FieldValue::Number(v)).collect())
    }

    #[test]
    fn numeric_column_extracts_in_record_order() {
        let ds = Dataset::new(
            vec![SOC.to_string(), VOLTAGE.to_string()],
            vec![number_row(&[20.0, 3.0]), number_row(&[10.0, 2.5])],
        );
        assert_eq!(ds.numeric_column(SOC).unwrap(), vec![20.0, 10.0]);
    }

    #[test]
    fn numeric_column_rejects_missing_column() {
        let ds = Dataset::new(vec!["time".to_string()], vec![number_row(&[1.0])]);
        let err = ds.numeric_column(SOC).unwrap_err();
        assert!(matches!(err, AppError::Schema { ref field, .. } if field == SOC));
    }

    #[test]
    fn numeric_column_rejects_text_cell() {
        let ds = Dataset::new(
            vec![SOC.to_string()],
            vec![
                number_row(&[10.0]),
                Record::new(vec![FieldValue::Text("n/a".to_string())]),
            ],
        );
        let err = ds.numeric_column(SOC).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn trend_model_evaluates_quadratic() {
        let m = TrendModel::new([4.0, -3.0, 2.0]);
        assert!((m.evaluate(10.0) - (4.0 - 30.0 + 200.0)).abs() < 1e-12);
        // Extrapolation outside any observed range is permitted.
        assert!(m.evaluate(-50.0).is_finite());
    }

    #[test]
    fn field_value_display_round_trips_numbers() {
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Text("aux".to_string()).to_string(), "aux");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }
}
