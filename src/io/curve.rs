//! Read/write trend JSON files.
//!
//! Trend JSON is the "portable" representation of a fitted trend:
//! - the three quadratic coefficients
//! - the analysis direction
//! - a precomputed evaluation grid for quick plotting without refitting
//!
//! The schema is defined by `domain::TrendFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{Direction, TrendFile, TrendGrid, TrendModel};
use crate::error::AppError;

/// Number of grid points written to a trend file.
const GRID_POINTS: usize = 101;

/// Write a trend JSON file covering the observed SOC range.
pub fn write_trend_json(
    path: &Path,
    trend: &TrendModel,
    direction: Direction,
    soc_min: f64,
    soc_max: f64,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create trend JSON '{}': {e}",
            path.display()
        ))
    })?;

    let curve = trend_file(trend, direction, soc_min, soc_max);
    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::io(format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}

/// Read a trend JSON file.
pub fn read_trend_json(path: &Path) -> Result<TrendFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open trend JSON '{}': {e}",
            path.display()
        ))
    })?;
    let curve: TrendFile = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid trend JSON: {e}")))?;
    Ok(curve)
}

/// Assemble the file payload. Split out from [`write_trend_json`] so tests
/// can inspect it without touching the filesystem.
pub fn trend_file(trend: &TrendModel, direction: Direction, soc_min: f64, soc_max: f64) -> TrendFile {
    let (soc, voltage) = build_grid(trend, soc_min, soc_max, GRID_POINTS);
    TrendFile {
        tool: "soc".to_string(),
        direction,
        model: trend.clone(),
        grid: TrendGrid { soc, voltage },
    }
}

fn build_grid(trend: &TrendModel, soc_min: f64, soc_max: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(2);
    let mut s0 = soc_min;
    let mut s1 = soc_max;
    if !(s0.is_finite() && s1.is_finite()) || s1 <= s0 {
        s0 = 0.0;
        s1 = 100.0;
    }

    let mut soc = Vec::with_capacity(n);
    let mut voltage = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let s = s0 + u * (s1 - s0);
        soc.push(s);
        voltage.push(trend.evaluate(s));
    }

    (soc, voltage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_the_observed_range_inclusive() {
        let trend = TrendModel::new([3.0, 0.01, 0.0]);
        let file = trend_file(&trend, Direction::Ascending, 10.0, 90.0);

        assert_eq!(file.grid.soc.len(), GRID_POINTS);
        assert!((file.grid.soc[0] - 10.0).abs() < 1e-12);
        assert!((file.grid.soc[GRID_POINTS - 1] - 90.0).abs() < 1e-12);
        // Grid voltages match the evaluator.
        for (s, v) in file.grid.soc.iter().zip(file.grid.voltage.iter()) {
            assert!((trend.evaluate(*s) - v).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_range_falls_back_to_full_soc_span() {
        let trend = TrendModel::new([3.0, 0.0, 0.0]);
        let file = trend_file(&trend, Direction::Descending, 50.0, 50.0);
        assert!((file.grid.soc[0] - 0.0).abs() < 1e-12);
        assert!((file.grid.soc.last().unwrap() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn trend_file_serializes_round_trip() {
        let trend = TrendModel::new([4.0, -3.0, 2.0]);
        let file = trend_file(&trend, Direction::Descending, 0.0, 100.0);

        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"direction\":\"descending\""));

        let back: TrendFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model, file.model);
        assert_eq!(back.tool, "soc");
    }
}
