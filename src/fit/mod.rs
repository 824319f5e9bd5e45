//! Quadratic trend fitting.
//!
//! Fits `v(s) = c0 + c1*s + c2*s^2` by least squares over the `(SOC, Voltage)`
//! pairs of a dataset, in its current record order. Order does not change the
//! coefficients, only the row layout of the design matrix.
//!
//! The degree is fixed at 2: the trend line is a smoothing aid, not a cell
//! model, and downstream files assume exactly three coefficients.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, TrendModel, SOC, VOLTAGE};
use crate::error::AppError;
use crate::math::solve_least_squares;

/// Fit the quadratic trend for a dataset.
///
/// Requires at least 3 records with at least 3 distinct SOC values; with
/// fewer, the normal system is underdetermined. Deterministic: identical
/// input records always produce identical coefficients.
pub fn fit_trend(dataset: &Dataset) -> Result<TrendModel, AppError> {
    let soc = dataset.numeric_column(SOC)?;
    let voltage = dataset.numeric_column(VOLTAGE)?;

    let n = soc.len();
    if n < 3 {
        return Err(AppError::fit(format!(
            "need at least 3 records for a quadratic fit, got {n}"
        )));
    }
    let distinct = distinct_count(&soc);
    if distinct < 3 {
        // The SVD would happily return a minimum-norm solution for a
        // rank-deficient Vandermonde matrix, so reject these inputs up front.
        return Err(AppError::fit(format!(
            "need at least 3 distinct SOC values for a quadratic fit, got {distinct}"
        )));
    }

    let mut x = DMatrix::<f64>::zeros(n, 3);
    let mut y = DVector::<f64>::zeros(n);
    for i in 0..n {
        let s = soc[i];
        x[(i, 0)] = 1.0;
        x[(i, 1)] = s;
        x[(i, 2)] = s * s;
        y[i] = voltage[i];
    }

    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| AppError::fit("least-squares system is numerically singular"))?;

    Ok(TrendModel::new([beta[0], beta[1], beta[2]]))
}

fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
