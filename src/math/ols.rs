//! Least squares solver.
//!
//! The trend fit reduces to one small linear regression:
//!
//! ```text
//! minimize Σ (v_i - x_i^T β)^2
//! ```
//!
//! with a three-column Vandermonde design matrix `[1, s, s^2]`.
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly for tall
//!   matrices (many records, 3 columns). Nalgebra's `QR::solve` is intended
//!   for square systems and will panic for non-square matrices.
//! - SOC values near 100 make the `s^2` column large relative to the
//!   intercept, so the system can be poorly scaled; SVD with a relaxed
//!   tolerance handles that without extra conditioning work.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
