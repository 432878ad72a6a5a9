//! Matrix utility functions.

use faer::{Col, Mat};
use thiserror::Error;

/// Default relative cutoff for small singular values in the pseudo-inverse.
pub const DEFAULT_RCOND: f64 = 1e-15;

/// Errors raised by the dense linear algebra helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    #[error("singular value decomposition of a {nrows}x{ncols} matrix did not converge")]
    SvdFailed { nrows: usize, ncols: usize },
}

/// Thin singular value decomposition `X = U diag(s) Vᵀ`.
///
/// `u` is n × k, `v` is p × k and `s` holds the k = min(n, p) singular values
/// in non-increasing order.
#[derive(Debug, Clone)]
pub struct ThinSvd {
    pub u: Mat<f64>,
    pub s: Vec<f64>,
    pub v: Mat<f64>,
}

impl ThinSvd {
    /// Decompose `x`.
    pub fn compute(x: &Mat<f64>) -> Result<Self, LinalgError> {
        let svd = x.as_ref().thin_svd().map_err(|_| LinalgError::SvdFailed {
            nrows: x.nrows(),
            ncols: x.ncols(),
        })?;

        let diag = svd.S().column_vector();
        let s: Vec<f64> = (0..diag.nrows()).map(|k| diag[k]).collect();

        Ok(Self {
            u: svd.U().to_owned(),
            s,
            v: svd.V().to_owned(),
        })
    }

    /// Largest singular value (0 for an empty spectrum).
    pub fn max_singular_value(&self) -> f64 {
        self.s.iter().fold(0.0_f64, |acc, &v| acc.max(v))
    }

    /// Numerical rank: singular values above `s_max * max(n, p) * eps`.
    pub fn rank(&self) -> usize {
        let n = self.u.nrows();
        let p = self.v.nrows();
        let tol = self.max_singular_value() * n.max(p) as f64 * f64::EPSILON;
        self.s.iter().filter(|&&v| v > tol).count()
    }

    /// Moore-Penrose pseudo-inverse (p × n).
    ///
    /// Singular values at or below `rcond * s_max` are treated as zero.
    pub fn pseudo_inverse(&self, rcond: f64) -> Mat<f64> {
        let n = self.u.nrows();
        let p = self.v.nrows();
        let cutoff = rcond * self.max_singular_value();

        let inv_s: Vec<f64> = self
            .s
            .iter()
            .map(|&v| if v > cutoff { 1.0 / v } else { 0.0 })
            .collect();

        Mat::from_fn(p, n, |j, i| {
            let mut sum = 0.0;
            for (k, &w) in inv_s.iter().enumerate() {
                if w != 0.0 {
                    sum += self.v[(j, k)] * w * self.u[(i, k)];
                }
            }
            sum
        })
    }
}

/// Moore-Penrose pseudo-inverse of `x` with the default cutoff.
pub fn pseudo_inverse(x: &Mat<f64>) -> Result<Mat<f64>, LinalgError> {
    Ok(ThinSvd::compute(x)?.pseudo_inverse(DEFAULT_RCOND))
}

/// Numerical rank of `x` from its singular values.
pub fn matrix_rank(x: &Mat<f64>) -> Result<usize, LinalgError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Ok(0);
    }
    Ok(ThinSvd::compute(x)?.rank())
}

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_cols = x.ncols();
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; n_cols];
    }

    let mut constant = vec![false; n_cols];

    for j in 0..n_cols {
        let first = x[(0, j)];
        let all_same = (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance);
        constant[j] = all_same;
    }

    constant
}

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut means = Col::zeros(n_cols);
    let mut centered = Mat::zeros(n_rows, n_cols);

    for j in 0..n_cols {
        let sum: f64 = (0..n_rows).map(|i| x[(i, j)]).sum();
        means[j] = sum / n_rows as f64;

        for i in 0..n_rows {
            centered[(i, j)] = x[(i, j)] - means[j];
        }
    }

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    let centered = Col::from_fn(n, |i| y[i] - mean);

    (centered, mean)
}

/// Reshape a flat sequence of feature values into an n × 1 matrix.
pub fn as_column_matrix(values: &[f64]) -> Mat<f64> {
    Mat::from_fn(values.len(), 1, |i, _| values[i])
}

/// Split a combined matrix into its leading feature columns and its last column.
///
/// Returns `None` when there are fewer than two columns.
pub fn split_target(combined: &Mat<f64>) -> Option<(Mat<f64>, Col<f64>)> {
    let n = combined.nrows();
    let n_cols = combined.ncols();
    if n_cols < 2 {
        return None;
    }
    let p = n_cols - 1;

    let x = Mat::from_fn(n, p, |i, j| combined[(i, j)]);
    let y = Col::from_fn(n, |i| combined[(i, p)]);
    Some((x, y))
}

/// Append `y` as the last column of `x`.
pub fn append_target(x: &Mat<f64>, y: &Col<f64>) -> Mat<f64> {
    let p = x.ncols();
    Mat::from_fn(x.nrows(), p + 1, |i, j| if j < p { x[(i, j)] } else { y[i] })
}
