//! PCA whitening.
//!
//! Projects mean-centered features onto their principal axes and rescales
//! each axis to unit variance, so the whitened training data has an identity
//! covariance matrix.

use crate::utils::{center_columns, detect_constant_columns, LinalgError, ThinSvd};
use faer::{Col, Mat};
use thiserror::Error;

/// Errors raised while fitting or applying a whitening transform.
#[derive(Debug, Error, PartialEq)]
pub enum WhiteningError {
    #[error("cannot fit whitening on an empty {nrows}x{ncols} matrix")]
    EmptyInput { nrows: usize, ncols: usize },

    #[error("feature count mismatch: whitening was fit on {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// Fitted PCA whitening transform.
///
/// Keeps `min(n, p)` components. Component signs are fixed so that the
/// largest-magnitude loading of every component is positive, which makes the
/// transform reproducible across fits on the same data.
///
/// Zero-variance directions are kept. Their explained variance is zero (NaN
/// for a single sample) and `transform` divides them by `f64::EPSILON`
/// instead, so the whitened matrix stays finite for finite input.
#[derive(Debug, Clone)]
pub struct PcaWhitening {
    mean: Col<f64>,
    /// k × p, one principal axis per row.
    components: Mat<f64>,
    explained_variance: Col<f64>,
    singular_values: Col<f64>,
}

impl PcaWhitening {
    /// Learn the whitening transform from training data.
    pub fn fit(x: &Mat<f64>) -> Result<Self, WhiteningError> {
        let n = x.nrows();
        let p = x.ncols();

        if n == 0 || p == 0 {
            return Err(WhiteningError::EmptyInput { nrows: n, ncols: p });
        }

        let constant = detect_constant_columns(x, 1e-12);
        if constant.iter().any(|&c| c) {
            tracing::warn!(
                n_constant = constant.iter().filter(|&&c| c).count(),
                "whitening input has zero-variance features; their scale is floored at machine epsilon"
            );
        }

        let (centered, mean) = center_columns(x);
        let svd = ThinSvd::compute(&centered)?;
        let k = svd.s.len();

        let mut components = Mat::from_fn(k, p, |c, j| svd.v[(j, c)]);
        for c in 0..k {
            let mut pivot = 0;
            for j in 1..p {
                if components[(c, j)].abs() > components[(c, pivot)].abs() {
                    pivot = j;
                }
            }
            if components[(c, pivot)] < 0.0 {
                for j in 0..p {
                    components[(c, j)] = -components[(c, j)];
                }
            }
        }

        let ddof = (n as f64) - 1.0;
        let explained_variance = Col::from_fn(k, |c| svd.s[c] * svd.s[c] / ddof);
        let singular_values = Col::from_fn(k, |c| svd.s[c]);

        tracing::debug!(
            n_samples = n,
            n_features = p,
            n_components = k,
            "fitted PCA whitening"
        );

        Ok(Self {
            mean,
            components,
            explained_variance,
            singular_values,
        })
    }

    /// Project `x` through the stored transform.
    ///
    /// `(x - mean) · componentsᵀ / sqrt(explained_variance)`, with the scale
    /// floored at `f64::EPSILON`.
    pub fn transform(&self, x: &Mat<f64>) -> Result<Mat<f64>, WhiteningError> {
        let p = self.n_features();
        if x.ncols() != p {
            return Err(WhiteningError::FeatureMismatch {
                expected: p,
                got: x.ncols(),
            });
        }

        let k = self.n_components();
        let scale: Vec<f64> = self
            .explained_variance
            .iter()
            .map(|v| {
                let s = v.sqrt();
                if s > f64::EPSILON {
                    s
                } else {
                    f64::EPSILON
                }
            })
            .collect();

        Ok(Mat::from_fn(x.nrows(), k, |i, c| {
            let mut projected = 0.0;
            for j in 0..p {
                projected += (x[(i, j)] - self.mean[j]) * self.components[(c, j)];
            }
            projected / scale[c]
        }))
    }

    /// Fit on `x` and return the whitened training data.
    pub fn fit_transform(x: &Mat<f64>) -> Result<(Self, Mat<f64>), WhiteningError> {
        let whitening = Self::fit(x)?;
        let transformed = whitening.transform(x)?;
        Ok((whitening, transformed))
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.components.ncols()
    }

    /// Number of retained components.
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    /// Per-feature training means.
    pub fn mean(&self) -> &Col<f64> {
        &self.mean
    }

    /// Principal axes, one per row.
    pub fn components(&self) -> &Mat<f64> {
        &self.components
    }

    /// Variance of the training data along each component (ddof = 1).
    pub fn explained_variance(&self) -> &Col<f64> {
        &self.explained_variance
    }

    /// Singular values of the centered training data.
    pub fn singular_values(&self) -> &Col<f64> {
        &self.singular_values
    }
}
