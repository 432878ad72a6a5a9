//! Influence measures: Cook's distance.

use super::leverage::leverage_from_pinv;
use super::residuals::{residual_mse, studentized_residuals};
use crate::solvers::{FittedRegressor, RegressionError};
use crate::utils::{ThinSvd, DEFAULT_RCOND};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Compute Cook's distance for each observation.
///
/// D_i = (r_i² / p) · (h_ii / (1 - h_ii))
///
/// where r_i is the internally studentized residual and p the number of
/// columns of the fit matrix. Observations with D_i > 4/n are typically
/// considered influential.
///
/// Leverage of one produces inf/NaN; nothing is clamped.
pub fn cooks_distance(studentized: &Col<f64>, leverage: &Col<f64>, n_params: usize) -> Col<f64> {
    let p = n_params as f64;
    Col::from_fn(studentized.nrows(), |i| {
        let r = studentized[i];
        let h = leverage[i];
        r * r / p * (h / (1.0 - h))
    })
}

/// Identify influential observations based on Cook's distance.
///
/// Returns indices of observations with D_i > threshold.
/// Default threshold: 4/n.
pub fn influential_points(cooks_d: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let n = cooks_d.nrows();
    let cutoff = threshold.unwrap_or(4.0 / n as f64);

    cooks_d
        .iter()
        .enumerate()
        .filter(|(_, &d)| d > cutoff)
        .map(|(i, _)| i)
        .collect()
}

/// Position of each Cook's distance in the F(p, df) distribution.
///
/// Values near or above 0.5 (the F median) mark observations that shift the
/// coefficient estimate outside its 50% confidence region. Non-finite
/// distances, and a non-positive `df`, map to NaN.
pub fn cooks_distance_cdf(cooks_d: &Col<f64>, n_params: usize, df: i64) -> Col<f64> {
    let n = cooks_d.nrows();
    if n_params == 0 || df <= 0 {
        return Col::from_fn(n, |_| f64::NAN);
    }

    match FisherSnedecor::new(n_params as f64, df as f64) {
        Ok(dist) => Col::from_fn(n, |i| {
            let d = cooks_d[i];
            if d.is_finite() {
                dist.cdf(d)
            } else {
                f64::NAN
            }
        }),
        Err(_) => Col::from_fn(n, |_| f64::NAN),
    }
}

/// Intermediate quantities of a Cook's distance computation.
#[derive(Debug, Clone)]
pub struct InfluenceReport {
    /// Hat matrix diagonal of the fit matrix.
    pub leverage: Col<f64>,
    /// y − ŷ.
    pub residuals: Col<f64>,
    /// Internally studentized residuals.
    pub studentized_residuals: Col<f64>,
    /// Cook's distance per observation.
    pub distances: Col<f64>,
    /// Numerical rank of the fit matrix.
    pub rank: usize,
    /// n − rank; may be zero or negative.
    pub df: i64,
    /// Residual mean square over `df`.
    pub mse: f64,
}

impl InfluenceReport {
    /// Cook's distances positioned in the F(p, df) distribution.
    pub fn f_cdf(&self, n_params: usize) -> Col<f64> {
        cooks_distance_cdf(&self.distances, n_params, self.df)
    }
}

/// Compute leverage, residuals and Cook's distance of `(x, y)` under `model`.
///
/// `x` is the matrix the model sees (already transformed, if applicable). The
/// model is only used for prediction; it is not refit, so this also scores new
/// data against a previously fitted model. Leverage and rank come from `x`
/// itself, without an intercept column.
pub fn influence_scores<M: FittedRegressor>(
    x: &Mat<f64>,
    y: &Col<f64>,
    model: &M,
) -> Result<InfluenceReport, RegressionError> {
    let n = x.nrows();
    if y.nrows() != n {
        return Err(RegressionError::DimensionMismatch {
            x_rows: n,
            y_len: y.nrows(),
        });
    }
    if x.ncols() == 0 {
        return Err(RegressionError::NoFeatures);
    }
    let n_coefficients = model.coefficients().nrows();
    if x.ncols() != n_coefficients {
        return Err(RegressionError::FeatureMismatch {
            expected: n_coefficients,
            got: x.ncols(),
        });
    }

    let svd = ThinSvd::compute(x)?;
    let pinv = svd.pseudo_inverse(DEFAULT_RCOND);
    let leverage = leverage_from_pinv(x, &pinv);

    let rank = svd.rank();
    let df = n as i64 - rank as i64;
    if df <= 0 {
        tracing::warn!(
            n_samples = n,
            rank,
            df,
            "no residual degrees of freedom; Cook's distance is undefined"
        );
    }

    let predictions = model.predict(x);
    let residuals = Col::from_fn(n, |i| y[i] - predictions[i]);
    let mse = residual_mse(&residuals, df);

    let studentized = studentized_residuals(&residuals, &leverage, mse);
    let distances = cooks_distance(&studentized, &leverage, x.ncols());

    tracing::debug!(n_samples = n, n_features = x.ncols(), rank, df, mse, "computed Cook's distance");

    Ok(InfluenceReport {
        leverage,
        residuals,
        studentized_residuals: studentized,
        distances,
        rank,
        df,
        mse,
    })
}
