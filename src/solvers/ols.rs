//! Ordinary Least Squares regression solver.

use crate::core::RegressionResult;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector, ThinSvd, DEFAULT_RCOND};
use faer::{Col, Mat};

/// Ordinary Least Squares regression estimator.
///
/// Solves for the minimum-norm least-squares coefficients through the
/// pseudo-inverse of the (centered) design matrix. Rank-deficient designs and
/// designs with more features than observations are accepted: the solution is
/// then the shortest coefficient vector among all minimizers.
///
/// # Example
///
/// ```rust,ignore
/// use cooks_outlier::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// let x = Mat::from_fn(100, 2, |i, j| (i + j) as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .build()
///     .fit(&x, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// println!("Coefficients: {:?}", fitted.coefficients());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    with_intercept: bool,
    rcond: f64,
}

impl Default for OlsRegressor {
    fn default() -> Self {
        Self {
            with_intercept: true,
            rcond: DEFAULT_RCOND,
        }
    }
}

impl OlsRegressor {
    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Whether the regressor fits an intercept.
    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if n_samples == 0 {
            return Err(RegressionError::InsufficientObservations { needed: 1, got: 0 });
        }

        if n_features == 0 {
            return Err(RegressionError::NoFeatures);
        }

        let (coefficients, intercept, rank) = if self.with_intercept {
            let (x_centered, x_means) = center_columns(x);
            let (y_centered, y_mean) = center_vector(y);

            let (coefficients, rank) = self.solve_min_norm(&x_centered, &y_centered)?;

            // intercept = y_mean - x_means' * coefficients
            let mut intercept = y_mean;
            for j in 0..n_features {
                intercept -= x_means[j] * coefficients[j];
            }

            (coefficients, Some(intercept), rank)
        } else {
            let (coefficients, rank) = self.solve_min_norm(x, y)?;
            (coefficients, None, rank)
        };

        let mut result = RegressionResult::empty(n_features, n_samples);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.rank = rank;
        result.n_parameters = rank + usize::from(intercept.is_some());
        result.rcond = self.rcond;

        let mut fitted = FittedOls { result };
        let fitted_values = fitted.predict(x);
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        fitted.result.fitted_values = fitted_values;
        fitted.result.residuals = residuals;
        fitted.compute_statistics();

        Ok(fitted)
    }
}

impl OlsRegressor {
    /// Solve `min ||y - Xβ||` for the shortest β via `β = X⁺ y`.
    fn solve_min_norm(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
    ) -> Result<(Col<f64>, usize), RegressionError> {
        let svd = ThinSvd::compute(x)?;
        let pinv = svd.pseudo_inverse(self.rcond);
        let n = x.nrows();

        let coefficients = Col::from_fn(x.ncols(), |j| (0..n).map(|i| pinv[(j, i)] * y[i]).sum());

        Ok((coefficients, svd.rank()))
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    result: RegressionResult,
}

impl FittedOls {
    /// Number of feature columns the model was fit on.
    pub fn n_features(&self) -> usize {
        self.result.coefficients.nrows()
    }

    fn compute_statistics(&mut self) {
        let rss = self.result.rss();
        let tss = self.result.tss();

        self.result.r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let df_resid = self.result.residual_df();
        self.result.mse = if df_resid > 0 {
            rss / df_resid as f64
        } else {
            f64::NAN
        };
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let n_samples = x.nrows();
        let n_features = x.ncols();
        let intercept = self.result.intercept.unwrap_or(0.0);

        Col::from_fn(n_samples, |i| {
            let mut pred = intercept;
            for j in 0..n_features {
                pred += x[(i, j)] * self.result.coefficients[j];
            }
            pred
        })
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    regressor: OlsRegressor,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.regressor.with_intercept = include;
        self
    }

    /// Set the relative cutoff below which singular values are discarded.
    pub fn rcond(mut self, rcond: f64) -> Self {
        self.regressor.rcond = rcond;
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        self.regressor
    }
}
