//! Regression result structures.

use faer::Col;

/// Result of a least-squares fit.
///
/// Holds the estimated coefficients together with the training residuals and
/// the handful of fit statistics the influence diagnostics rely on.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated coefficients (excluding intercept).
    ///
    /// For rank-deficient designs this is the minimum-norm solution.
    pub coefficients: Col<f64>,

    /// Intercept term (if model was fit with intercept).
    pub intercept: Option<f64>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    // ========== Rank Information ==========
    /// Numerical rank of the (centered) design matrix.
    pub rank: usize,

    /// Number of parameters (rank plus intercept if present).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    /// Relative cutoff used to discard small singular values.
    pub rcond: f64,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Mean squared error (RSS / residual df), NaN when df is zero.
    pub mse: f64,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(n_features: usize, n_observations: usize) -> Self {
        Self {
            coefficients: Col::zeros(n_features),
            intercept: None,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            rank: 0,
            n_parameters: 0,
            n_observations,
            rcond: 1e-15,
            r_squared: 0.0,
            mse: 0.0,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Residual sum of squares (RSS).
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }

    /// Total sum of squares (TSS).
    pub fn tss(&self) -> f64 {
        let n = self.n_observations as f64;
        let y_mean = self
            .residuals
            .iter()
            .zip(self.fitted_values.iter())
            .map(|(&r, &f)| r + f)
            .sum::<f64>()
            / n;

        self.residuals
            .iter()
            .zip(self.fitted_values.iter())
            .map(|(&r, &f)| (f + r - y_mean).powi(2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = RegressionResult::empty(3, 10);
        assert_eq!(result.coefficients.nrows(), 3);
        assert_eq!(result.n_observations, 10);
        assert_eq!(result.residual_df(), 10);
    }

    #[test]
    fn test_residual_df_saturates() {
        let mut result = RegressionResult::empty(5, 3);
        result.n_parameters = 4;
        assert_eq!(result.residual_df(), 0);
    }

    #[test]
    fn test_tss_rss() {
        let mut result = RegressionResult::empty(1, 5);
        result.fitted_values = Col::from_fn(5, |i| [1.1, 2.0, 2.9, 4.0, 5.1][i]);
        result.residuals = Col::from_fn(5, |i| [-0.1, 0.0, 0.1, 0.0, -0.1][i]);

        // RSS = 0.01 + 0 + 0.01 + 0 + 0.01
        assert!((result.rss() - 0.03).abs() < 1e-10);
        assert!(result.tss() > result.rss());
    }
}
