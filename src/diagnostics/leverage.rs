//! Leverage (hat matrix diagonal) calculations.

use crate::utils::{pseudo_inverse, LinalgError};
use faer::{Col, Mat};

/// Leverage from `x` and its pseudo-inverse: `h_i = Σ_j x[i, j] · x⁺[j, i]`.
pub(crate) fn leverage_from_pinv(x: &Mat<f64>, pinv: &Mat<f64>) -> Col<f64> {
    let p = x.ncols();
    Col::from_fn(x.nrows(), |i| (0..p).map(|j| x[(i, j)] * pinv[(j, i)]).sum())
}

/// Compute leverage values (diagonal of the hat matrix H = X X⁺).
///
/// The hat matrix is the orthogonal projection onto the column space of `x`.
/// It is obtained through the Moore-Penrose pseudo-inverse rather than
/// `(X'X)⁻¹X'`, so rank-deficient matrices are handled without inversion.
/// No intercept column is added; pass the design matrix as it was used for
/// fitting.
///
/// # Properties
/// - h_ii ∈ [0, 1] up to rounding
/// - Σ h_ii = rank(X)
///
/// Values are not clamped.
pub fn compute_leverage(x: &Mat<f64>) -> Result<Col<f64>, LinalgError> {
    let pinv = pseudo_inverse(x)?;
    Ok(leverage_from_pinv(x, &pinv))
}

/// Identify high leverage points.
///
/// Returns indices of observations with leverage > threshold.
/// Default threshold is 2p/n where p is number of parameters.
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let n = leverage.nrows();
    let cutoff = threshold.unwrap_or(2.0 * n_params as f64 / n as f64);

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leverage_bounds() {
        let x = Mat::from_fn(20, 2, |i, j| if j == 0 { i as f64 * 0.1 } else { (i as f64).sin() });
        let leverage = compute_leverage(&x).unwrap();

        for i in 0..leverage.nrows() {
            assert!(
                leverage[i] >= -1e-12 && leverage[i] <= 1.0 + 1e-12,
                "Leverage[{}] = {} should be in [0, 1]",
                i,
                leverage[i]
            );
        }
    }

    #[test]
    fn test_leverage_sum_equals_rank() {
        let x = Mat::from_fn(
            30,
            3,
            |i, j| match j {
                0 => 1.0,
                1 => i as f64,
                _ => (i as f64).sin(),
            },
        );
        let leverage = compute_leverage(&x).unwrap();

        let sum: f64 = leverage.iter().sum();
        assert!((sum - 3.0).abs() < 1e-8, "Sum of leverage {} should be 3", sum);
    }

    #[test]
    fn test_single_column_leverage() {
        // h_i = x_i² / Σ x²
        let x = Mat::from_fn(4, 1, |i, _| (i + 1) as f64);
        let leverage = compute_leverage(&x).unwrap();

        for i in 0..4 {
            let xi = (i + 1) as f64;
            assert!((leverage[i] - xi * xi / 30.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_collinear_columns_do_not_fail() {
        let x = Mat::from_fn(10, 3, |i, j| match j {
            0 => i as f64,
            1 => i as f64 * 2.0,
            _ => (i as f64).sin(),
        });

        let leverage = compute_leverage(&x).unwrap();
        let sum: f64 = leverage.iter().sum();

        // Rank is 2, not 3
        assert!((sum - 2.0).abs() < 1e-8, "Sum {} should be close to 2", sum);
    }

    #[test]
    fn test_n_equals_rank_gives_unit_leverage() {
        let x = Mat::from_fn(3, 3, |i, j| if i == j { 2.0 } else { (i + j) as f64 * 0.1 });
        let leverage = compute_leverage(&x).unwrap();
        for i in 0..3 {
            assert!((leverage[i] - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_high_leverage_detection() {
        let mut x = Mat::from_fn(20, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
        x[(19, 1)] = 100.0;

        let leverage = compute_leverage(&x).unwrap();
        let high = high_leverage_points(&leverage, 2, None);

        assert!(
            high.contains(&19),
            "Point 19 should be flagged as high leverage"
        );
    }

    #[test]
    fn test_high_leverage_points_custom_threshold() {
        let mut leverage = Col::from_fn(20, |_| 0.1);
        leverage[18] = 0.3;
        leverage[19] = 0.3;

        let high = high_leverage_points(&leverage, 3, Some(0.25));

        assert_eq!(high, vec![18, 19]);
    }

    #[test]
    fn test_high_leverage_points_none() {
        let leverage = Col::from_fn(100, |_| 0.01);
        let high = high_leverage_points(&leverage, 3, None);
        assert!(high.is_empty());
    }
}
