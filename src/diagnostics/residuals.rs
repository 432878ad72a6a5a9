//! Residual variance and studentized residuals.

use faer::Col;

/// Mean squared error `eᵀe / df`.
///
/// `df` is signed: zero yields inf (or NaN for a zero residual vector) and a
/// negative value yields a negative MSE, both of which propagate downstream.
pub fn residual_mse(residuals: &Col<f64>, df: i64) -> f64 {
    let rss: f64 = residuals.iter().map(|&r| r * r).sum();
    rss / df as f64
}

/// Compute internally studentized residuals: e_i / sqrt(mse) / sqrt(1 - h_ii)
///
/// Not guarded: leverage of one (or above) and non-positive MSE produce
/// inf/NaN.
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64) -> Col<f64> {
    let s = mse.sqrt();
    Col::from_fn(residuals.nrows(), |i| {
        residuals[i] / s / (1.0 - leverage[i]).sqrt()
    })
}
