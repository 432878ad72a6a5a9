//! Input checks run before any computation.

use super::error::DetectorError;
use faer::{Col, Mat};

/// Check that `x` is a non-empty matrix of finite values.
pub fn validate_matrix(x: &Mat<f64>, name: &'static str) -> Result<(), DetectorError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(DetectorError::EmptyInput {
            name,
            nrows: x.nrows(),
            ncols: x.ncols(),
        });
    }

    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            if !x[(i, j)].is_finite() {
                return Err(DetectorError::NonFinite { name });
            }
        }
    }

    Ok(())
}

/// Check that `y` is finite and has one entry per observation.
pub fn validate_target(y: &Col<f64>, n_samples: usize) -> Result<(), DetectorError> {
    if y.nrows() != n_samples {
        return Err(DetectorError::Shape {
            name: "y",
            expected: format!("{n_samples} elements"),
            got: format!("{} elements", y.nrows()),
        });
    }

    if y.iter().any(|v| !v.is_finite()) {
        return Err(DetectorError::NonFinite { name: "y" });
    }

    Ok(())
}
