//! Detector error type.

use crate::core::OptionsError;
use crate::solvers::RegressionError;
use crate::transform::WhiteningError;
use thiserror::Error;

/// Errors that can occur while configuring, fitting or scoring a detector.
#[derive(Debug, Error, PartialEq)]
pub enum DetectorError {
    #[error("{name} is empty ({nrows}x{ncols})")]
    EmptyInput {
        name: &'static str,
        nrows: usize,
        ncols: usize,
    },

    #[error("shape mismatch for {name}: expected {expected}, got {got}")]
    Shape {
        name: &'static str,
        expected: String,
        got: String,
    },

    #[error("{name} contains non-finite values")]
    NonFinite { name: &'static str },

    #[error("detector is not fitted; call `fit` before scoring")]
    NotFitted,

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("whitening failed: {0}")]
    Whitening(#[from] WhiteningError),

    #[error("regression failed: {0}")]
    Regression(#[from] RegressionError),
}
