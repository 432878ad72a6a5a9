//! Utility functions for matrix operations and score statistics.

mod matrix;
mod stats;

pub use matrix::{
    append_target, as_column_matrix, center_columns, center_vector, detect_constant_columns,
    matrix_rank, pseudo_inverse, split_target, LinalgError, ThinSvd, DEFAULT_RCOND,
};
pub use stats::{count_classes, fraction_above, percentile};
