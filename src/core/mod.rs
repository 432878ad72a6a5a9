//! Core types for the detector and its regression model.

mod options;
mod result;

pub use options::{
    CooksDistanceOptions, CooksDistanceOptionsBuilder, OptionsError, ThresholdMode,
    MAX_CONTAMINATION,
};
pub use result::RegressionResult;
