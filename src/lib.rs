//! Outlier detection with Cook's distance.
//!
//! Fits an ordinary least-squares model of a target on (optionally PCA-whitened)
//! features and flags the observations with the largest influence on that fit.
//! Influence combines leverage, the diagonal of the hat matrix computed through
//! the Moore-Penrose pseudo-inverse, with the studentized residual.
//!
//! # Example
//!
//! ```rust,ignore
//! use cooks_outlier::prelude::*;
//!
//! let mut detector = CooksDistanceDetector::builder()
//!     .whitening(true)
//!     .contamination(0.1)
//!     .build()?;
//!
//! detector.fit(&x, &y)?;
//! let labels = detector.labels()?;
//!
//! // Scoring takes the target as the last column
//! let scores = detector.decision_function(&append_target(&x_new, &y_new))?;
//! ```

pub mod core;
pub mod detector;
pub mod diagnostics;
pub mod solvers;
pub mod transform;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{CooksDistanceOptions, CooksDistanceOptionsBuilder, ThresholdMode};
    pub use crate::detector::{
        CooksDistanceDetector, CooksDistanceDetectorBuilder, DetectorError, PercentileThreshold,
        ProcessedScores, ScoreProcessor,
    };
    pub use crate::diagnostics::{
        compute_leverage, cooks_distance, influence_scores, influential_points,
        studentized_residuals, InfluenceReport,
    };
    pub use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor, Regressor};
    pub use crate::transform::PcaWhitening;
    pub use crate::utils::{append_target, as_column_matrix};
}

pub use crate::core::{CooksDistanceOptions, OptionsError, ThresholdMode};
pub use crate::detector::{CooksDistanceDetector, DetectorError};
