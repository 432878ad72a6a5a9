//! Cook's distance outlier detector and the score processing it is built on.

mod cooks;
mod error;
mod lifecycle;
mod threshold;
mod validation;

pub use cooks::{CooksDistanceDetector, CooksDistanceDetectorBuilder, FittedCooksState};
pub use error::DetectorError;
pub use lifecycle::{label_scores, PercentileThreshold, ProcessedScores, ScoreProcessor};
pub use threshold::{resolve_threshold, ThresholdDecision, RULE_OF_THUMB_NUMERATOR};
pub use validation::{validate_matrix, validate_target};
