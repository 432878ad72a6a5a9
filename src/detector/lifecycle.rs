//! Score-to-label processing shared by outlier detectors.

use crate::utils::percentile;
use faer::Col;

/// Threshold and binary labels derived from a vector of outlier scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedScores {
    /// Cutoff on the score scale.
    pub threshold: f64,
    /// 1 where the score is strictly above `threshold`, else 0.
    pub labels: Vec<u8>,
}

/// Turns raw training scores into a threshold and labels.
///
/// Detectors hold one of these and call it once per fit, after their scores
/// are computed.
pub trait ScoreProcessor {
    /// Derive the threshold and labels for `scores` given the expected
    /// outlier fraction.
    fn process_scores(&self, scores: &Col<f64>, contamination: f64) -> ProcessedScores;
}

/// Threshold at the `(1 - contamination)` percentile of the scores.
///
/// The percentile is linearly interpolated between ranks. A NaN score makes
/// the threshold NaN, in which case every label is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PercentileThreshold;

impl ScoreProcessor for PercentileThreshold {
    fn process_scores(&self, scores: &Col<f64>, contamination: f64) -> ProcessedScores {
        let values: Vec<f64> = scores.iter().copied().collect();
        let threshold = percentile(&values, 1.0 - contamination);
        ProcessedScores {
            threshold,
            labels: label_scores(scores, threshold),
        }
    }
}

/// Label each score: 1 if strictly above `threshold`, else 0.
pub fn label_scores(scores: &Col<f64>, threshold: f64) -> Vec<u8> {
    scores.iter().map(|&s| u8::from(s > threshold)).collect()
}
