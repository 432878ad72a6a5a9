//! Decision threshold resolution.

use super::lifecycle::{label_scores, ScoreProcessor};
use crate::core::ThresholdMode;
use crate::utils::fraction_above;
use faer::Col;

/// Influence cutoff numerator for the rule of thumb (4 / n).
pub const RULE_OF_THUMB_NUMERATOR: f64 = 4.0;

/// Outcome of resolving a threshold over the training scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdDecision {
    pub threshold: f64,
    pub labels: Vec<u8>,
    /// Contamination in effect after resolution. Equals the configured value
    /// in contamination mode; in rule-of-thumb mode it is the observed
    /// fraction of scores above 4 / n.
    pub contamination: f64,
}

/// Derive threshold, labels and effective contamination from training scores.
pub fn resolve_threshold<P: ScoreProcessor>(
    mode: ThresholdMode,
    scores: &Col<f64>,
    processor: &P,
) -> ThresholdDecision {
    match mode {
        ThresholdMode::Contamination(contamination) => {
            let processed = processor.process_scores(scores, contamination);
            ThresholdDecision {
                threshold: processed.threshold,
                labels: processed.labels,
                contamination,
            }
        }
        ThresholdMode::RuleOfThumb => {
            let threshold = RULE_OF_THUMB_NUMERATOR / scores.nrows() as f64;
            ThresholdDecision {
                threshold,
                labels: label_scores(scores, threshold),
                contamination: fraction_above(scores, threshold),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::lifecycle::{PercentileThreshold, ProcessedScores};

    #[test]
    fn test_rule_of_thumb_threshold() {
        let scores = Col::from_fn(8, |i| [0.1, 0.9, 0.2, 0.5, 0.3, 0.0, 0.6, 0.4][i]);
        let decision = resolve_threshold(ThresholdMode::RuleOfThumb, &scores, &PercentileThreshold);

        assert_eq!(decision.threshold, 0.5);
        assert_eq!(decision.labels, vec![0, 1, 0, 0, 0, 0, 1, 0]);
        assert!((decision.contamination - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_contamination_mode_keeps_configured_fraction() {
        let scores = Col::from_fn(10, |i| i as f64);
        let decision = resolve_threshold(
            ThresholdMode::Contamination(0.1),
            &scores,
            &PercentileThreshold,
        );

        assert!((decision.threshold - 8.1).abs() < 1e-12);
        assert_eq!(decision.labels.iter().filter(|&&l| l == 1).count(), 1);
        assert_eq!(decision.contamination, 0.1);
    }

    struct FixedThreshold(f64);

    impl ScoreProcessor for FixedThreshold {
        fn process_scores(&self, scores: &Col<f64>, _contamination: f64) -> ProcessedScores {
            ProcessedScores {
                threshold: self.0,
                labels: label_scores(scores, self.0),
            }
        }
    }

    #[test]
    fn test_contamination_mode_delegates_to_processor() {
        let scores = Col::from_fn(4, |i| i as f64);
        let decision = resolve_threshold(
            ThresholdMode::Contamination(0.3),
            &scores,
            &FixedThreshold(0.5),
        );
        assert_eq!(decision.threshold, 0.5);
        assert_eq!(decision.labels, vec![0, 1, 1, 1]);
    }
}
