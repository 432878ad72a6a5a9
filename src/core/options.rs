//! Detector options and configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper (exclusive) bound on the contamination fraction.
pub const MAX_CONTAMINATION: f64 = 0.5;

/// How the decision threshold is derived from the training scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMode {
    /// Threshold at the (1 - contamination) quantile of the training scores.
    Contamination(f64),
    /// Fixed influence cutoff of 4 / n.
    RuleOfThumb,
}

/// Configuration options for the Cook's distance detector.
///
/// The serialized form uses the same three knobs as the constructor, so a
/// detector can be configured straight from a JSON/TOML document:
///
/// ```json
/// { "whitening": true, "contamination": 0.1, "rule_of_thumb": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooksDistanceOptions {
    /// Whether to PCA-whiten the features before fitting (default: true).
    pub whitening: bool,
    /// Expected fraction of outliers, in (0, 0.5) (default: 0.1).
    pub contamination: f64,
    /// Use the 4 / n cutoff instead of the contamination quantile (default: false).
    pub rule_of_thumb: bool,
}

impl Default for CooksDistanceOptions {
    fn default() -> Self {
        Self {
            whitening: true,
            contamination: 0.1,
            rule_of_thumb: false,
        }
    }
}

/// Errors that can occur when validating detector options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("contamination must be in (0, 0.5), got {0}")]
    InvalidContamination(f64),
}

impl CooksDistanceOptions {
    /// Create a new builder for detector options.
    pub fn builder() -> CooksDistanceOptionsBuilder {
        CooksDistanceOptionsBuilder::default()
    }

    /// The threshold mode selected by these options.
    pub fn threshold_mode(&self) -> ThresholdMode {
        if self.rule_of_thumb {
            ThresholdMode::RuleOfThumb
        } else {
            ThresholdMode::Contamination(self.contamination)
        }
    }

    /// Validate the options and return an error if invalid.
    ///
    /// Contamination is checked even in rule-of-thumb mode, where it is
    /// later replaced by the observed fraction of scores above 4 / n.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.contamination > 0.0 && self.contamination < MAX_CONTAMINATION) {
            return Err(OptionsError::InvalidContamination(self.contamination));
        }
        Ok(())
    }
}

/// Builder for `CooksDistanceOptions`.
#[derive(Debug, Clone, Default)]
pub struct CooksDistanceOptionsBuilder {
    options: CooksDistanceOptions,
}

impl CooksDistanceOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to whiten the features before fitting.
    pub fn whitening(mut self, enabled: bool) -> Self {
        self.options.whitening = enabled;
        self
    }

    /// Set the expected fraction of outliers.
    pub fn contamination(mut self, contamination: f64) -> Self {
        self.options.contamination = contamination;
        self
    }

    /// Set whether to use the 4 / n rule of thumb as the threshold.
    pub fn rule_of_thumb(mut self, enabled: bool) -> Self {
        self.options.rule_of_thumb = enabled;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<CooksDistanceOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> CooksDistanceOptions {
        self.options
    }
}
