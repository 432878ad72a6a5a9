//! Cook's distance outlier detector.

use super::error::DetectorError;
use super::lifecycle::{label_scores, PercentileThreshold, ScoreProcessor};
use super::threshold::resolve_threshold;
use super::validation::{validate_matrix, validate_target};
use crate::core::{CooksDistanceOptions, CooksDistanceOptionsBuilder};
use crate::diagnostics::{influence_scores, InfluenceReport};
use crate::solvers::{FittedOls, OlsRegressor, Regressor};
use crate::transform::{PcaWhitening, WhiteningError};
use crate::utils::{count_classes, split_target};
use faer::{Col, Mat};
use std::borrow::Cow;

/// Outlier detector scoring each observation by its Cook's distance.
///
/// Fitting optionally PCA-whitens the features, fits an OLS model of `y` on
/// them, and scores every training observation by how strongly it pulls the
/// fit (leverage) combined with how badly it is fit (studentized residual).
/// The decision threshold is either the `(1 - contamination)` quantile of the
/// training scores or the rule-of-thumb cutoff `4 / n`.
///
/// # Input shapes
///
/// `fit` takes features and target separately. Every scoring method instead
/// takes a single matrix whose **last column is the target** and whose
/// leading columns are the features.
///
/// # Example
///
/// ```rust,ignore
/// use cooks_outlier::prelude::*;
///
/// let mut detector = CooksDistanceDetector::builder()
///     .whitening(false)
///     .rule_of_thumb(true)
///     .build()?;
///
/// detector.fit(&x, &y)?;
/// println!("threshold = {}", detector.threshold()?);
///
/// let scores = detector.decision_function(&append_target(&x_new, &y_new))?;
/// ```
#[derive(Debug, Clone)]
pub struct CooksDistanceDetector<P = PercentileThreshold> {
    options: CooksDistanceOptions,
    processor: P,
    state: Option<FittedCooksState>,
}

/// Everything a successful fit produces.
#[derive(Debug, Clone)]
pub struct FittedCooksState {
    whitening: Option<PcaWhitening>,
    model: FittedOls,
    n_features: usize,
    n_classes: usize,
    decision_scores: Col<f64>,
    threshold: f64,
    labels: Vec<u8>,
    contamination: f64,
    score_range: (f64, f64),
}

impl FittedCooksState {
    /// Whitening learned at fit time, if enabled.
    pub fn whitening(&self) -> Option<&PcaWhitening> {
        self.whitening.as_ref()
    }

    /// Linear model fit on the (whitened) training features.
    pub fn model(&self) -> &FittedOls {
        &self.model
    }

    /// Number of raw feature columns seen at fit.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of distinct target values seen at fit.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Cook's distance of every training observation.
    pub fn decision_scores(&self) -> &Col<f64> {
        &self.decision_scores
    }

    /// Cutoff on the score scale.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Training labels: 1 = outlier.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Effective contamination after threshold resolution.
    pub fn contamination(&self) -> f64 {
        self.contamination
    }
}

impl CooksDistanceDetector {
    /// Create a detector with the default percentile threshold processing.
    pub fn new(options: CooksDistanceOptions) -> Result<Self, DetectorError> {
        Self::with_processor(options, PercentileThreshold)
    }

    /// Create a builder for configuring the detector.
    pub fn builder() -> CooksDistanceDetectorBuilder {
        CooksDistanceDetectorBuilder::default()
    }
}

impl Default for CooksDistanceDetector {
    fn default() -> Self {
        Self {
            options: CooksDistanceOptions::default(),
            processor: PercentileThreshold,
            state: None,
        }
    }
}

impl<P: ScoreProcessor> CooksDistanceDetector<P> {
    /// Create a detector that derives contamination-mode thresholds with
    /// `processor`.
    pub fn with_processor(options: CooksDistanceOptions, processor: P) -> Result<Self, DetectorError> {
        options.validate()?;
        Ok(Self {
            options,
            processor,
            state: None,
        })
    }

    /// Options this detector was built with.
    pub fn options(&self) -> &CooksDistanceOptions {
        &self.options
    }

    /// Whether `fit` has completed successfully.
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted state, if any.
    pub fn state(&self) -> Option<&FittedCooksState> {
        self.state.as_ref()
    }

    /// Whitening learned at fit time; `None` inside the `Ok` when disabled.
    pub fn whitening_state(&self) -> Result<Option<&PcaWhitening>, DetectorError> {
        Ok(self.fitted()?.whitening())
    }

    /// Linear model fit on the (whitened) training features.
    pub fn model(&self) -> Result<&FittedOls, DetectorError> {
        Ok(self.fitted()?.model())
    }

    fn fitted(&self) -> Result<&FittedCooksState, DetectorError> {
        self.state.as_ref().ok_or(DetectorError::NotFitted)
    }

    /// Fit the detector on features `x` (n × p) and target `y` (length n).
    ///
    /// Replaces any previous fitted state. On error the previous state is
    /// kept.
    pub fn fit(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<&mut Self, DetectorError> {
        validate_matrix(x, "X")?;
        validate_target(y, x.nrows())?;
        self.options.validate()?;

        let n_classes = count_classes(y);

        let whitening = if self.options.whitening {
            Some(PcaWhitening::fit(x)?)
        } else {
            None
        };
        let x_fit = apply_whitening(whitening.as_ref(), x)?;

        let model = OlsRegressor::builder()
            .with_intercept(true)
            .build()
            .fit(&x_fit, y)?;

        let report = influence_scores(&x_fit, y, &model)?;
        let decision_scores = report.distances;

        if decision_scores.iter().any(|d| !d.is_finite()) {
            tracing::warn!(
                n_non_finite = decision_scores.iter().filter(|d| !d.is_finite()).count(),
                "Cook's distance is undefined for some training observations"
            );
        }

        let decision = resolve_threshold(
            self.options.threshold_mode(),
            &decision_scores,
            &self.processor,
        );
        let score_range = finite_range(&decision_scores);

        tracing::debug!(
            n_samples = x.nrows(),
            n_features = x.ncols(),
            whitening = self.options.whitening,
            threshold = decision.threshold,
            contamination = decision.contamination,
            "fitted Cook's distance detector"
        );

        self.state = Some(FittedCooksState {
            whitening,
            model,
            n_features: x.ncols(),
            n_classes,
            decision_scores,
            threshold: decision.threshold,
            labels: decision.labels,
            contamination: decision.contamination,
            score_range,
        });

        Ok(self)
    }

    /// Fit on `(x, y)` and return the training labels.
    pub fn fit_predict(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<Vec<u8>, DetectorError> {
        self.fit(x, y)?;
        Ok(self.fitted()?.labels.clone())
    }

    /// Full influence breakdown of new data under the fitted model.
    ///
    /// `x_with_target` holds the features in its leading columns and the
    /// target in its last column.
    pub fn influence(&self, x_with_target: &Mat<f64>) -> Result<InfluenceReport, DetectorError> {
        let state = self.fitted()?;
        validate_matrix(x_with_target, "X_with_target")?;

        let expected = state.n_features + 1;
        if x_with_target.ncols() != expected {
            return Err(DetectorError::Shape {
                name: "X_with_target",
                expected: format!("{expected} columns (features + target)"),
                got: format!("{} columns", x_with_target.ncols()),
            });
        }

        let (x, y) = split_target(x_with_target).ok_or_else(|| DetectorError::Shape {
            name: "X_with_target",
            expected: "at least 2 columns".to_string(),
            got: format!("{} columns", x_with_target.ncols()),
        })?;

        let x_fit = apply_whitening(state.whitening.as_ref(), &x)?;
        Ok(influence_scores(&x_fit, &y, &state.model)?)
    }

    /// Raw Cook's distance of new observations under the fitted model.
    ///
    /// `x_with_target` holds the features in its leading columns and the
    /// target in its last column. The stored whitening and model are reused
    /// as-is; nothing is refit and no threshold is applied.
    pub fn decision_function(&self, x_with_target: &Mat<f64>) -> Result<Col<f64>, DetectorError> {
        Ok(self.influence(x_with_target)?.distances)
    }

    /// Alias for [`decision_function`](Self::decision_function).
    pub fn score(&self, x_with_target: &Mat<f64>) -> Result<Col<f64>, DetectorError> {
        self.decision_function(x_with_target)
    }

    /// Binary outlier labels for new data using the fitted threshold.
    pub fn predict(&self, x_with_target: &Mat<f64>) -> Result<Vec<u8>, DetectorError> {
        let threshold = self.fitted()?.threshold;
        let scores = self.decision_function(x_with_target)?;
        Ok(label_scores(&scores, threshold))
    }

    /// Outlier probability of new data, min-max scaled against the training
    /// score range and clipped to [0, 1].
    pub fn predict_proba(&self, x_with_target: &Mat<f64>) -> Result<Col<f64>, DetectorError> {
        let (lo, hi) = self.fitted()?.score_range;
        let scores = self.decision_function(x_with_target)?;
        let span = hi - lo;

        Ok(Col::from_fn(scores.nrows(), |i| {
            if span > 0.0 {
                ((scores[i] - lo) / span).clamp(0.0, 1.0)
            } else {
                0.0
            }
        }))
    }

    /// Cook's distance of every training observation.
    pub fn decision_scores(&self) -> Result<&Col<f64>, DetectorError> {
        Ok(&self.fitted()?.decision_scores)
    }

    /// Decision threshold on the score scale.
    pub fn threshold(&self) -> Result<f64, DetectorError> {
        Ok(self.fitted()?.threshold)
    }

    /// Training labels: 1 = outlier.
    pub fn labels(&self) -> Result<&[u8], DetectorError> {
        Ok(&self.fitted()?.labels)
    }

    /// Effective contamination.
    ///
    /// Before fitting this is the configured value. After fitting in
    /// rule-of-thumb mode it is the fraction of training scores above 4 / n.
    pub fn contamination(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(self.options.contamination, |s| s.contamination)
    }

    /// Number of distinct target values seen at fit.
    pub fn n_classes(&self) -> Result<usize, DetectorError> {
        Ok(self.fitted()?.n_classes)
    }
}

fn apply_whitening<'a>(
    whitening: Option<&PcaWhitening>,
    x: &'a Mat<f64>,
) -> Result<Cow<'a, Mat<f64>>, WhiteningError> {
    match whitening {
        Some(w) => Ok(Cow::Owned(w.transform(x)?)),
        None => Ok(Cow::Borrowed(x)),
    }
}

/// Min and max over the finite entries.
fn finite_range(scores: &Col<f64>) -> (f64, f64) {
    scores
        .iter()
        .filter(|s| s.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        })
}

/// Builder for `CooksDistanceDetector`.
#[derive(Debug, Clone, Default)]
pub struct CooksDistanceDetectorBuilder {
    builder: CooksDistanceOptionsBuilder,
}

impl CooksDistanceDetectorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to whiten the features before fitting.
    pub fn whitening(mut self, enabled: bool) -> Self {
        self.builder = self.builder.whitening(enabled);
        self
    }

    /// Set the expected fraction of outliers, in (0, 0.5).
    pub fn contamination(mut self, contamination: f64) -> Self {
        self.builder = self.builder.contamination(contamination);
        self
    }

    /// Use the 4 / n rule of thumb as the threshold.
    pub fn rule_of_thumb(mut self, enabled: bool) -> Self {
        self.builder = self.builder.rule_of_thumb(enabled);
        self
    }

    /// Build the detector, validating the options.
    pub fn build(self) -> Result<CooksDistanceDetector, DetectorError> {
        CooksDistanceDetector::new(self.builder.build()?)
    }
}
