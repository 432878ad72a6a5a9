//! Order statistics over score vectors.

use faer::Col;

/// Percentile of `values` at fraction `q` in [0, 1], linearly interpolated
/// between the two nearest ranks.
///
/// Any NaN in the input makes the result NaN. An empty input yields NaN.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    if weight == 0.0 || lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * weight
    }
}

/// Fraction of entries strictly greater than `cutoff`.
pub fn fraction_above(values: &Col<f64>, cutoff: f64) -> f64 {
    let n = values.nrows();
    if n == 0 {
        return 0.0;
    }
    values.iter().filter(|&&v| v > cutoff).count() as f64 / n as f64
}

/// Number of distinct values in `y`.
pub fn count_classes(y: &Col<f64>) -> usize {
    let mut values: Vec<f64> = y.iter().copied().collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values.len()
}
