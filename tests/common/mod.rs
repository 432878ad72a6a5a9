//! Common test utilities and data generators.
#![allow(dead_code)]

use faer::{Col, Mat};

/// Deterministic uniform values in [-1, 1) from a 64-bit LCG.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    }
}

/// Generate simple linear data: y = x * beta + intercept + noise
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);

    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);
    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);

    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.next();
            yi += x[(i, j)] * true_coefficients[j];
        }
        yi += noise_std * rng.next();
        y[i] = yi;
    }

    (x, y, true_coefficients)
}

/// Linear data on features of very different scales with correlated columns.
pub fn generate_correlated_data(n_samples: usize, seed: u64) -> (Mat<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);

    let mut x = Mat::zeros(n_samples, 3);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        let a = rng.next();
        let b = rng.next();
        x[(i, 0)] = 100.0 * a + 500.0;
        x[(i, 1)] = 0.01 * (a + 0.5 * b);
        x[(i, 2)] = rng.next() * 3.0;
        y[i] = 2.0 + 0.05 * x[(i, 0)] - 40.0 * x[(i, 1)] + x[(i, 2)] + 0.2 * rng.next();
    }

    (x, y)
}

/// Linear data with one planted point far out in both x and y.
///
/// Returns the index of the planted point.
pub fn generate_data_with_outlier(n_samples: usize, seed: u64) -> (Mat<f64>, Col<f64>, usize) {
    let (mut x, mut y, _) = generate_linear_data(n_samples, 2, 1.0, 0.1, seed);
    let idx = n_samples / 2;
    x[(idx, 0)] = 6.0;
    x[(idx, 1)] = -5.0;
    y[idx] = 40.0;
    (x, y, idx)
}

/// Generate data with collinear features.
pub fn generate_collinear_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let mut x = Mat::zeros(n_samples, 3);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        x[(i, 0)] = i as f64;
        x[(i, 1)] = 2.0 * i as f64; // Perfectly collinear with x0
        x[(i, 2)] = (i * i) as f64;
        y[i] = 1.0 + 2.0 * x[(i, 0)] + 3.0 * x[(i, 2)] + (i as f64).sin();
    }

    (x, y)
}

/// Number of entries equal to 1.
pub fn count_outliers(labels: &[u8]) -> usize {
    labels.iter().filter(|&&l| l == 1).count()
}
