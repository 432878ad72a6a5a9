//! Diagnostics integration tests.

mod common;

use approx::assert_relative_eq;
use cooks_outlier::diagnostics::{
    compute_leverage, cooks_distance, cooks_distance_cdf, high_leverage_points, influence_scores,
    influential_points, residual_mse, studentized_residuals,
};
use cooks_outlier::solvers::{OlsRegressor, Regressor};
use cooks_outlier::utils::matrix_rank;
use faer::{Col, Mat};

// ============================================================================
// Leverage Tests
// ============================================================================

#[test]
fn test_leverage_on_generated_data() {
    let (x, _, _) = common::generate_linear_data(50, 3, 0.0, 0.1, 13);
    let leverage = compute_leverage(&x).unwrap();

    for i in 0..50 {
        assert!(
            leverage[i] >= -1e-12 && leverage[i] <= 1.0 + 1e-12,
            "Leverage[{}] = {} should be in [0, 1]",
            i,
            leverage[i]
        );
    }
    let sum: f64 = leverage.iter().sum();
    assert_relative_eq!(sum, 3.0, epsilon = 1e-8);
}

#[test]
fn test_leverage_ignores_intercept() {
    // Without an intercept column, a centered design and its shifted copy differ
    let x = Mat::from_fn(6, 1, |i, _| i as f64 - 2.5);
    let shifted = Mat::from_fn(6, 1, |i, _| i as f64 + 10.0);

    let a = compute_leverage(&x).unwrap();
    let b = compute_leverage(&shifted).unwrap();

    assert!((0..6).any(|i| (a[i] - b[i]).abs() > 1e-3));
}

#[test]
fn test_leverage_on_collinear_data() {
    let (x, _) = common::generate_collinear_data(15);
    let leverage = compute_leverage(&x).unwrap();
    let rank = matrix_rank(&x).unwrap();

    assert_eq!(rank, 2);
    let sum: f64 = leverage.iter().sum();
    assert_relative_eq!(sum, rank as f64, epsilon = 1e-8);
}

#[test]
fn test_high_leverage_flags_planted_point() {
    let (x, _, idx) = common::generate_data_with_outlier(40, 6);
    let leverage = compute_leverage(&x).unwrap();

    assert!(high_leverage_points(&leverage, 2, None).contains(&idx));
}

// ============================================================================
// Cook's Distance Tests
// ============================================================================

#[test]
fn test_cooks_distance_matches_hand_computation() {
    let x = Mat::from_fn(5, 1, |i, _| [1.0, 2.0, 3.0, 4.0, 10.0][i]);
    let y = Col::from_fn(5, |i| [1.0, 2.0, 3.0, 4.0, 50.0][i]);
    let model = OlsRegressor::default().fit(&x, &y).unwrap();

    let report = influence_scores(&x, &y, &model).unwrap();

    // Residuals of y ≈ 5.8x − 11.2
    let expected_residuals = [6.4, 1.6, -3.2, -8.0, 3.2];
    for i in 0..5 {
        assert_relative_eq!(report.residuals[i], expected_residuals[i], epsilon = 1e-9);
        assert_relative_eq!(report.leverage[i], x[(i, 0)] * x[(i, 0)] / 130.0, epsilon = 1e-12);
    }
    assert_relative_eq!(report.mse, 32.0, epsilon = 1e-9);

    // D_i = e_i² h_i / (p · mse · (1 − h_i)²)
    for i in 0..5 {
        let e = expected_residuals[i];
        let h = x[(i, 0)] * x[(i, 0)] / 130.0;
        let expected = e * e * h / (32.0 * (1.0 - h) * (1.0 - h));
        assert_relative_eq!(report.distances[i], expected, epsilon = 1e-8, max_relative = 1e-8);
    }
}

#[test]
fn test_cooks_distance_from_parts_matches_report() {
    let (x, y, _) = common::generate_linear_data(30, 2, 1.0, 0.5, 31);
    let model = OlsRegressor::default().fit(&x, &y).unwrap();
    let report = influence_scores(&x, &y, &model).unwrap();

    let leverage = compute_leverage(&x).unwrap();
    let mse = residual_mse(&report.residuals, report.df);
    let studentized = studentized_residuals(&report.residuals, &leverage, mse);
    let distances = cooks_distance(&studentized, &leverage, 2);

    for i in 0..30 {
        assert_relative_eq!(distances[i], report.distances[i], epsilon = 1e-12, max_relative = 1e-9);
    }
}

#[test]
fn test_cooks_distance_non_negative() {
    let (x, y) = common::generate_correlated_data(40, 19);
    let model = OlsRegressor::default().fit(&x, &y).unwrap();
    let report = influence_scores(&x, &y, &model).unwrap();

    assert!(report.df > 0);
    for i in 0..40 {
        assert!(report.distances[i] >= 0.0, "D[{}] = {}", i, report.distances[i]);
    }
}

#[test]
fn test_influential_points_flags_planted_outlier() {
    let (x, y, idx) = common::generate_data_with_outlier(50, 23);
    let model = OlsRegressor::default().fit(&x, &y).unwrap();
    let report = influence_scores(&x, &y, &model).unwrap();

    let flagged = influential_points(&report.distances, None);
    assert!(flagged.contains(&idx));

    let cdf = report.f_cdf(2);
    assert!(cdf[idx] > 0.5, "planted point F-cdf {}", cdf[idx]);
}

#[test]
fn test_collinear_design_keeps_finite_scores() {
    let (x, y) = common::generate_collinear_data(20);
    let model = OlsRegressor::default().fit(&x, &y).unwrap();
    let report = influence_scores(&x, &y, &model).unwrap();

    assert_eq!(report.rank, 2);
    assert_eq!(report.df, 18);
    assert!(report.distances.iter().all(|d| d.is_finite()));
}

#[test]
fn test_cdf_is_monotone() {
    let cooks = Col::from_fn(5, |i| i as f64 * 0.5);
    let cdf = cooks_distance_cdf(&cooks, 3, 20);

    for i in 1..5 {
        assert!(cdf[i] > cdf[i - 1]);
    }
}
