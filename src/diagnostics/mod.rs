//! Regression influence diagnostics (leverage, studentized residuals, Cook's distance).
//!
//! - **Leverage**: diagonal of the hat matrix, computed through the pseudo-inverse
//! - **Residuals**: residual mean square and internally studentized residuals
//! - **Influence**: Cook's distance and its position in the F distribution
//!
//! # Example
//!
//! ```rust,ignore
//! use cooks_outlier::diagnostics::{influence_scores, influential_points};
//!
//! // After fitting a model on x
//! let report = influence_scores(&x, &y, &fitted)?;
//! let influential = influential_points(&report.distances, None);
//! ```

mod influence;
mod leverage;
mod residuals;

pub use influence::{
    cooks_distance, cooks_distance_cdf, influence_scores, influential_points, InfluenceReport,
};
pub use leverage::{compute_leverage, high_leverage_points};
pub use residuals::{residual_mse, studentized_residuals};
