//! # helios-evaluate
//!
//! Forecast accuracy metrics (MAPE, RMSE, MAE, R²) over a held-out
//! chronological window, plus advisory residual diagnostics (Ljung-Box
//! white-noise test, Jarque-Bera normality test).
//!
//! Diagnostics never gate anything here: they are computed, attached to
//! the model record, and left for promotion decisions downstream.

mod diagnostics;
mod error;
mod metrics;

pub use diagnostics::{diagnostics, ResidualDiagnostics};
pub use error::EvaluateError;
pub use metrics::{accuracy, Metrics};
