//! # helios-forecast
//!
//! Scenario-driven forecast serving. The service reads whatever artifact
//! the registry has promoted, projects the exogenous driver forward at a
//! scenario growth rate (optimistic / moderate / pessimistic around a
//! pluggable baseline), and returns per-year point estimates with 95%
//! confidence bounds by default.
//!
//! No active model means an error, never a silent default.

mod error;
mod scenario;
mod service;

pub use error::ForecastError;
pub use scenario::{GrowthBaseline, Scenario};
pub use service::{Forecast, ForecastConfig, ForecastEntry, ForecastService};
