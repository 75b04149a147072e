//! # helios-arimax
//!
//! ARIMAX(p,d,q) model fitting and forecasting via state-space
//! maximum likelihood (Kalman filter), with one exogenous regressor.
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaxSpec::new(order)"] -->|".fit(&y, &exog)?"| B["ArimaxFit"]
//!     B --> C[".forecast(steps, &future_exog)"]
//!     B --> D[".get_forecast(steps, &future_exog, alpha)"]
//!     B --> E[".aic() — Akaike Information Criterion"]
//!     B --> F[".residuals() — one-step prediction errors"]
//! ```
//!
//! ## Model Form
//!
//! Regression with ARMA errors: both series are differenced `d` times,
//! the differenced target is regressed on an intercept and the differenced
//! exogenous driver, and the regression errors follow an ARMA(p,q) process
//! estimated by exact Gaussian MLE.
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | beta | [`ArimaxFit::beta()`] | regression intercept and slope |
//! | phi | [`ArimaxFit::ar()`] | AR coefficients: weights on past errors |
//! | theta | [`ArimaxFit::ma()`] | MA coefficients: weights on past shocks |
//! | sigma2 | [`ArimaxFit::sigma2()`] | innovation (white-noise) variance |
//! | AIC | [`ArimaxFit::aic()`] | Akaike Information Criterion (lower = better) |

mod error;
mod fit;
mod order;
mod spec;

pub(crate) mod diff;
pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod regression;
pub(crate) mod small_linalg;

pub use error::ArimaxError;
pub use fit::{ArimaxFit, ForecastBands};
pub use order::Order;
pub use spec::ArimaxSpec;
