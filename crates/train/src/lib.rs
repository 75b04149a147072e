//! # helios-train
//!
//! Turns an aligned dataset and a chosen order into a [`TrainingRun`]:
//! chronological train/test split, a deadline-bounded evaluation fit
//! scored on the held-out window, residual diagnostics, and a full-sample
//! refit that becomes the served artifact on promotion.
//!
//! Estimation and the artifact are two distinct fits sharing one order —
//! held-out metrics always describe a model that never saw the test
//! years.

mod error;
mod fitter;
mod run;

pub use error::TrainError;
pub use fitter::{fit, SplitSpec};
pub use run::{DatasetSummary, SplitSummary, TrainingRun};
