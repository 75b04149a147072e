//! # helios-io
//!
//! Strict CSV ingestion of named yearly series. One public entry point,
//! [`read_series`], which returns a
//! [`helios_series::ObservationSeries`] ready for alignment.

mod error;
mod read;

pub use error::IoError;
pub use read::read_series;
