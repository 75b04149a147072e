//! Error types for the helios-forecast crate.

use helios_arimax::ArimaxError;
use helios_registry::RegistryError;

/// Error type for all fallible operations in the helios-forecast crate.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Returned when no model is active. There is no default model to
    /// fall back to.
    #[error("no active model: train and activate a model first")]
    NoActiveModel,

    /// Returned when the requested horizon is out of range.
    #[error("invalid horizon {horizon}: must be between 1 and {max}")]
    InvalidHorizon {
        /// The requested horizon.
        horizon: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Returned when a record is active but its promoted artifact is
    /// gone.
    #[error("active model {id} has no promoted artifact")]
    ArtifactMissing {
        /// Id of the active record.
        id: u64,
    },

    /// Returned when the exogenous history is too short to derive a
    /// baseline growth rate.
    #[error("exogenous history too short to derive growth: {n} usable observations")]
    ExogHistoryTooShort {
        /// Usable observations found.
        n: usize,
    },

    /// Registry/store failure while loading the artifact.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Estimation-engine failure while forecasting.
    #[error("forecast failed: {0}")]
    Engine(#[from] ArimaxError),
}
