//! Error types for the helios-registry crate.

use crate::record::ModelStatus;

/// Error type for all fallible operations in the helios-registry crate.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Returned when no record has the requested id.
    #[error("model {id} not found")]
    NotFound {
        /// The missing id.
        id: u64,
    },

    /// Returned when an activation precondition fails: only candidates
    /// can be activated.
    #[error("cannot activate model {id}: status is {status}, expected candidate")]
    Activation {
        /// Target record id.
        id: u64,
        /// Its actual status.
        status: ModelStatus,
    },

    /// Returned when the artifact blob backing a record is missing, which
    /// aborts the whole activation with no status change.
    #[error("artifact for model {id} is missing")]
    ArtifactMissing {
        /// Record id whose blob is absent.
        id: u64,
    },

    /// Returned when a deletion precondition fails: only candidates can
    /// be deleted.
    #[error("cannot delete model {id}: status is {status}, only candidates can be deleted")]
    Deletion {
        /// Target record id.
        id: u64,
        /// Its actual status.
        status: ModelStatus,
    },

    /// Returned when the explicit first-activation step is not applicable.
    #[error("bootstrap failed: {reason}")]
    Bootstrap {
        /// Why the registry cannot be bootstrapped.
        reason: String,
    },

    /// Filesystem failure in the record or artifact store.
    #[error("registry I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record or artifact (de)serialization failure.
    #[error("registry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
