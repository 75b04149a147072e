//! # helios-registry
//!
//! Model staging over versioned artifacts.
//!
//! ## Lifecycle
//!
//! ```mermaid
//! graph LR
//!     A["register(run)"] --> B["candidate"]
//!     B -->|"activate(id, actor)"| C["active (at most one)"]
//!     C -->|"next activation"| D["archived"]
//!     B -->|"delete(id)"| E["gone"]
//! ```
//!
//! Every successful training run registers as a candidate; activation
//! archives the previous active record and atomically promotes the
//! candidate's artifact to the canonical alias the forecast service
//! reads. Candidates can be deleted; active and archived records cannot.

mod artifact;
mod error;
mod record;
mod registry;

pub use artifact::{fingerprint, ArtifactPayload, ArtifactStore};
pub use error::RegistryError;
pub use record::{ModelRecord, ModelStatus};
pub use registry::Registry;
