//! Error types for the helios-select crate.

use helios_arimax::Order;

/// Error type for all fallible operations in the helios-select crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectError {
    /// Returned when a manually supplied order is outside the configured
    /// bounds.
    #[error("invalid order {order}: {reason}")]
    InvalidOrder {
        /// The rejected order.
        order: Order,
        /// Which bound was violated.
        reason: String,
    },

    /// Returned when the stepwise search cannot fit a single candidate.
    ///
    /// Deliberately not recoverable by a default order: the caller decides
    /// whether to fall back to manual selection.
    #[error("order search failed: none of {tried} candidate orders could be fitted")]
    SearchFailed {
        /// Number of candidate orders attempted.
        tried: usize,
    },
}
