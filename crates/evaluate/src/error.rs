//! Error types for the helios-evaluate crate.

/// Error type for all fallible operations in the helios-evaluate crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvaluateError {
    /// Returned when an input slice is empty.
    #[error("evaluation input is empty")]
    EmptyInput,

    /// Returned when actual and predicted series differ in length.
    #[error("length mismatch: {actual} actual values, {predicted} predicted")]
    LengthMismatch {
        /// Number of actual observations.
        actual: usize,
        /// Number of predictions.
        predicted: usize,
    },

    /// Returned when an input contains NaN or infinity.
    #[error("evaluation input contains non-finite values")]
    NonFiniteInput,
}
