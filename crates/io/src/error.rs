//! Error types for helios-io.

use std::path::PathBuf;

use helios_series::SeriesError;

/// Error type for all fallible operations in the helios-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a configured column is not present in the header.
    ///
    /// No alias guessing is performed: the configured name must match the
    /// header exactly.
    #[error("column '{column}' not found in {}; available: {available}", path.display())]
    ColumnMissing {
        /// File being read.
        path: PathBuf,
        /// The configured column name.
        column: String,
        /// Comma-joined header names actually present.
        available: String,
    },

    /// Returned when a cell cannot be parsed as the expected type.
    #[error("line {line} of {}: cannot parse '{cell}' as {expected}", path.display())]
    BadCell {
        /// File being read.
        path: PathBuf,
        /// 1-based line number (header is line 1).
        line: usize,
        /// The offending cell content.
        cell: String,
        /// What the cell was expected to be.
        expected: &'static str,
    },

    /// Wraps a series-construction failure.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
