//! Error types for pdflayout library.

use thiserror::Error;

/// Result type alias for pdflayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout analysis.
///
/// Only [`Error::LayoutAnalysis`] and [`Error::InvalidConfig`] abort work.
/// Input errors are recovered locally and surface as
/// [`Diagnostic`](crate::model::Diagnostic)s on the analyzed page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A text span has unusable geometry (non-finite, inverted or zero-area box).
    #[error("Invalid span geometry at index {index}: {reason}")]
    GeometryInput {
        /// Index of the span in the page input
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A table grid addresses cells inconsistently.
    #[error("Inconsistent table grid {table}: {reason}")]
    TableGridInput {
        /// Index of the grid in the page input
        table: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The page cannot be analyzed at all.
    #[error("Layout analysis failed on page {page}: {reason}")]
    LayoutAnalysis {
        /// Page number (1-indexed)
        page: u32,
        /// Why analysis was aborted
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Check whether this error is recovered locally rather than aborting the page.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::GeometryInput { .. } | Error::TableGridInput { .. }
        )
    }
}
