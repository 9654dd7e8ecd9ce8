//! Error types for cutting plan optimization.

use thiserror::Error;

use crate::model::PartId;

/// Result type alias for cutlist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or optimizing a cut list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid length, kerf, quantity or identifier supplied.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A part that no stock piece, supplied or synthesized, can ever hold.
    #[error(
        "Part {part_id} ({length} mm) is longer than the default stock length ({default_stock_length} mm)"
    )]
    UnplaceablePart {
        /// ID of the offending part.
        part_id: PartId,
        /// Length of the offending part.
        length: f64,
        /// Default stock length used for overflow pieces.
        default_stock_length: f64,
    },
}

impl Error {
    /// Creates an [`Error::InvalidInput`] from any message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Checks that `value` is a finite number strictly greater than zero.
pub(crate) fn ensure_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{what} must be a positive number, got {value}"
        )))
    }
}

/// Checks that `value` is a finite number greater than or equal to zero.
pub(crate) fn ensure_non_negative(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{what} must be zero or a positive number, got {value}"
        )))
    }
}
