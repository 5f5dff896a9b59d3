//! Error types for connectivity matrix construction and updates.

use thiserror::Error;

/// Errors raised at the boundary of a [`ConnectivityMatrix`].
///
/// Every variant is reported before any state is touched, so a rejected
/// call leaves the matrix exactly as it was.
///
/// # Examples
/// ```
/// use connectivity_core::types::ConnectivityError;
///
/// let err = ConnectivityError::ShapeMismatch {
///     expected_rows: 3,
///     expected_cols: 5,
///     rows: 2,
///     cols: 5,
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Shape mismatch: expected 3x5 counts, got 2x5"
/// );
/// ```
///
/// [`ConnectivityMatrix`]: crate::ConnectivityMatrix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectivityError {
    /// An origin or destination list was empty.
    #[error("Empty {0} list: at least one site is required")]
    EmptySiteList(&'static str),

    /// A site identifier appears more than once in the same list.
    #[error("Duplicate {kind} site: '{name}'")]
    DuplicateSite {
        /// Either "origin" or "destination".
        kind: &'static str,
        /// The repeated identifier.
        name: String,
    },

    /// An update matrix does not match the configured dimensions.
    #[error("Shape mismatch: expected {expected_rows}x{expected_cols} counts, got {rows}x{cols}")]
    ShapeMismatch {
        /// Number of configured origins.
        expected_rows: usize,
        /// Number of configured destinations.
        expected_cols: usize,
        /// Rows supplied by the caller.
        rows: usize,
        /// Columns supplied by the caller (first offending row).
        cols: usize,
    },

    /// An origin index or name does not exist in this matrix.
    #[error("Unknown origin: {0}")]
    UnknownOrigin(String),

    /// A parameter lies outside its admissible range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectivityError::EmptySiteList("origin");
        assert!(err.to_string().contains("Empty origin list"));

        let err = ConnectivityError::DuplicateSite {
            kind: "destination",
            name: "Other".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate destination site: 'Other'");

        let err = ConnectivityError::UnknownOrigin("7".to_string());
        assert_eq!(err.to_string(), "Unknown origin: 7");

        let err = ConnectivityError::InvalidParameter {
            name: "delta",
            value: "1.5 is outside [0, 1]".to_string(),
        };
        assert!(err.to_string().contains("delta"));
        assert!(err.to_string().contains("outside [0, 1]"));
    }
}
