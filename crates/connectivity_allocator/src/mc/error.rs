//! Error types for Monte Carlo sampling configuration.

use std::fmt;

/// Configuration error for the posterior estimator.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Trial count outside valid range [1, 1_000_000].
    InvalidTrialCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrialCount(count) => {
                write!(
                    f,
                    "Invalid trial count {}: must be in range [1, 1_000_000]",
                    count
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
