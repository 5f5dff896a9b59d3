//! CLI error types

use connectivity_allocator::mc::ConfigError;
use connectivity_allocator::AllocationError;
use connectivity_core::ConnectivityError;
use thiserror::Error;

/// Errors surfaced by the `connectivity` binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse study file: {0}")]
    Parse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    #[error(transparent)]
    SamplingConfig(#[from] ConfigError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("Failed to serialise output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_pass_through() {
        let err: CliError = ConnectivityError::UnknownOrigin("9".to_string()).into();
        assert!(err.to_string().contains('9'));

        let err: CliError = AllocationError::InvalidBlockSize(0).into();
        assert!(matches!(err, CliError::Allocation(_)));
    }

    #[test]
    fn test_file_not_found_message() {
        let err = CliError::FileNotFound("study.toml".to_string());
        assert_eq!(err.to_string(), "File not found: study.toml");
    }
}
