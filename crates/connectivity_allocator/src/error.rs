//! Error types for the allocation engine.

use connectivity_core::ConnectivityError;
use thiserror::Error;

/// Allocation engine error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// The matrix rejected an operation (unknown origin, bad shape).
    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    /// Block size must be at least one particle.
    #[error("Invalid block size {0}: must be at least 1")]
    InvalidBlockSize(u64),

    /// A sampling distribution could not be constructed.
    #[error("Sampling failed: {0}")]
    Sampling(String),
}
