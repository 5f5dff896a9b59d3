//! Shared types for the connectivity layer.

pub mod error;

pub use error::ConnectivityError;

/// Count type for observed particle transitions.
///
/// Unsigned so that negative observations cannot be represented at all.
pub type Count = u64;

/// Row-major `origins x destinations` matrix of counts.
pub type CountMatrix = Vec<Vec<Count>>;
