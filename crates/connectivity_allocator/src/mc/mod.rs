//! Monte Carlo estimation of the posterior-expected objective.
//!
//! # Architecture
//!
//! ```text
//! PosteriorEstimator
//! ├── SamplingConfig  (trial count, seed)
//! ├── SamplingRng     (parent stream, one child seed per trial)
//! └── Trial
//!     ├── p ~ Dirichlet(counts[i] + 1)
//!     ├── c ~ Multinomial(n, p)
//!     └── objective(counts with c added to row i)
//! ```
//!
//! With the `parallel` feature the trials of one estimate run on the rayon
//! thread pool. Child seeds are drawn up front and trial values are summed
//! in trial order, so a fixed seed gives identical estimates with and
//! without the feature.

pub mod config;
pub mod error;
pub mod estimator;

pub use config::{SamplingConfig, SamplingConfigBuilder, DEFAULT_TRIALS, MAX_TRIALS};
pub use error::ConfigError;
pub use estimator::{ObjectiveScope, PosteriorEstimator};
