//! # connectivity_allocator: Adaptive Release Allocation
//!
//! ## Layer 2 (Engine) Role
//!
//! Decides how many particles to release from each origin in the next batch
//! so as to shrink the worst relative uncertainty of the estimated
//! transition probabilities:
//! - Seeded posterior sampling (`rng::SamplingRng`)
//! - Monte Carlo expected-objective estimator (`mc::PosteriorEstimator`)
//! - Greedy minimax allocator (`greedy::GreedyAllocator`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use connectivity_allocator::{AllocateExt, GreedyAllocator, SamplingConfig};
//! use connectivity_core::ConnectivityMatrix;
//!
//! let mut matrix = ConnectivityMatrix::new(["1", "2", "3"], ["North", "South", "Other"]).unwrap();
//! matrix.update(&[vec![2, 1, 30], vec![12, 9, 40], vec![0, 3, 8]]).unwrap();
//!
//! let config = SamplingConfig::builder().n_trials(100).seed(2024).build().unwrap();
//! let mut allocator = GreedyAllocator::new(config);
//!
//! let batch = matrix.allocate_with(&mut allocator, 20, 1).unwrap();
//! assert_eq!(batch.counts.iter().sum::<u64>(), 20);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Run Monte Carlo trials on the rayon thread pool
//! - `serde`: Enable serialisation for `Allocation` and `SamplingConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod greedy;
pub mod mc;
pub mod rng;

pub use error::AllocationError;
pub use greedy::{AllocateExt, Allocation, AllocationMode, GreedyAllocator};
pub use mc::{ObjectiveScope, PosteriorEstimator, SamplingConfig};
pub use rng::SamplingRng;
