//! # connectivity_core: Count Matrix and Objective for Connectivity Studies
//!
//! ## Layer 1 (Foundation) Role
//!
//! connectivity_core is the bottom layer of the workspace, providing:
//! - The accumulated origin → destination count matrix (`ConnectivityMatrix`)
//! - Beta marginals of the Dirichlet posterior (`objective::PosteriorCell`)
//! - The coefficient-of-variation objective and its thresholds (`objective`)
//! - Error types: `ConnectivityError` (`types::error`)
//!
//! The Monte Carlo estimator and the allocation engine live in
//! `connectivity_allocator`, which builds on this crate.
//!
//! ## Usage Examples
//!
//! ```rust
//! use connectivity_core::ConnectivityMatrix;
//!
//! let mut matrix = ConnectivityMatrix::new(
//!     ["1", "2", "3"],
//!     ["Mid-Maine", "Three States", "Mass Bay", "Nantucket", "Other"],
//! )
//! .unwrap();
//!
//! matrix
//!     .update(&[
//!         vec![5, 3, 15, 2, 142],
//!         vec![0, 1, 30, 1, 135],
//!         vec![0, 0, 57, 2, 107],
//!     ])
//!     .unwrap();
//!
//! let worst = matrix.obj_fn_cv();
//! let per_origin = matrix.origin_costs();
//! assert!(per_origin.iter().all(|&c| c <= worst));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ObjectiveParams` and `PosteriorCell`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod matrix;
pub mod objective;
pub mod types;

pub use matrix::ConnectivityMatrix;
pub use objective::{ObjectiveParams, PosteriorCell};
pub use types::{ConnectivityError, Count, CountMatrix};
