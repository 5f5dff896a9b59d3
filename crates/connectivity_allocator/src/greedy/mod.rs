//! Greedy minimax allocation of a release batch.
//!
//! # Algorithm
//!
//! ```text
//! if no particle has been observed anywhere:
//!     split n uniformly, remainder to the first origins
//! else:
//!     prior[j]    = obj_fn_cv(j)                      (current counts)
//!     expected[j] = E[obj_fn_cv(j) | one more release]
//!     repeat until n particles are placed:
//!         max_cost[j]     = max(prior[j], expected[j])
//!         release_cost[j] = max(expected[j], max_cost[k] for k != j)
//!         j* = argmin release_cost, ties -> larger prior
//!         allocation[j*] += block
//!         prior[j*]    = expected[j*]
//!         expected[j*] = E[obj_fn_cv(j*) | allocation[j*] + block]
//! ```
//!
//! Only the chosen origin's estimates are refreshed after each step.

mod allocator;
mod state;

pub use allocator::{uniform_allocation, AllocateExt, Allocation, AllocationMode, GreedyAllocator};
pub use state::{select_release_site, OriginCost, ReleaseChoice};
