//! # Random Number Generation
//!
//! Seeded sampling for the posterior-predictive Monte Carlo estimator.
//!
//! - **Reproducibility**: every generator carries its seed; the same seed
//!   reproduces the same allocation
//! - **Independence**: each trial draws from its own child generator seeded
//!   from the parent stream, so trials can run in any order or in parallel
//! - **Injectability**: the allocator takes a [`SamplingRng`] rather than a
//!   global source
//!
//! ## Usage Example
//!
//! ```rust
//! use connectivity_allocator::rng::SamplingRng;
//!
//! let mut parent = SamplingRng::from_seed(7);
//! let mut child = SamplingRng::from_seed(parent.next_seed());
//!
//! let p = child.gen_dirichlet(&[6.0, 4.0, 16.0, 3.0, 143.0]).unwrap();
//! let arrivals = child.gen_multinomial(25, &p).unwrap();
//! assert_eq!(arrivals.len(), 5);
//! ```

mod prng;

pub use prng::SamplingRng;
