//! Seeded pseudo-random generator for posterior-predictive sampling.
//!
//! This module provides [`SamplingRng`], a PRNG wrapper that draws
//! transition-probability vectors from a Dirichlet posterior and simulated
//! release outcomes from a multinomial.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Dirichlet, Distribution};

use crate::error::AllocationError;

/// Random number generator for Monte Carlo trials.
///
/// Wraps [`StdRng`] and records the seed it was initialised with, so that
/// any allocation can be reproduced by passing the same seed again.
///
/// # Examples
///
/// ```rust
/// use connectivity_allocator::rng::SamplingRng;
///
/// let mut rng = SamplingRng::from_seed(42);
///
/// let p = rng.gen_dirichlet(&[1.0, 2.0, 3.0]).unwrap();
/// assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
///
/// let outcome = rng.gen_multinomial(10, &p).unwrap();
/// assert_eq!(outcome.iter().sum::<u64>(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct SamplingRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl SamplingRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// The same seed always produces the same sequence of draws.
    ///
    /// ```rust
    /// use connectivity_allocator::rng::SamplingRng;
    ///
    /// let mut rng1 = SamplingRng::from_seed(12345);
    /// let mut rng2 = SamplingRng::from_seed(12345);
    /// assert_eq!(rng1.next_seed(), rng2.next_seed());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator from a fresh operating-system seed.
    ///
    /// The seed is still recorded and available through [`seed`](Self::seed).
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a seed for an independent child stream.
    ///
    /// Each Monte Carlo trial runs on its own generator seeded this way, so
    /// trials never share generator state.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Draws a probability vector from `Dirichlet(alpha)`.
    ///
    /// A single-component `alpha` yields `[1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Sampling`] if `alpha` is empty or contains
    /// a non-positive concentration.
    pub fn gen_dirichlet(&mut self, alpha: &[f64]) -> Result<Vec<f64>, AllocationError> {
        match alpha {
            [] => Err(AllocationError::Sampling(
                "Dirichlet concentration vector is empty".to_string(),
            )),
            [a] if *a > 0.0 => Ok(vec![1.0]),
            [a] => Err(AllocationError::Sampling(format!(
                "Dirichlet concentration {} is not positive",
                a
            ))),
            _ => {
                let dirichlet =
                    Dirichlet::new(alpha).map_err(|e| AllocationError::Sampling(e.to_string()))?;
                Ok(dirichlet.sample(&mut self.inner))
            }
        }
    }

    /// Draws how `n` particles distribute over categories with
    /// probabilities `p`.
    ///
    /// Uses the conditional-binomial decomposition: category `j` receives
    /// `Binomial(remaining, p_j / remaining_mass)` particles and the last
    /// category takes whatever is left, so the result always sums to `n`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Sampling`] if `p` is empty.
    pub fn gen_multinomial(&mut self, n: u64, p: &[f64]) -> Result<Vec<u64>, AllocationError> {
        let Some(last) = p.len().checked_sub(1) else {
            return Err(AllocationError::Sampling(
                "multinomial probability vector is empty".to_string(),
            ));
        };

        let mut outcome = vec![0; p.len()];
        let mut remaining = n;
        let mut mass: f64 = p.iter().sum();

        for (j, &pj) in p.iter().enumerate().take(last) {
            if remaining == 0 {
                break;
            }
            let q = if mass > 0.0 {
                (pj / mass).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let draw = Binomial::new(remaining, q)
                .map_err(|e| AllocationError::Sampling(e.to_string()))?
                .sample(&mut self.inner);
            outcome[j] = draw;
            remaining -= draw;
            mass -= pj;
        }
        outcome[last] += remaining;
        Ok(outcome)
    }
}
