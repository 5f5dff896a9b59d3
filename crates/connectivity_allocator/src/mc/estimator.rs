//! Posterior-predictive estimate of the objective after further releases.
//!
//! For origin `i` and `n` additional particles, each trial
//!
//! 1. draws `p ~ Dirichlet(counts[i][.] + 1)` from the current posterior,
//! 2. draws `c ~ Multinomial(n, p)` as the simulated arrivals,
//! 3. adds `c` to row `i` of a private snapshot of the counts,
//! 4. evaluates the objective on that snapshot.
//!
//! The estimate is the mean over trials. Every trial owns its generator
//! (seeded from the caller's stream) and its snapshot, so trials are
//! independent of each other and of the real matrix.

use connectivity_core::objective::origin_cv;
use connectivity_core::{ConnectivityError, ConnectivityMatrix, Count};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use super::config::SamplingConfig;
use crate::error::AllocationError;
use crate::rng::SamplingRng;

/// Which objective a trial evaluates on its hypothetical matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObjectiveScope {
    /// Objective of the origin that received the particles.
    #[default]
    Origin,
    /// Matrix-wide objective (maximum over all origins).
    Matrix,
}

/// Monte Carlo estimator of `E[objective | n more particles from origin i]`.
///
/// # Examples
///
/// ```rust
/// use connectivity_allocator::mc::{ObjectiveScope, PosteriorEstimator, SamplingConfig};
/// use connectivity_allocator::rng::SamplingRng;
/// use connectivity_core::ConnectivityMatrix;
///
/// let mut matrix = ConnectivityMatrix::new(["a", "b"], ["x", "y", "z"]).unwrap();
/// matrix.update(&[vec![3, 1, 9], vec![0, 4, 4]]).unwrap();
///
/// let config = SamplingConfig::builder().n_trials(100).build().unwrap();
/// let estimator = PosteriorEstimator::new(&config);
/// let mut rng = SamplingRng::from_seed(42);
///
/// let expected = estimator
///     .expected_cost(&matrix, 0, 50, ObjectiveScope::Origin, &mut rng)
///     .unwrap();
/// assert!(expected < matrix.obj_fn_cv_origin(0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PosteriorEstimator {
    n_trials: usize,
}

impl PosteriorEstimator {
    /// Creates an estimator running `config.n_trials()` trials per estimate.
    pub fn new(config: &SamplingConfig) -> Self {
        Self {
            n_trials: config.n_trials(),
        }
    }

    /// Number of trials per estimate.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Expected objective after releasing `n` more particles from `origin`.
    ///
    /// With `n == 0` the current objective is returned without sampling.
    /// The real matrix is only read.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::Connectivity`] if `origin` does not exist
    /// - [`AllocationError::Sampling`] if a distribution cannot be built
    pub fn expected_cost(
        &self,
        matrix: &ConnectivityMatrix,
        origin: usize,
        n: Count,
        scope: ObjectiveScope,
        rng: &mut SamplingRng,
    ) -> Result<f64, AllocationError> {
        let row = matrix
            .row(origin)
            .ok_or_else(|| ConnectivityError::UnknownOrigin(origin.to_string()))?;

        if n == 0 {
            return Ok(evaluate(matrix, origin, scope));
        }

        let alpha: Vec<f64> = row.iter().map(|&c| c as f64 + 1.0).collect();
        let seeds: Vec<u64> = (0..self.n_trials).map(|_| rng.next_seed()).collect();
        let trial = |seed: &u64| {
            run_trial(
                matrix,
                origin,
                row,
                &alpha,
                n,
                scope,
                &mut SamplingRng::from_seed(*seed),
            )
        };

        #[cfg(feature = "parallel")]
        let values: Vec<f64> = seeds.par_iter().map(trial).collect::<Result<_, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let values: Vec<f64> = seeds.iter().map(trial).collect::<Result<_, _>>()?;

        // Summed in trial order so the result does not depend on scheduling.
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        trace!(origin, n, ?scope, trials = values.len(), mean, "expected cost estimated");
        Ok(mean)
    }
}

fn evaluate(matrix: &ConnectivityMatrix, origin: usize, scope: ObjectiveScope) -> f64 {
    match scope {
        ObjectiveScope::Origin => matrix.obj_fn_cv_origin(origin),
        ObjectiveScope::Matrix => matrix.obj_fn_cv(),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_trial(
    matrix: &ConnectivityMatrix,
    origin: usize,
    row: &[Count],
    alpha: &[f64],
    n: Count,
    scope: ObjectiveScope,
    rng: &mut SamplingRng,
) -> Result<f64, AllocationError> {
    let p = rng.gen_dirichlet(alpha)?;
    let arrivals = rng.gen_multinomial(n, &p)?;

    match scope {
        ObjectiveScope::Origin => {
            // Only row `origin` changes, so a row snapshot suffices.
            let hypothetical: Vec<Count> = row
                .iter()
                .zip(&arrivals)
                .map(|(count, added)| count.saturating_add(*added))
                .collect();
            Ok(origin_cv(&hypothetical, &matrix.objective_params()))
        }
        ObjectiveScope::Matrix => {
            let mut hypothetical = matrix.clone();
            hypothetical.update_row(origin, &arrivals)?;
            Ok(hypothetical.obj_fn_cv())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn estimator(n_trials: usize) -> PosteriorEstimator {
        let config = SamplingConfig::builder().n_trials(n_trials).build().unwrap();
        PosteriorEstimator::new(&config)
    }

    fn sample_matrix() -> ConnectivityMatrix {
        let mut matrix = ConnectivityMatrix::new(["a", "b"], ["x", "y", "z"]).unwrap();
        matrix.update(&[vec![3, 1, 9], vec![40, 20, 60]]).unwrap();
        matrix
    }

    #[test]
    fn test_zero_particles_is_current_cost() {
        let matrix = sample_matrix();
        let mut rng = SamplingRng::from_seed(1);
        let est = estimator(50);

        let origin = est
            .expected_cost(&matrix, 0, 0, ObjectiveScope::Origin, &mut rng)
            .unwrap();
        assert_eq!(origin, matrix.obj_fn_cv_origin(0));

        let whole = est
            .expected_cost(&matrix, 0, 0, ObjectiveScope::Matrix, &mut rng)
            .unwrap();
        assert_eq!(whole, matrix.obj_fn_cv());
    }

    #[test]
    fn test_real_matrix_untouched() {
        let matrix = sample_matrix();
        let before = matrix.clone();
        let mut rng = SamplingRng::from_seed(2);
        estimator(100)
            .expected_cost(&matrix, 1, 500, ObjectiveScope::Matrix, &mut rng)
            .unwrap();
        assert_eq!(matrix, before);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let matrix = sample_matrix();
        let est = estimator(200);
        let a = est
            .expected_cost(
                &matrix,
                0,
                10,
                ObjectiveScope::Origin,
                &mut SamplingRng::from_seed(9),
            )
            .unwrap();
        let b = est
            .expected_cost(
                &matrix,
                0,
                10,
                ObjectiveScope::Origin,
                &mut SamplingRng::from_seed(9),
            )
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_particles_lower_expected_cost() {
        let matrix = sample_matrix();
        let est = estimator(250);
        let mut rng = SamplingRng::from_seed(3);

        let few = est
            .expected_cost(&matrix, 0, 5, ObjectiveScope::Origin, &mut rng)
            .unwrap();
        let many = est
            .expected_cost(&matrix, 0, 1000, ObjectiveScope::Origin, &mut rng)
            .unwrap();
        assert!(many < few);
        assert!(many < matrix.obj_fn_cv_origin(0));
    }

    #[test]
    fn test_origin_scope_matches_matrix_scope_for_single_origin() {
        let mut matrix = ConnectivityMatrix::new(["only"], ["x", "y"]).unwrap();
        matrix.update(&[vec![2, 5]]).unwrap();
        let est = estimator(64);

        let origin = est
            .expected_cost(
                &matrix,
                0,
                20,
                ObjectiveScope::Origin,
                &mut SamplingRng::from_seed(4),
            )
            .unwrap();
        let whole = est
            .expected_cost(
                &matrix,
                0,
                20,
                ObjectiveScope::Matrix,
                &mut SamplingRng::from_seed(4),
            )
            .unwrap();
        assert_relative_eq!(origin, whole, epsilon = 1e-15);
    }

    #[test]
    fn test_unknown_origin() {
        let matrix = sample_matrix();
        let result = estimator(10).expected_cost(
            &matrix,
            5,
            1,
            ObjectiveScope::Origin,
            &mut SamplingRng::from_seed(0),
        );
        assert!(matches!(
            result,
            Err(AllocationError::Connectivity(ConnectivityError::UnknownOrigin(_)))
        ));
    }
}
