//! Greedy minimax batch allocation.

use connectivity_core::{ConnectivityMatrix, Count};
use tracing::{debug, info};

use super::state::{select_release_site, OriginCost};
use crate::error::AllocationError;
use crate::mc::{ObjectiveScope, PosteriorEstimator, SamplingConfig};
use crate::rng::SamplingRng;

/// How an allocation was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocationMode {
    /// No observations yet: particles spread uniformly over origins.
    ColdStart,
    /// Sequential minimax choice using Monte Carlo cost estimates.
    Greedy,
}

/// Per-origin release counts for one batch.
///
/// `projected_costs[i]` is the objective estimate of origin `i` once its
/// allocated particles have been observed: the Monte Carlo estimate for
/// origins that received particles, the current objective otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Particles to release from each origin, in origin order.
    pub counts: Vec<Count>,
    /// Allocation mode.
    pub mode: AllocationMode,
    /// Estimated per-origin objective after the batch.
    pub projected_costs: Vec<f64>,
    /// Number of greedy steps taken (0 for a cold start).
    pub steps: usize,
}

impl Allocation {
    /// Total particles allocated.
    pub fn total(&self) -> Count {
        self.counts.iter().sum()
    }

    /// Worst projected objective across origins.
    pub fn projected_objective(&self) -> f64 {
        self.projected_costs.iter().cloned().fold(0.0, f64::max)
    }
}

impl From<Allocation> for Vec<Count> {
    fn from(allocation: Allocation) -> Self {
        allocation.counts
    }
}

/// Splits `n` particles evenly over `n_origins`, giving the remainder one
/// each to the first origins.
///
/// ```rust
/// use connectivity_allocator::greedy::uniform_allocation;
///
/// assert_eq!(uniform_allocation(10, 3), vec![4, 3, 3]);
/// assert_eq!(uniform_allocation(2, 4), vec![1, 1, 0, 0]);
/// ```
pub fn uniform_allocation(n: Count, n_origins: usize) -> Vec<Count> {
    if n_origins == 0 {
        return Vec::new();
    }
    let base = n / n_origins as Count;
    let remainder = (n % n_origins as Count) as usize;
    (0..n_origins)
        .map(|i| base + Count::from(i < remainder))
        .collect()
}

/// Greedy minimax allocator.
///
/// Owns the sampling configuration and the random stream used by the
/// Monte Carlo estimator. All per-origin cost state lives inside a single
/// [`allocate`](Self::allocate) call; nothing carries over between batches
/// except the random stream.
///
/// # Examples
///
/// ```rust
/// use connectivity_allocator::greedy::GreedyAllocator;
/// use connectivity_allocator::mc::SamplingConfig;
/// use connectivity_core::ConnectivityMatrix;
///
/// let mut matrix = ConnectivityMatrix::new(["1", "2", "3"], ["A", "B", "Other"]).unwrap();
/// let config = SamplingConfig::builder().n_trials(50).seed(42).build().unwrap();
/// let mut allocator = GreedyAllocator::new(config);
///
/// // No data yet: uniform split.
/// let first = allocator.allocate(&matrix, 10, 1).unwrap();
/// assert_eq!(first.counts, vec![4, 3, 3]);
///
/// matrix.update(&[vec![1, 2, 30], vec![10, 10, 20], vec![0, 1, 3]]).unwrap();
/// let second = allocator.allocate(&matrix, 12, 1).unwrap();
/// assert_eq!(second.total(), 12);
/// ```
#[derive(Clone, Debug)]
pub struct GreedyAllocator {
    config: SamplingConfig,
    estimator: PosteriorEstimator,
    rng: SamplingRng,
}

impl GreedyAllocator {
    /// Creates an allocator, seeding its generator from `config.seed()` or
    /// from entropy when no seed is configured.
    pub fn new(config: SamplingConfig) -> Self {
        let rng = config
            .seed()
            .map_or_else(SamplingRng::from_entropy, SamplingRng::from_seed);
        Self::with_rng(config, rng)
    }

    /// Creates an allocator drawing from the supplied generator.
    pub fn with_rng(config: SamplingConfig, rng: SamplingRng) -> Self {
        let estimator = PosteriorEstimator::new(&config);
        Self {
            config,
            estimator,
            rng,
        }
    }

    /// Sampling configuration.
    #[inline]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Seed of the allocator's random stream.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Allocates a batch of `n` particles over the matrix's origins.
    ///
    /// Particles are assigned `block_size` at a time (the final block may be
    /// smaller). The returned counts are in origin order and sum to `n`.
    /// The matrix is only read.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidBlockSize`] if `block_size == 0`
    /// - [`AllocationError::Sampling`] if a posterior draw fails
    pub fn allocate(
        &mut self,
        matrix: &ConnectivityMatrix,
        n: Count,
        block_size: Count,
    ) -> Result<Allocation, AllocationError> {
        if block_size == 0 {
            return Err(AllocationError::InvalidBlockSize(block_size));
        }
        let n_origins = matrix.n_origins();

        if matrix.total_count() == 0 {
            info!(n, n_origins, "no observations yet, allocating uniformly");
            return Ok(Allocation {
                counts: uniform_allocation(n, n_origins),
                mode: AllocationMode::ColdStart,
                projected_costs: matrix.origin_costs(),
                steps: 0,
            });
        }

        let mut counts = vec![0; n_origins];
        if n == 0 {
            return Ok(Allocation {
                counts,
                mode: AllocationMode::Greedy,
                projected_costs: matrix.origin_costs(),
                steps: 0,
            });
        }

        info!(
            n,
            block_size,
            n_origins,
            n_trials = self.estimator.n_trials(),
            seed = self.rng.seed(),
            "allocating batch"
        );

        // Lookaheads are sized to the release they stand for, so the final
        // partial block is ranked on the particles it actually carries.
        let first_release = block_size.min(n);
        let mut costs = Vec::with_capacity(n_origins);
        for origin in 0..n_origins {
            let prior = matrix.obj_fn_cv_origin(origin);
            let expected = self.expected(matrix, origin, first_release)?;
            costs.push(OriginCost::new(prior, expected));
        }

        let mut remaining = n;
        let mut steps = 0;
        while remaining > 0 {
            let Some(choice) = select_release_site(&costs) else {
                break;
            };
            let release = block_size.min(remaining);
            let origin = choice.origin;
            counts[origin] += release;
            remaining -= release;
            steps += 1;

            costs[origin].prior = costs[origin].expected;
            if remaining > 0 {
                let next_release = block_size.min(remaining);
                costs[origin].expected =
                    self.expected(matrix, origin, counts[origin] + next_release)?;
            }

            debug!(
                step = steps,
                origin = %matrix.origins()[origin],
                release,
                release_cost = choice.release_cost,
                remaining,
                "release site selected"
            );
        }

        let allocation = Allocation {
            counts,
            mode: AllocationMode::Greedy,
            projected_costs: costs.iter().map(|c| c.prior).collect(),
            steps,
        };
        info!(
            steps,
            projected_objective = allocation.projected_objective(),
            counts = ?allocation.counts,
            "batch allocated"
        );
        Ok(allocation)
    }

    fn expected(
        &mut self,
        matrix: &ConnectivityMatrix,
        origin: usize,
        n: Count,
    ) -> Result<f64, AllocationError> {
        self.estimator
            .expected_cost(matrix, origin, n, ObjectiveScope::Origin, &mut self.rng)
    }
}

/// Allocation entry points on [`ConnectivityMatrix`].
pub trait AllocateExt {
    /// Allocates `n` particles in blocks of `block_size` with the default
    /// sampling configuration (250 trials, entropy seed).
    fn allocate(&self, n: Count, block_size: Count) -> Result<Vec<Count>, AllocationError>;

    /// Allocates with a caller-owned allocator (fixed seed, custom trials).
    fn allocate_with(
        &self,
        allocator: &mut GreedyAllocator,
        n: Count,
        block_size: Count,
    ) -> Result<Allocation, AllocationError>;
}

impl AllocateExt for ConnectivityMatrix {
    fn allocate(&self, n: Count, block_size: Count) -> Result<Vec<Count>, AllocationError> {
        let mut allocator = GreedyAllocator::new(SamplingConfig::default());
        allocator.allocate(self, n, block_size).map(Vec::from)
    }

    fn allocate_with(
        &self,
        allocator: &mut GreedyAllocator,
        n: Count,
        block_size: Count,
    ) -> Result<Allocation, AllocationError> {
        allocator.allocate(self, n, block_size)
    }
}
