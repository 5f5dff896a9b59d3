//! Monte Carlo sampling configuration.

use super::error::ConfigError;

/// Number of posterior-predictive trials per expected-cost estimate.
pub const DEFAULT_TRIALS: usize = 250;

/// Maximum number of trials allowed per estimate.
pub const MAX_TRIALS: usize = 1_000_000;

/// Sampling configuration for the posterior estimator and allocator.
///
/// Immutable once built. Use [`SamplingConfigBuilder`] to construct
/// instances, or [`SamplingConfig::default`] for 250 trials with an
/// entropy-derived seed.
///
/// # Examples
///
/// ```rust
/// use connectivity_allocator::mc::SamplingConfig;
///
/// let config = SamplingConfig::builder()
///     .n_trials(500)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 500);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Number of Monte Carlo trials per estimate.
    n_trials: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            n_trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Returns the number of trials per estimate.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTrialCount` if `n_trials` is 0 or
    /// greater than 1,000,000.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        Ok(())
    }
}

/// Builder for [`SamplingConfig`].
#[derive(Clone, Debug, Default)]
pub struct SamplingConfigBuilder {
    n_trials: Option<usize>,
    seed: Option<u64>,
}

impl SamplingConfigBuilder {
    /// Sets the number of trials per estimate, in [1, 1_000_000].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_trials` is out of range.
    pub fn build(self) -> Result<SamplingConfig, ConfigError> {
        let config = SamplingConfig {
            n_trials: self.n_trials.unwrap_or(DEFAULT_TRIALS),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
