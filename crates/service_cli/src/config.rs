//! Study file loading and run configuration
//!
//! A study file is TOML:
//!
//! ```toml
//! origins = ["1", "2", "3"]
//! destinations = ["Mid-Maine", "Three States", "Mass Bay", "Nantucket", "Other"]
//! counts = [
//!     [5, 3, 15, 2, 142],
//!     [0, 1, 30, 1, 135],
//!     [0, 0, 57, 2, 107],
//! ]
//!
//! [objective]
//! delta = 0.005
//! pi = 0.05
//!
//! [sampling]
//! trials = 250
//! seed = 42
//! block_size = 1
//! ```
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Study file
//! 4. Default values
//!
//! Clap resolves the first two; [`build_study`] layers the result over the file.

use std::path::Path;
use std::str::FromStr;

use connectivity_allocator::SamplingConfig;
use connectivity_core::objective::{DEFAULT_DELTA, DEFAULT_PI};
use connectivity_core::{ConnectivityMatrix, Count, CountMatrix};
use serde::Deserialize;

use crate::{CliError, Result};

/// Default particles per greedy step
pub const DEFAULT_BLOCK_SIZE: Count = 1;

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            ))),
        }
    }
}

/// `[objective]` section of a study file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectiveSection {
    /// Minimum posterior mean for a cell to count
    pub delta: Option<f64>,
    /// Minimum posterior probability of exceeding `delta`
    pub pi: Option<f64>,
}

/// `[sampling]` section of a study file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingSection {
    /// Monte Carlo trials per expected-cost estimate
    pub trials: Option<usize>,
    /// Random seed
    pub seed: Option<u64>,
    /// Particles per greedy step
    pub block_size: Option<Count>,
}

/// Parsed study file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyFile {
    /// Release site identifiers
    pub origins: Vec<String>,
    /// Settlement site identifiers
    pub destinations: Vec<String>,
    /// Observed arrivals so far (origins x destinations); omitted means none
    #[serde(default)]
    pub counts: Option<CountMatrix>,
    #[serde(default)]
    pub objective: ObjectiveSection,
    #[serde(default)]
    pub sampling: SamplingSection,
}

impl StudyFile {
    /// Load a study from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for StudyFile {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CliError::Parse(e.to_string()))
    }
}

/// Values taken from CLI flags or their environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub delta: Option<f64>,
    pub pi: Option<f64>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub block_size: Option<Count>,
}

/// Fully resolved study: populated matrix plus sampling settings
#[derive(Debug, Clone)]
pub struct Study {
    pub matrix: ConnectivityMatrix,
    pub sampling: SamplingConfig,
    pub block_size: Count,
}

/// Build a study from a file and overrides
pub fn build_study(file: &StudyFile, overrides: &Overrides) -> Result<Study> {
    let mut matrix = ConnectivityMatrix::new(file.origins.iter(), file.destinations.iter())?;

    let delta = overrides
        .delta
        .or(file.objective.delta)
        .unwrap_or(DEFAULT_DELTA);
    let pi = overrides.pi.or(file.objective.pi).unwrap_or(DEFAULT_PI);
    matrix.set_obj_fn_cv_args(delta, pi)?;

    if let Some(counts) = &file.counts {
        matrix.update(counts)?;
    }

    let sampling = SamplingConfig::builder()
        .maybe_seed(overrides.seed.or(file.sampling.seed));
    let sampling = match overrides.trials.or(file.sampling.trials) {
        Some(trials) => sampling.n_trials(trials),
        None => sampling,
    }
    .build()?;

    let block_size = overrides
        .block_size
        .or(file.sampling.block_size)
        .unwrap_or(DEFAULT_BLOCK_SIZE);
    if block_size == 0 {
        return Err(CliError::InvalidArgument(
            "block_size must be at least 1".to_string(),
        ));
    }

    Ok(Study {
        matrix,
        sampling,
        block_size,
    })
}

/// Load and resolve a study in one step
pub fn load_study(path: &Path, overrides: &Overrides) -> Result<Study> {
    let file = StudyFile::from_file(path)?;
    build_study(&file, overrides)
}
