//! Connectivity CLI - Release planning for sequential connectivity studies
//!
//! Operational entry point for the connectivity allocation library.
//!
//! # Commands
//!
//! - `connectivity allocate <study> -n <particles>` - Allocate the next release batch
//! - `connectivity objective <study>` - Report the CV objective per origin
//! - `connectivity check <study>` - Validate a study file
//!
//! # Architecture
//!
//! As the **S**ervice layer on top of `connectivity_core` and
//! `connectivity_allocator`, this crate loads study files, applies CLI and
//! environment overrides, and owns the tracing subscriber.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use connectivity_core::Count;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{LogLevel, Overrides};
pub use error::{CliError, Result};

/// Connectivity study release allocation CLI
#[derive(Parser)]
#[command(name = "connectivity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(long, global = true, env = "CONNECTIVITY_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Objective threshold overrides
#[derive(Args, Debug, Default)]
struct ObjectiveArgs {
    /// Minimum posterior mean for a cell to count
    #[arg(long, env = "CONNECTIVITY_DELTA")]
    delta: Option<f64>,

    /// Minimum posterior probability that a cell exceeds delta
    #[arg(long, env = "CONNECTIVITY_PI")]
    pi: Option<f64>,
}

/// Sampling overrides
#[derive(Args, Debug, Default)]
struct SamplingArgs {
    /// Monte Carlo trials per expected-cost estimate
    #[arg(short, long, env = "CONNECTIVITY_TRIALS")]
    trials: Option<usize>,

    /// Random seed for reproducible allocations
    #[arg(short, long, env = "CONNECTIVITY_SEED")]
    seed: Option<u64>,

    /// Particles assigned per greedy step
    #[arg(short, long, env = "CONNECTIVITY_BLOCK_SIZE")]
    block_size: Option<Count>,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate the next batch of released particles over origins
    Allocate {
        /// Path to study file (TOML)
        study: PathBuf,

        /// Number of particles in the batch
        #[arg(short = 'n', long)]
        particles: Count,

        #[command(flatten)]
        sampling: SamplingArgs,

        #[command(flatten)]
        objective: ObjectiveArgs,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Report the CV objective of the current observations
    Objective {
        /// Path to study file (TOML)
        study: PathBuf,

        /// Include per-destination posterior summaries
        #[arg(long)]
        cells: bool,

        #[command(flatten)]
        objective: ObjectiveArgs,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate a study file
    Check {
        /// Path to study file (TOML)
        study: PathBuf,

        #[command(flatten)]
        sampling: SamplingArgs,

        #[command(flatten)]
        objective: ObjectiveArgs,
    },
}

fn overrides(sampling: &SamplingArgs, objective: &ObjectiveArgs) -> Overrides {
    Overrides {
        delta: objective.delta,
        pi: objective.pi,
        trials: sampling.trials,
        seed: sampling.seed,
        block_size: sampling.block_size,
    }
}

/// Install the subscriber. An explicit level wins over RUST_LOG.
fn init_tracing(log_level: Option<LogLevel>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level.as_filter_str()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().as_filter_str())),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().map(str::parse).transpose()?;
    init_tracing(log_level);

    match cli.command {
        Commands::Allocate {
            study,
            particles,
            sampling,
            objective,
            format,
        } => commands::allocate::run(&study, particles, &overrides(&sampling, &objective), &format),
        Commands::Objective {
            study,
            cells,
            objective,
            format,
        } => commands::objective::run(
            &study,
            &overrides(&SamplingArgs::default(), &objective),
            cells,
            &format,
        ),
        Commands::Check {
            study,
            sampling,
            objective,
        } => commands::check::run(&study, &overrides(&sampling, &objective)),
    }
}
