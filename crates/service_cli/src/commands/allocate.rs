//! Allocate command implementation
//!
//! Splits the next release batch over origins with the greedy minimax
//! allocator.

use std::fmt::Write as _;
use std::path::Path;

use connectivity_allocator::{AllocationMode, GreedyAllocator};
use connectivity_core::Count;
use serde::Serialize;
use tracing::info;

use crate::config::{load_study, OutputFormat, Overrides, Study};
use crate::Result;

/// Allocation result as printed by the CLI
#[derive(Debug, Serialize)]
pub struct AllocationReport {
    pub particles: Count,
    pub block_size: Count,
    pub n_trials: usize,
    pub seed: u64,
    pub mode: AllocationMode,
    pub objective: f64,
    pub projected_objective: f64,
    pub releases: Vec<OriginRelease>,
}

/// One origin's share of the batch
#[derive(Debug, Serialize)]
pub struct OriginRelease {
    pub origin: String,
    pub particles: Count,
    pub current_cv: f64,
    pub projected_cv: f64,
}

/// Run the allocate command
pub fn run(study: &Path, particles: Count, overrides: &Overrides, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let study = load_study(study, overrides)?;

    info!("Starting allocation...");
    info!("  Origins: {}", study.matrix.n_origins());
    info!("  Destinations: {}", study.matrix.n_destinations());
    info!("  Observed arrivals: {}", study.matrix.total_count());
    info!("  Particles: {}", particles);

    let report = allocate(&study, particles)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render_table(&report)),
    }

    info!("Allocation complete");
    Ok(())
}

/// Allocate `particles` for a resolved study
pub fn allocate(study: &Study, particles: Count) -> Result<AllocationReport> {
    let matrix = &study.matrix;
    let mut allocator = GreedyAllocator::new(study.sampling.clone());
    let allocation = allocator.allocate(matrix, particles, study.block_size)?;

    let releases = matrix
        .origins()
        .iter()
        .zip(matrix.origin_costs())
        .zip(allocation.counts.iter().zip(&allocation.projected_costs))
        .map(|((origin, current_cv), (&particles, &projected_cv))| OriginRelease {
            origin: origin.clone(),
            particles,
            current_cv,
            projected_cv,
        })
        .collect();

    Ok(AllocationReport {
        particles,
        block_size: study.block_size,
        n_trials: study.sampling.n_trials(),
        seed: allocator.seed(),
        mode: allocation.mode,
        objective: matrix.obj_fn_cv(),
        projected_objective: allocation.projected_objective(),
        releases,
    })
}

/// Render a report as a box-drawn table
pub fn render_table(report: &AllocationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n┌──────────────────────┬────────────┬────────────┬────────────┐");
    let _ = writeln!(out, "│ Origin               │ Particles  │ CV now     │ CV after   │");
    let _ = writeln!(out, "├──────────────────────┼────────────┼────────────┼────────────┤");
    for release in &report.releases {
        let _ = writeln!(
            out,
            "│ {:<20} │ {:>10} │ {:>10.4} │ {:>10.4} │",
            release.origin, release.particles, release.current_cv, release.projected_cv
        );
    }
    let _ = writeln!(out, "└──────────────────────┴────────────┴────────────┴────────────┘");
    let _ = writeln!(
        out,
        "mode: {:?}  seed: {}  objective: {:.4} -> {:.4}",
        report.mode, report.seed, report.objective, report.projected_objective
    );
    out
}
