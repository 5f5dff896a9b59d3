//! Objective command implementation
//!
//! Reports the CV objective of the current observations, per origin and
//! optionally per destination cell.

use std::fmt::Write as _;
use std::path::Path;

use connectivity_core::{ConnectivityMatrix, Count, PosteriorCell};
use serde::Serialize;
use tracing::info;

use crate::config::{load_study, OutputFormat, Overrides};
use crate::Result;

/// Objective summary of a study
#[derive(Debug, Serialize)]
pub struct ObjectiveReport {
    pub delta: f64,
    pub pi: f64,
    pub objective: f64,
    pub origins: Vec<OriginObjective>,
}

/// Objective contribution of one origin
#[derive(Debug, Serialize)]
pub struct OriginObjective {
    pub origin: String,
    pub arrivals: Count,
    pub cv: f64,
    pub qualifying_cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellSummary>>,
}

/// Posterior summary of one origin-destination cell
#[derive(Debug, Serialize)]
pub struct CellSummary {
    pub destination: String,
    #[serde(flatten)]
    pub posterior: PosteriorCell,
}

/// Run the objective command
pub fn run(study: &Path, overrides: &Overrides, cells: bool, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let study = load_study(study, overrides)?;

    let report = summarise(&study.matrix, cells);
    info!(objective = report.objective, "Objective evaluated");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render_table(&report)),
    }
    Ok(())
}

/// Build the objective report for a matrix
pub fn summarise(matrix: &ConnectivityMatrix, with_cells: bool) -> ObjectiveReport {
    let params = matrix.objective_params();
    let origins = matrix
        .origins()
        .iter()
        .enumerate()
        .map(|(i, origin)| {
            let posterior = matrix.posterior(i).unwrap_or_default();
            let qualifying_cells = posterior.iter().filter(|c| c.qualifies).count();
            let cells = with_cells.then(|| {
                matrix
                    .destinations()
                    .iter()
                    .zip(posterior)
                    .map(|(destination, posterior)| CellSummary {
                        destination: destination.clone(),
                        posterior,
                    })
                    .collect()
            });
            OriginObjective {
                origin: origin.clone(),
                arrivals: matrix.origin_total(i).unwrap_or(0),
                cv: matrix.obj_fn_cv_origin(i),
                qualifying_cells,
                cells,
            }
        })
        .collect();

    ObjectiveReport {
        delta: params.delta(),
        pi: params.pi(),
        objective: matrix.obj_fn_cv(),
        origins,
    }
}

/// Render a report as a box-drawn table
pub fn render_table(report: &ObjectiveReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n┌──────────────────────┬────────────┬────────────┬────────────┐");
    let _ = writeln!(out, "│ Origin               │ Arrivals   │ Qualifying │ CV         │");
    let _ = writeln!(out, "├──────────────────────┼────────────┼────────────┼────────────┤");
    for origin in &report.origins {
        let _ = writeln!(
            out,
            "│ {:<20} │ {:>10} │ {:>10} │ {:>10.4} │",
            origin.origin, origin.arrivals, origin.qualifying_cells, origin.cv
        );
        for cell in origin.cells.iter().flatten() {
            let _ = writeln!(
                out,
                "│   -> {:<15} │ {:>10.4} │ {:>10} │ {:>10.4} │",
                cell.destination,
                cell.posterior.mean,
                if cell.posterior.qualifies { "yes" } else { "no" },
                cell.posterior.cv
            );
        }
    }
    let _ = writeln!(out, "└──────────────────────┴────────────┴────────────┴────────────┘");
    let _ = writeln!(
        out,
        "delta: {}  pi: {}  objective: {:.4}",
        report.delta, report.pi, report.objective
    );
    out
}
