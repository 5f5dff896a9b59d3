//! Check command implementation
//!
//! Validates a study file and prints what it resolves to.

use std::path::Path;

use tracing::info;

use crate::config::{load_study, Overrides};
use crate::Result;

/// Run the check command
pub fn run(study: &Path, overrides: &Overrides) -> Result<()> {
    info!("Checking study file {}", study.display());
    let study = load_study(study, overrides)?;
    let matrix = &study.matrix;
    let params = matrix.objective_params();

    println!("Study file OK");
    println!("  Origins:        {}", matrix.origins().join(", "));
    println!("  Destinations:   {}", matrix.destinations().join(", "));
    println!("  Arrivals:       {}", matrix.total_count());
    println!("  delta / pi:     {} / {}", params.delta(), params.pi());
    println!("  Trials:         {}", study.sampling.n_trials());
    match study.sampling.seed() {
        Some(seed) => println!("  Seed:           {}", seed),
        None => println!("  Seed:           (entropy)"),
    }
    println!("  Block size:     {}", study.block_size);
    if matrix.total_count() == 0 {
        println!("  No arrivals yet: the next batch is split uniformly");
    }
    Ok(())
}
