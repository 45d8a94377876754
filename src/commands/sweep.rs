use anyhow::{Result, bail};
use tracing::{error, info};

use crate::cli::SweepArgs;
use crate::commands::analyze;

/// Run the analysis once per distance. A failed distance is logged and the
/// sweep moves on; the command still exits non-zero if anything failed.
pub fn run(args: &SweepArgs) -> Result<()> {
    if args.distances.is_empty() {
        bail!("no buffer distances given");
    }

    let mut failures = 0usize;
    for &distance in &args.distances {
        info!(distance_miles = distance, "starting sweep run");
        if let Err(e) = analyze::run_at_distance(&args.input, distance) {
            error!(distance_miles = distance, "sweep run failed: {e:#}");
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} sweep runs failed", args.distances.len());
    }
    info!(runs = args.distances.len(), "sweep complete");
    Ok(())
}
