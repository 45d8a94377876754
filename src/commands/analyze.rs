use std::fs;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::analysis::{RunOutput, run_analysis};
use crate::cli::{AnalyzeArgs, InputArgs};
use crate::config::{AnalysisConfig, DEFAULT_EXCLUDED_TYPES, OUTPUT_EPSG};
use crate::geometry::Reprojector;
use crate::io::{self, Loader, artifact_paths};

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    run_at_distance(&args.input, args.buffer_miles)
}

/// Load, analyze, and write artifacts for one buffer distance. Sweep calls
/// this once per distance; runs share nothing.
pub(crate) fn run_at_distance(input: &InputArgs, buffer_miles: f64) -> Result<()> {
    if input.include_railways && input.railways.is_none() {
        bail!("--include-railways requires --railways");
    }
    let config = build_config(input, buffer_miles);

    let loader = Loader::new(input.input_epsg, input.epsg)?;
    let disruptors =
        loader.read_network(&input.roads, input.railways.as_deref(), input.include_railways)?;
    let trails = loader.read_trails(&input.trails)?;

    let output = run_analysis(&disruptors, &trails, &config)?;
    write_artifacts(&output, input, &config)?;

    info!(
        buffer_miles,
        trails = output.totals.trail_count,
        segments = output.totals.segment_count,
        total_miles = output.totals.total_miles(),
        "analysis complete"
    );
    Ok(())
}

fn build_config(input: &InputArgs, buffer_miles: f64) -> AnalysisConfig {
    let excluded_types = if input.exclude_types.is_empty() {
        DEFAULT_EXCLUDED_TYPES.iter().map(|s| s.to_string()).collect()
    } else {
        input.exclude_types.iter().cloned().collect()
    };
    AnalysisConfig {
        buffer_miles,
        min_segment_miles: input.min_segment_miles,
        include_railways: input.include_railways,
        excluded_types,
        quad_segments: input.quad_segments,
        headline_miles: input.headline_miles,
    }
}

/// Serialize everything before touching the filesystem, so a failed run
/// leaves no partial artifacts behind.
fn write_artifacts(output: &RunOutput, input: &InputArgs, config: &AnalysisConfig) -> Result<()> {
    let to_output = (input.epsg != OUTPUT_EPSG)
        .then(|| Reprojector::new(input.epsg, OUTPUT_EPSG))
        .transpose()?;

    let buffer_bytes =
        io::geojson::buffer_to_geojson(&output.buffer, config.buffer_miles, to_output.as_ref())?;
    let trails_bytes = io::geojson::segments_to_geojson(&output.segments, to_output.as_ref())?;
    let report =
        io::report::render_report(&output.segments, &output.summaries, &output.totals, config);

    fs::create_dir_all(&input.out)
        .with_context(|| format!("failed to create output directory {}", input.out.display()))?;
    let artifacts = artifact_paths(&input.out, config.buffer_miles);
    io::write_file(&artifacts.buffer_path, &buffer_bytes)?;
    io::write_file(&artifacts.trails_path, &trails_bytes)?;
    io::write_file(&artifacts.report_path, report.as_bytes())?;

    info!(
        buffer = %artifacts.buffer_path.display(),
        trails = %artifacts.trails_path.display(),
        report = %artifacts.report_path.display(),
        "wrote artifacts"
    );
    Ok(())
}
