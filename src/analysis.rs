use std::collections::BTreeSet;

use geo::MultiPolygon;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::feature::{BackcountrySegment, DisruptorFeature, DisruptorKind, TrailFeature};
use crate::geometry::{TrailClipper, build_buffer};
use crate::summary::{SummaryTotals, TrailSummary, summarize};

/// Everything one run produces, in the working CRS.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Dissolved buffer around the kept disruptors.
    pub buffer: MultiPolygon<f64>,
    /// Trail pieces outside the buffer, in input trail order.
    pub segments: Vec<BackcountrySegment>,
    /// Per-trail rollups, ranked by descending total length.
    pub summaries: Vec<TrailSummary>,
    pub totals: SummaryTotals,
}

/// Keep the disruptors that count: records with an excluded class are
/// dropped, and railways are dropped unless requested. Pure and idempotent;
/// input order is preserved.
pub fn filter_disruptors(
    disruptors: &[DisruptorFeature],
    excluded_types: &BTreeSet<String>,
    include_railways: bool,
) -> Vec<DisruptorFeature> {
    disruptors
        .iter()
        .filter(|d| {
            if excluded_types.contains(&d.fclass) {
                return false;
            }
            d.kind != DisruptorKind::Railway || include_railways
        })
        .cloned()
        .collect()
}

/// One complete analysis at one buffer distance: filter, buffer, clip,
/// aggregate. Inputs must already be in the working CRS.
///
/// An empty segment set is a valid outcome; an empty disruptor set after
/// filtering is not, since the buffer would be undefined.
pub fn run_analysis(
    disruptors: &[DisruptorFeature],
    trails: &[TrailFeature],
    config: &AnalysisConfig,
) -> Result<RunOutput> {
    let kept = filter_disruptors(disruptors, &config.excluded_types, config.include_railways);
    tracing::info!(
        kept = kept.len(),
        excluded = disruptors.len() - kept.len(),
        "filtered disruptor features"
    );

    tracing::info!(
        distance_miles = config.buffer_miles,
        quad_segments = config.quad_segments,
        "buffering disruptor network"
    );
    let buffer = build_buffer(&kept, config.buffer_meters(), config.quad_segments)?;
    tracing::debug!(parts = buffer.0.len(), "dissolved buffer");

    let clipper = TrailClipper::new(&buffer);
    let segments = clipper.clip_all(trails, config.min_segment_meters());
    tracing::info!(
        count = segments.len(),
        min_segment_miles = config.min_segment_miles,
        "collected backcountry segments"
    );

    let (summaries, totals) = summarize(&segments, config.headline_meters());
    Ok(RunOutput { buffer, segments, summaries, totals })
}
