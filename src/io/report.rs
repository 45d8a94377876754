use std::fmt::Write as _;

use crate::config::{AnalysisConfig, MILE_METERS};
use crate::feature::BackcountrySegment;
use crate::summary::{SummaryTotals, TrailSummary};

/// Render the ranked plain-text report for one run.
///
/// Summaries are assumed already ranked (descending total length); the
/// report prints them in order with 1-based ranks.
pub fn render_report(
    segments: &[BackcountrySegment],
    summaries: &[TrailSummary],
    totals: &SummaryTotals,
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Backcountry trail analysis ({} mile buffer, {} mile minimum segment)",
        config.buffer_miles, config.min_segment_miles
    );

    if summaries.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No backcountry trail segments found.");
        let _ = writeln!(out, "Try reducing the buffer distance or minimum segment length.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top {} longest trails (grouped by name):", summaries.len());
    let _ = writeln!(out, "{:<5} {:<20} {:<10} {}", "Rank", "Total Length (miles)", "Segments", "Trail Name");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for (i, summary) in summaries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<5} {:<20.2} {:<10} {}",
            i + 1,
            summary.total_miles(),
            summary.segment_count,
            summary.name
        );
    }

    let mut longest: Vec<&BackcountrySegment> = segments.iter().collect();
    longest.sort_by(|a, b| {
        b.length_m
            .partial_cmp(&a.length_m)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    let _ = writeln!(out);
    let _ = writeln!(out, "Individual trail segments (top 10):");
    let _ = writeln!(out, "{:<5} {:<15} {}", "Rank", "Length (miles)", "Trail Name");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for (i, segment) in longest.iter().take(10).enumerate() {
        let _ = writeln!(
            out,
            "{:<5} {:<15.2} {}",
            i + 1,
            segment.length_m / MILE_METERS,
            segment.name
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "Total backcountry length: {:.2} miles", totals.total_miles());
    let _ = writeln!(out, "Number of unique trails: {}", totals.trail_count);
    let _ = writeln!(out, "Number of trail segments: {}", totals.segment_count);
    let _ = writeln!(
        out,
        "Trails over {} miles: {}",
        config.headline_miles, totals.long_trail_count
    );
    let _ = writeln!(
        out,
        "Average trail length: {:.2} miles",
        totals.total_miles() / totals.trail_count as f64
    );
    let _ = writeln!(
        out,
        "Average segment length: {:.2} miles",
        totals.total_miles() / totals.segment_count as f64
    );
    out
}
