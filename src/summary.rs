use std::collections::BTreeMap;

use crate::config::MILE_METERS;
use crate::feature::BackcountrySegment;

/// Per-trail rollup of surviving backcountry mileage.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailSummary {
    pub name: String,
    /// Sum of segment lengths, meters.
    pub total_m: f64,
    pub segment_count: usize,
}

impl TrailSummary {
    pub fn total_miles(&self) -> f64 {
        self.total_m / MILE_METERS
    }
}

/// Whole-run totals for the report header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryTotals {
    pub segment_count: usize,
    pub trail_count: usize,
    pub total_m: f64,
    /// Trails whose total exceeds the headline threshold.
    pub long_trail_count: usize,
}

impl SummaryTotals {
    pub fn total_miles(&self) -> f64 {
        self.total_m / MILE_METERS
    }
}

/// Group segments by trail name and rank by descending total length.
/// Equal totals break alphabetically, so rankings are deterministic.
pub fn summarize(
    segments: &[BackcountrySegment],
    headline_m: f64,
) -> (Vec<TrailSummary>, SummaryTotals) {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for segment in segments {
        let entry = groups.entry(segment.name.as_str()).or_insert((0.0, 0));
        entry.0 += segment.length_m;
        entry.1 += 1;
    }

    let mut summaries: Vec<TrailSummary> = groups
        .into_iter()
        .map(|(name, (total_m, segment_count))| TrailSummary {
            name: name.to_string(),
            total_m,
            segment_count,
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.total_m
            .partial_cmp(&a.total_m)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let totals = SummaryTotals {
        segment_count: segments.len(),
        trail_count: summaries.len(),
        total_m: summaries.iter().map(|s| s.total_m).sum(),
        long_trail_count: summaries.iter().filter(|s| s.total_m > headline_m).count(),
    };
    (summaries, totals)
}

#[cfg(test)]
mod tests {
    use geo::LineString;

    use super::*;

    fn segment(name: &str, length_m: f64) -> BackcountrySegment {
        BackcountrySegment {
            name: name.to_string(),
            geometry: LineString::from(vec![(0.0, 0.0), (length_m, 0.0)]),
            length_m,
        }
    }

    #[test]
    fn groups_segments_by_trail_name() {
        let segments = vec![
            segment("Wonderland", 1000.0),
            segment("Hoh River", 400.0),
            segment("Wonderland", 250.0),
        ];
        let (summaries, totals) = summarize(&segments, 10_000.0);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Wonderland");
        assert_eq!(summaries[0].segment_count, 2);
        assert!((summaries[0].total_m - 1250.0).abs() < 1e-9);
        assert_eq!(totals.segment_count, 3);
        assert_eq!(totals.trail_count, 2);
        assert!((totals.total_m - 1650.0).abs() < 1e-9);
    }

    #[test]
    fn ranks_by_descending_total_with_alphabetical_ties() {
        let segments = vec![
            segment("b", 500.0),
            segment("a", 500.0),
            segment("c", 900.0),
        ];
        let (summaries, _) = summarize(&segments, 10_000.0);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn counts_trails_over_the_headline_threshold() {
        let segments = vec![
            segment("long", 20_000.0),
            segment("exactly", 10_000.0),
            segment("short", 100.0),
        ];
        let (_, totals) = summarize(&segments, 10_000.0);
        // Strictly greater: a trail sitting exactly on the threshold is out.
        assert_eq!(totals.long_trail_count, 1);
    }

    #[test]
    fn empty_input_summarizes_to_zero() {
        let (summaries, totals) = summarize(&[], 10_000.0);
        assert!(summaries.is_empty());
        assert_eq!(totals.segment_count, 0);
        assert_eq!(totals.trail_count, 0);
        assert_eq!(totals.long_trail_count, 0);
        assert_eq!(totals.total_m, 0.0);
    }

    #[test]
    fn converts_totals_to_miles() {
        let (summaries, totals) = summarize(&[segment("m", MILE_METERS * 2.0)], 1.0);
        assert!((summaries[0].total_miles() - 2.0).abs() < 1e-12);
        assert!((totals.total_miles() - 2.0).abs() < 1e-12);
    }
}
