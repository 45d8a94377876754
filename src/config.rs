use std::collections::BTreeSet;

/// Meters per statute mile, the unit all distance options are given in.
pub const MILE_METERS: f64 = 1609.34;

/// Output artifacts are always written in geographic WGS84.
pub const OUTPUT_EPSG: u32 = 4326;

/// Road classes excluded from the disruptor set by default.
///
/// These are the OSM `fclass` values for non-motorized ways; a trail next to
/// a footpath is still backcountry.
pub const DEFAULT_EXCLUDED_TYPES: [&str; 5] =
    ["footway", "path", "pedestrian", "steps", "bridleway"];

/// Tunable knobs for one analysis run.
///
/// Everything is expressed in miles at this surface and converted to meters
/// at the geometry boundary, so the CLI, the report, and the output file
/// names all speak the same unit.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Buffer radius around every disruptor.
    pub buffer_miles: f64,
    /// Surviving segments shorter than this are discarded as noise.
    pub min_segment_miles: f64,
    /// Whether railways count as disruptors.
    pub include_railways: bool,
    /// Disruptor `fclass` values removed before buffering. Empty passes all.
    pub excluded_types: BTreeSet<String>,
    /// Vertices per quarter circle in buffer caps and joins.
    pub quad_segments: usize,
    /// Report threshold for the "long trails" count.
    pub headline_miles: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            buffer_miles: 1.0,
            min_segment_miles: 0.1,
            include_railways: false,
            excluded_types: DEFAULT_EXCLUDED_TYPES.iter().map(|s| s.to_string()).collect(),
            quad_segments: 8,
            headline_miles: 10.0,
        }
    }
}

impl AnalysisConfig {
    pub fn buffer_meters(&self) -> f64 {
        self.buffer_miles * MILE_METERS
    }

    pub fn min_segment_meters(&self) -> f64 {
        self.min_segment_miles * MILE_METERS
    }

    pub fn headline_meters(&self) -> f64 {
        self.headline_miles * MILE_METERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_miles_to_meters() {
        let config = AnalysisConfig { buffer_miles: 1.0, ..Default::default() };
        assert_eq!(config.buffer_meters(), 1609.34);

        let config = AnalysisConfig { buffer_miles: 12.0, ..Default::default() };
        assert!((config.buffer_meters() - 19312.08).abs() < 1e-9);
    }

    #[test]
    fn default_exclusions_cover_non_motorized_classes() {
        let config = AnalysisConfig::default();
        for class in ["footway", "path", "pedestrian", "steps", "bridleway"] {
            assert!(config.excluded_types.contains(class));
        }
        assert!(!config.excluded_types.contains("motorway"));
    }
}
