//! Format-specific reading and writing.
//!
//! - `shapefile` - input collections (roads, railways, trails)
//! - `geojson` - output geometry interchange
//! - `report` - ranked plain-text summary

pub mod geojson;
pub mod report;
pub mod shapefile;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

pub use self::shapefile::Loader;

/// Paths of the three artifacts one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifacts {
    pub buffer_path: PathBuf,
    pub trails_path: PathBuf,
    pub report_path: PathBuf,
}

/// Artifact paths for a run, all named by the buffer distance so runs at
/// different distances never collide.
pub fn artifact_paths(out_dir: &Path, buffer_miles: f64) -> RunArtifacts {
    let label = distance_label(buffer_miles);
    RunArtifacts {
        buffer_path: out_dir.join(format!("{label}_mile_buffer.geojson")),
        trails_path: out_dir.join(format!("{label}_mile_backcountry_trails.geojson")),
        report_path: out_dir.join(format!("{label}_mile_backcountry_report.txt")),
    }
}

/// File-name label for a buffer distance. f64 Display already prints the
/// shortest round-tripping form, so 1.0 -> "1" and 1.5 -> "1.5".
pub fn distance_label(buffer_miles: f64) -> String {
    format!("{buffer_miles}")
}

/// Write one artifact, wrapping any filesystem failure with its path.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|source| AnalysisError::Write { path: path.to_path_buf(), source })
}
