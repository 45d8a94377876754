use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};

use crate::error::{AnalysisError, Result};
use crate::feature::DisruptorFeature;

/// Buffer every disruptor line by `distance_m` and dissolve the result into
/// one multipolygon.
///
/// Each segment contributes a capsule (an offset rectangle with semicircular
/// caps), so unioning the capsules of a polyline is exactly its round-join,
/// round-cap buffer. `quad_segments` is the number of vertices used per
/// quarter circle when approximating the caps.
pub fn build_buffer(
    disruptors: &[DisruptorFeature],
    distance_m: f64,
    quad_segments: usize,
) -> Result<MultiPolygon<f64>> {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return Err(AnalysisError::Geometry(format!(
            "buffer distance must be positive, got {distance_m}"
        )));
    }

    let mut pieces = Vec::new();
    for feature in disruptors {
        for line in &feature.geometry.0 {
            let path = dedup_path(line)?;
            match path.as_slice() {
                [] => {}
                [center] => pieces.push(circle(*center, distance_m, quad_segments)),
                _ => {
                    for pair in path.windows(2) {
                        pieces.push(capsule(pair[0], pair[1], distance_m, quad_segments));
                    }
                }
            }
        }
    }

    if pieces.is_empty() {
        return Err(AnalysisError::Geometry(
            "no disruptor geometry to buffer".to_string(),
        ));
    }
    Ok(union_all(pieces))
}

/// Collapse consecutive duplicate vertices, rejecting non-finite coordinates.
/// A line whose vertices are all identical collapses to a single point.
fn dedup_path(line: &LineString<f64>) -> Result<Vec<Coord<f64>>> {
    let mut path: Vec<Coord<f64>> = Vec::with_capacity(line.0.len());
    for &c in &line.0 {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(AnalysisError::Geometry(format!(
                "non-finite coordinate ({}, {}) in disruptor geometry",
                c.x, c.y
            )));
        }
        if path.last() != Some(&c) {
            path.push(c);
        }
    }
    Ok(path)
}

/// Counterclockwise stadium polygon around the segment `start -> end`.
fn capsule(start: Coord<f64>, end: Coord<f64>, radius: f64, quad_segments: usize) -> Polygon<f64> {
    let arc_steps = 2 * quad_segments.max(1);
    let heading = (end.y - start.y).atan2(end.x - start.x);
    let mut coords = Vec::with_capacity(2 * arc_steps + 3);
    // Semicircle around the far endpoint, right side swinging to left.
    for i in 0..=arc_steps {
        let angle = heading - FRAC_PI_2 + PI * i as f64 / arc_steps as f64;
        coords.push(Coord { x: end.x + radius * angle.cos(), y: end.y + radius * angle.sin() });
    }
    // Back down the far edge and around the near endpoint.
    for i in 0..=arc_steps {
        let angle = heading + FRAC_PI_2 + PI * i as f64 / arc_steps as f64;
        coords.push(Coord { x: start.x + radius * angle.cos(), y: start.y + radius * angle.sin() });
    }
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

/// Counterclockwise circle approximation around a degenerate segment.
fn circle(center: Coord<f64>, radius: f64, quad_segments: usize) -> Polygon<f64> {
    let steps = 4 * quad_segments.max(1);
    let mut coords = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = TAU * i as f64 / steps as f64;
        coords.push(Coord { x: center.x + radius * angle.cos(), y: center.y + radius * angle.sin() });
    }
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

/// Union polygons pairwise in rounds, so the merge tree stays balanced
/// instead of accumulating one ever-growing left operand.
fn union_all(pieces: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut layers: Vec<MultiPolygon<f64>> =
        pieces.into_iter().map(|piece| MultiPolygon::new(vec![piece])).collect();
    while layers.len() > 1 {
        layers = layers
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => a.union(b),
                rest => rest[0].clone(),
            })
            .collect();
    }
    layers.into_iter().next().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}
