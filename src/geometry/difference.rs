use geo::{BooleanOps, BoundingRect, Euclidean, Length, MultiPolygon, Rect};
use rayon::prelude::*;
use rstar::{AABB, RTree, RTreeObject};

use crate::feature::{BackcountrySegment, TrailFeature};

/// A bounding box in the R-tree, associated with a buffer part by index.
#[derive(Debug, Clone)]
struct PartBounds {
    idx: usize,
    bbox: Rect<f64>,
}

impl RTreeObject for PartBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Cuts trail geometry down to the pieces lying outside a dissolved
/// disruptor buffer.
///
/// The R-tree over buffer parts keeps the common case cheap: a trail whose
/// bounding box meets no part skips the boolean op entirely and passes
/// through unchanged.
pub struct TrailClipper<'a> {
    buffer: &'a MultiPolygon<f64>,
    index: RTree<PartBounds>,
}

impl<'a> TrailClipper<'a> {
    pub fn new(buffer: &'a MultiPolygon<f64>) -> Self {
        let index = RTree::bulk_load(
            buffer
                .0
                .iter()
                .enumerate()
                .filter_map(|(idx, part)| {
                    part.bounding_rect().map(|bbox| PartBounds { idx, bbox })
                })
                .collect(),
        );
        Self { buffer, index }
    }

    /// Pieces of `trail` outside the buffer, dropping any shorter than
    /// `min_length_m` and any with zero length.
    pub fn clip_trail(&self, trail: &TrailFeature, min_length_m: f64) -> Vec<BackcountrySegment> {
        let Some(bbox) = trail.geometry.bounding_rect() else {
            return Vec::new();
        };
        let envelope = AABB::from_corners(bbox.min().into(), bbox.max().into());
        let candidates: Vec<usize> = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .map(|part| part.idx)
            .collect();

        // Subtracting candidate parts one at a time is the same difference:
        // (trail - a) - b == trail - (a | b).
        let mut remaining = trail.geometry.clone();
        for idx in candidates {
            if remaining.0.is_empty() {
                break;
            }
            remaining = self.buffer.0[idx].clip(&remaining, true);
        }

        remaining
            .0
            .into_iter()
            .filter_map(|piece| {
                let length_m = Euclidean.length(&piece);
                (length_m.is_finite() && length_m > 0.0 && length_m >= min_length_m).then(|| {
                    BackcountrySegment { name: trail.name.clone(), geometry: piece, length_m }
                })
            })
            .collect()
    }

    /// Clip every trail, fanning the work across threads. Output order
    /// follows input order, so runs are reproducible.
    pub fn clip_all(&self, trails: &[TrailFeature], min_length_m: f64) -> Vec<BackcountrySegment> {
        let per_trail: Vec<Vec<BackcountrySegment>> = trails
            .par_iter()
            .map(|trail| self.clip_trail(trail, min_length_m))
            .collect();
        per_trail.into_iter().flatten().collect()
    }
}
