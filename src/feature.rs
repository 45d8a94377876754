use geo::{LineString, MultiLineString};

/// Which disruptor collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisruptorKind {
    Road,
    Railway,
}

impl DisruptorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Railway => "railway",
        }
    }
}

/// One road or railway record: a classed linear feature that disqualifies
/// nearby trail mileage from being backcountry.
#[derive(Debug, Clone, PartialEq)]
pub struct DisruptorFeature {
    pub kind: DisruptorKind,
    /// Feature class attribute, e.g. "residential" or "rail".
    pub fclass: String,
    /// Planar geometry in the working CRS (meters).
    pub geometry: MultiLineString<f64>,
}

/// One trail record, keyed by its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailFeature {
    pub name: String,
    /// Planar geometry in the working CRS (meters).
    pub geometry: MultiLineString<f64>,
}

/// A connected piece of a trail that survived the buffer difference.
#[derive(Debug, Clone, PartialEq)]
pub struct BackcountrySegment {
    /// Name of the trail this piece was cut from.
    pub name: String,
    pub geometry: LineString<f64>,
    /// Planar length in the working CRS, meters.
    pub length_m: f64,
}
