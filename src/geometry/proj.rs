use geo::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::{AnalysisError, Result};

/// PROJ.4 definition for a supported EPSG code.
///
/// Covers geographic WGS84/NAD83 plus the UTM grids, which is every CRS the
/// pipeline accepts for input or working coordinates.
fn proj_definition(epsg: u32) -> Result<String> {
    match epsg {
        4326 => Ok("+proj=longlat +datum=WGS84 +no_defs +type=crs".to_string()),
        4269 => Ok("+proj=longlat +datum=NAD83 +no_defs +type=crs".to_string()),
        32601..=32660 => Ok(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32600
        )),
        32701..=32760 => Ok(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32700
        )),
        26901..=26923 => Ok(format!(
            "+proj=utm +zone={} +datum=NAD83 +units=m +no_defs +type=crs",
            epsg - 26900
        )),
        _ => Err(AnalysisError::Geometry(format!("unsupported EPSG code {epsg}"))),
    }
}

/// Whether `epsg` names a geographic (degree-unit) CRS.
pub fn is_geographic(epsg: u32) -> bool {
    matches!(epsg, 4326 | 4269)
}

/// Coordinate transformer between two EPSG codes.
///
/// proj4rs works in radians for geographic CRSs, so the degree conversion
/// happens here at the edges and callers only ever see degrees or meters.
pub struct Reprojector {
    from: Proj,
    to: Proj,
    from_geographic: bool,
    to_geographic: bool,
}

impl Reprojector {
    pub fn new(from_epsg: u32, to_epsg: u32) -> Result<Self> {
        let parse = |epsg: u32| -> Result<Proj> {
            let definition = proj_definition(epsg)?;
            Proj::from_proj_string(&definition).map_err(|e| {
                AnalysisError::Geometry(format!("invalid projection for EPSG {epsg}: {e}"))
            })
        };
        Ok(Self {
            from: parse(from_epsg)?,
            to: parse(to_epsg)?,
            from_geographic: is_geographic(from_epsg),
            to_geographic: is_geographic(to_epsg),
        })
    }

    pub fn coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = if self.from_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };
        transform(&self.from, &self.to, &mut point)
            .map_err(|e| AnalysisError::Geometry(format!("CRS transform failed: {e}")))?;
        let out = if self.to_geographic {
            Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
        } else {
            Coord { x: point.0, y: point.1 }
        };
        if !out.x.is_finite() || !out.y.is_finite() {
            return Err(AnalysisError::Geometry(format!(
                "CRS transform produced a non-finite coordinate from ({}, {})",
                coord.x, coord.y
            )));
        }
        Ok(out)
    }

    pub fn line_string(&self, line: &LineString<f64>) -> Result<LineString<f64>> {
        let mut coords = Vec::with_capacity(line.0.len());
        for &c in &line.0 {
            coords.push(self.coord(c)?);
        }
        Ok(LineString::new(coords))
    }

    pub fn multi_line_string(&self, lines: &MultiLineString<f64>) -> Result<MultiLineString<f64>> {
        let mut out = Vec::with_capacity(lines.0.len());
        for line in &lines.0 {
            out.push(self.line_string(line)?);
        }
        Ok(MultiLineString::new(out))
    }

    pub fn multi_polygon(&self, polygons: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        let mut out = Vec::with_capacity(polygons.0.len());
        for polygon in &polygons.0 {
            let exterior = self.line_string(polygon.exterior())?;
            let mut interiors = Vec::with_capacity(polygon.interiors().len());
            for ring in polygon.interiors() {
                interiors.push(self.line_string(ring)?);
            }
            out.push(Polygon::new(exterior, interiors));
        }
        Ok(MultiPolygon::new(out))
    }
}
