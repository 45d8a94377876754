use std::path::Path;

use geo::{LineString, MultiLineString};
use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;

use crate::error::{AnalysisError, Result};
use crate::feature::{DisruptorFeature, DisruptorKind, TrailFeature};
use crate::geometry::{Reprojector, is_geographic};

/// Attribute columns probed, in order, for a trail's display name.
const NAME_COLUMNS: [&str; 4] = ["name", "NAME", "trail_name", "TRAIL_NAME"];

/// Group name for trails with no usable name value.
pub const UNNAMED_TRAIL: &str = "Unnamed Trail";

/// Reads shapefile collections into working-CRS features.
pub struct Loader {
    reprojector: Option<Reprojector>,
}

// Manual impl: `Reprojector` holds `proj4rs::Proj`, which is not `Debug`.
impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").finish_non_exhaustive()
    }
}

impl Loader {
    /// Reprojection is set up once here; `new` fails on an EPSG code the
    /// projection table does not know, and on a geographic working CRS:
    /// buffer distances and segment lengths are meter quantities.
    pub fn new(input_epsg: u32, working_epsg: u32) -> Result<Self> {
        if is_geographic(working_epsg) {
            return Err(AnalysisError::Geometry(format!(
                "EPSG:{working_epsg} is geographic; the working CRS must be projected in meters"
            )));
        }
        let reprojector = (input_epsg != working_epsg)
            .then(|| Reprojector::new(input_epsg, working_epsg))
            .transpose()?;
        Ok(Self { reprojector })
    }

    /// Read the full disruptor network: roads, plus railways when a railways
    /// file is given. A missing railways file is fatal only if railways were
    /// requested; otherwise the run continues on roads alone.
    pub fn read_network(
        &self,
        roads: &Path,
        railways: Option<&Path>,
        railways_required: bool,
    ) -> Result<Vec<DisruptorFeature>> {
        let mut disruptors = self.read_disruptors(roads, DisruptorKind::Road)?;
        match railways {
            Some(path) if path.exists() => {
                disruptors.extend(self.read_disruptors(path, DisruptorKind::Railway)?);
            }
            Some(path) if railways_required => {
                return Err(AnalysisError::load(path, "railways were requested but the file does not exist"));
            }
            Some(path) => {
                tracing::warn!(path = %path.display(), "railways shapefile not found, continuing without railways");
            }
            None => {}
        }
        Ok(disruptors)
    }

    /// Read one classed disruptor collection (roads or railways).
    pub fn read_disruptors(&self, path: &Path, kind: DisruptorKind) -> Result<Vec<DisruptorFeature>> {
        let mut reader =
            shapefile::Reader::from_path(path).map_err(|e| AnalysisError::load(path, e))?;
        let count = reader.shape_count().map_err(|e| AnalysisError::load(path, e))?;

        let mut features = Vec::with_capacity(count);
        for result in reader.iter_shapes_and_records() {
            let (shape, record) = result.map_err(|e| AnalysisError::load(path, e))?;
            let Some(geometry) = shape_to_multi_line(shape, path)? else { continue };
            let fclass = match record.get("fclass") {
                Some(FieldValue::Character(value)) => {
                    value.as_deref().unwrap_or("").trim().to_string()
                }
                Some(_) => {
                    return Err(AnalysisError::load(path, "fclass column is not a character field"));
                }
                None => return Err(AnalysisError::load(path, "records have no fclass column")),
            };
            let geometry = self.to_working(geometry, path)?;
            features.push(DisruptorFeature { kind, fclass, geometry });
        }

        tracing::info!(
            count = features.len(),
            kind = kind.as_str(),
            path = %path.display(),
            "loaded disruptor features"
        );
        Ok(features)
    }

    /// Read the trail collection, naming each feature from the first name
    /// column present in the attribute table.
    pub fn read_trails(&self, path: &Path) -> Result<Vec<TrailFeature>> {
        let mut reader =
            shapefile::Reader::from_path(path).map_err(|e| AnalysisError::load(path, e))?;
        let count = reader.shape_count().map_err(|e| AnalysisError::load(path, e))?;

        let mut name_column: Option<&'static str> = None;
        let mut features = Vec::with_capacity(count);
        for result in reader.iter_shapes_and_records() {
            let (shape, record) = result.map_err(|e| AnalysisError::load(path, e))?;
            // Column layout is uniform across a dbf table, so probe once.
            if name_column.is_none() {
                name_column = NAME_COLUMNS.into_iter().find(|c| record.get(c).is_some());
                if name_column.is_none() {
                    return Err(AnalysisError::load(
                        path,
                        format!("no trail name column found (tried {})", NAME_COLUMNS.join(", ")),
                    ));
                }
            }
            let Some(geometry) = shape_to_multi_line(shape, path)? else { continue };
            let name = name_column
                .and_then(|column| character_field(&record, column))
                .unwrap_or_else(|| UNNAMED_TRAIL.to_string());
            let geometry = self.to_working(geometry, path)?;
            features.push(TrailFeature { name, geometry });
        }

        tracing::info!(count = features.len(), path = %path.display(), "loaded trail features");
        Ok(features)
    }

    fn to_working(&self, geometry: MultiLineString<f64>, path: &Path) -> Result<MultiLineString<f64>> {
        match &self.reprojector {
            Some(reprojector) => reprojector
                .multi_line_string(&geometry)
                .map_err(|e| AnalysisError::load(path, e)),
            None => Ok(geometry),
        }
    }
}

/// Convert a polyline shape into a MultiLineString, one line per part.
/// Null shapes are skipped; any other shape type is a load error.
fn shape_to_multi_line(shape: Shape, path: &Path) -> Result<Option<MultiLineString<f64>>> {
    let lines: Vec<LineString<f64>> = match shape {
        Shape::NullShape => return Ok(None),
        Shape::Polyline(line) => {
            line.parts().iter().map(|part| part.iter().map(|p| (p.x, p.y)).collect()).collect()
        }
        Shape::PolylineM(line) => {
            line.parts().iter().map(|part| part.iter().map(|p| (p.x, p.y)).collect()).collect()
        }
        Shape::PolylineZ(line) => {
            line.parts().iter().map(|part| part.iter().map(|p| (p.x, p.y)).collect()).collect()
        }
        other => {
            return Err(AnalysisError::load(
                path,
                format!("expected polyline geometry, found {:?}", other.shapetype()),
            ));
        }
    };
    for line in &lines {
        for c in &line.0 {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(AnalysisError::load(
                    path,
                    format!("non-finite coordinate ({}, {})", c.x, c.y),
                ));
            }
        }
    }
    Ok(Some(MultiLineString::new(lines)))
}

/// Non-empty trimmed character value of `column`, if present.
fn character_field(record: &Record, column: &str) -> Option<String> {
    match record.get(column) {
        Some(FieldValue::Character(Some(s))) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use shapefile::{Point, PointM, Polyline, PolylineM};

    use super::*;

    #[test]
    fn converts_polyline_parts_to_line_strings() {
        let shape = Shape::Polyline(Polyline::with_parts(vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0), Point::new(20.0, 5.0)],
        ]));
        let lines = shape_to_multi_line(shape, Path::new("roads.shp")).unwrap().unwrap();
        assert_eq!(lines.0.len(), 2);
        assert_eq!(lines.0[0].0.len(), 2);
        assert_eq!(lines.0[1].0.len(), 3);
        assert_eq!(lines.0[1].0[2].x, 20.0);
    }

    #[test]
    fn measured_polylines_drop_the_measure() {
        let shape = Shape::PolylineM(PolylineM::new(vec![
            PointM::new(1.0, 2.0, 7.0),
            PointM::new(3.0, 4.0, 9.0),
        ]));
        let lines = shape_to_multi_line(shape, Path::new("roads.shp")).unwrap().unwrap();
        assert_eq!(lines.0[0].0[1], geo::Coord { x: 3.0, y: 4.0 });
    }

    #[test]
    fn null_shapes_are_skipped() {
        let result = shape_to_multi_line(Shape::NullShape, Path::new("roads.shp")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn non_polyline_shapes_are_a_load_error() {
        let err = shape_to_multi_line(Shape::Point(Point::new(1.0, 2.0)), Path::new("roads.shp"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Load { .. }));
    }

    #[test]
    fn geographic_working_crs_is_rejected() {
        for epsg in [4326, 4269] {
            let err = Loader::new(epsg, epsg).unwrap_err();
            assert!(matches!(err, AnalysisError::Geometry(_)));
        }
        assert!(Loader::new(32610, 4326).is_err());
        assert!(Loader::new(4326, 32610).is_ok());
    }

    #[test]
    fn character_field_trims_and_rejects_empty() {
        let mut record = Record::default();
        record.insert("name".to_string(), FieldValue::Character(Some("  Hoh River  ".to_string())));
        record.insert("blank".to_string(), FieldValue::Character(Some("   ".to_string())));
        record.insert("missing".to_string(), FieldValue::Character(None));

        assert_eq!(character_field(&record, "name").as_deref(), Some("Hoh River"));
        assert_eq!(character_field(&record, "blank"), None);
        assert_eq!(character_field(&record, "missing"), None);
        assert_eq!(character_field(&record, "absent"), None);
    }

    #[test]
    fn name_probe_prefers_lowercase_name() {
        let mut record = Record::default();
        record.insert("NAME".to_string(), FieldValue::Character(Some("upper".to_string())));
        record.insert("name".to_string(), FieldValue::Character(Some("lower".to_string())));
        let column = NAME_COLUMNS.into_iter().find(|c| record.get(c).is_some());
        assert_eq!(column, Some("name"));
    }
}
