use geo::{LineString, MultiPolygon, Polygon};
use serde_json::{Value, json};

use crate::config::MILE_METERS;
use crate::error::{AnalysisError, Result};
use crate::feature::BackcountrySegment;
use crate::geometry::Reprojector;

/// Encode the dissolved buffer as a one-feature GeoJSON collection.
///
/// `to_output` reprojects into the output CRS; pass `None` when the working
/// CRS is already the output CRS.
pub fn buffer_to_geojson(
    buffer: &MultiPolygon<f64>,
    buffer_miles: f64,
    to_output: Option<&Reprojector>,
) -> Result<Vec<u8>> {
    let buffer = match to_output {
        Some(reprojector) => reprojector.multi_polygon(buffer)?,
        None => buffer.clone(),
    };
    let coordinates: Vec<Value> = buffer.0.iter().map(polygon_coords).collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": coordinates,
            },
            "properties": {
                "buffer_miles": buffer_miles,
            },
        }],
    });
    to_bytes(&collection)
}

/// Encode surviving segments as a GeoJSON collection, one LineString feature
/// per segment, tagged with the originating trail name.
pub fn segments_to_geojson(
    segments: &[BackcountrySegment],
    to_output: Option<&Reprojector>,
) -> Result<Vec<u8>> {
    let mut features = Vec::with_capacity(segments.len());
    for segment in segments {
        let line = match to_output {
            Some(reprojector) => reprojector.line_string(&segment.geometry)?,
            None => segment.geometry.clone(),
        };
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": line_coords(&line),
            },
            "properties": {
                "name": segment.name.as_str(),
                "length_miles": segment.length_m / MILE_METERS,
            },
        }));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    to_bytes(&collection)
}

fn to_bytes(collection: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(collection)
        .map_err(|e| AnalysisError::Geometry(format!("GeoJSON serialization failed: {e}")))
}

/// Polygon rings in GeoJSON order: exterior first, holes as siblings.
fn polygon_coords(polygon: &Polygon<f64>) -> Value {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(line_coords(polygon.exterior()));
    rings.extend(polygon.interiors().iter().map(line_coords));
    Value::Array(rings)
}

fn line_coords(line: &LineString<f64>) -> Value {
    json!(line.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;

    fn square(center: (f64, f64), half: f64) -> LineString<f64> {
        let (x, y) = center;
        LineString::from(vec![
            (x - half, y - half),
            (x + half, y - half),
            (x + half, y + half),
            (x - half, y + half),
            (x - half, y - half),
        ])
    }

    #[test]
    fn buffer_polygons_nest_holes_as_sibling_rings() {
        let polygon = Polygon::new(square((0.0, 0.0), 100.0), vec![square((0.0, 0.0), 10.0)]);
        let bytes =
            buffer_to_geojson(&MultiPolygon::new(vec![polygon]), 1.0, None).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "MultiPolygon");
        assert_eq!(feature["properties"]["buffer_miles"], 1.0);

        // One polygon holding two rings: the exterior and its hole.
        let polygons = feature["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(polygons.len(), 1);
        let rings = polygons[0].as_array().unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].as_array().unwrap().len(), 5);
    }

    #[test]
    fn segments_carry_name_and_mileage_properties() {
        let segments = vec![BackcountrySegment {
            name: "Wonderland".to_string(),
            geometry: LineString::from(vec![(0.0, 0.0), (MILE_METERS, 0.0)]),
            length_m: MILE_METERS,
        }];
        let bytes = segments_to_geojson(&segments, None).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["name"], "Wonderland");
        assert_eq!(features[0]["properties"]["length_miles"], 1.0);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        let coords = features[0]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1][0], MILE_METERS);
    }

    #[test]
    fn output_reprojection_lands_in_degree_ranges() {
        let to_output = Reprojector::new(32610, 4326).unwrap();
        let segments = vec![BackcountrySegment {
            name: "meridian".to_string(),
            geometry: LineString::from(vec![(500_000.0, 5_272_000.0), (501_000.0, 5_272_000.0)]),
            length_m: 1000.0,
        }];
        let bytes = segments_to_geojson(&segments, Some(&to_output)).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let coords = value["features"][0]["geometry"]["coordinates"].as_array().unwrap();
        for pair in coords {
            let c = Coord { x: pair[0].as_f64().unwrap(), y: pair[1].as_f64().unwrap() };
            assert!(c.x > -180.0 && c.x < 180.0, "lon {}", c.x);
            assert!(c.y > -90.0 && c.y < 90.0, "lat {}", c.y);
        }
        // Easting 500km sits on the zone 10 central meridian.
        let lon = coords[0][0].as_f64().unwrap();
        assert!((lon - -123.0).abs() < 0.01, "lon {lon}");
    }

    #[test]
    fn empty_segment_set_serializes_to_an_empty_collection() {
        let bytes = segments_to_geojson(&[], None).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }
}
