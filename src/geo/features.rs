//! GeoJSON features and the data source that holds them.

use crate::error::ViewError;
use crate::style::GeometryType;
use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, Value};

/// Rings of a polygon: exterior first, then holes.
pub type PolygonRings = (Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>);

/// A geographic feature that can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFeature {
    /// A series of connected line segments
    LineString(Vec<Coord<f64>>),
    /// Multiple line strings
    MultiLineString(Vec<Vec<Coord<f64>>>),
    /// A polygon with optional holes and label
    Polygon {
        exterior: Vec<Coord<f64>>,
        holes: Vec<Vec<Coord<f64>>>,
        label: Option<String>,
    },
    /// Multiple polygons with optional label
    MultiPolygon {
        polygons: Vec<PolygonRings>,
        label: Option<String>,
    },
    /// A single point with optional label
    Point(Coord<f64>, Option<String>),
}

impl GeoFeature {
    /// Geometry class used for style rule matching.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            GeoFeature::Point(..) => GeometryType::Point,
            GeoFeature::LineString(_) | GeoFeature::MultiLineString(_) => GeometryType::Line,
            GeoFeature::Polygon { .. } | GeoFeature::MultiPolygon { .. } => {
                GeometryType::Polygon
            }
        }
    }
}

fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_line(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions.iter().filter_map(|p| to_coord(p)).collect()
}

fn to_rings(rings: &[Vec<Vec<f64>>]) -> Option<PolygonRings> {
    let (exterior, holes) = rings.split_first()?;
    Some((to_line(exterior), holes.iter().map(|r| to_line(r)).collect()))
}

/// Feature data source: GeoJSON content styled by a named style set of
/// the current theme.
#[derive(Debug, Clone)]
pub struct FeaturesDataSource {
    style_set_name: String,
    features: Vec<GeoFeature>,
}

impl FeaturesDataSource {
    pub fn new(style_set_name: impl Into<String>) -> Self {
        Self {
            style_set_name: style_set_name.into(),
            features: Vec::new(),
        }
    }

    pub fn style_set_name(&self) -> &str {
        &self.style_set_name
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    /// Replaces the content of this data source with parsed GeoJSON.
    ///
    /// Features without a geometry are skipped. Multi-point geometries are
    /// split into one point feature per position.
    pub fn set_from_geojson(&mut self, geojson_str: &str) -> Result<(), ViewError> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e: geojson::Error| ViewError::GeoJson(e.to_string()))?;

        let mut features = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in &fc.features {
                    convert_feature(feature, &mut features);
                }
            }
            GeoJson::Feature(f) => convert_feature(&f, &mut features),
            GeoJson::Geometry(g) => convert_geometry(&g, None, &mut features),
        }

        log::debug!(
            "Loaded {} features for style set {}",
            features.len(),
            self.style_set_name
        );
        self.features = features;
        Ok(())
    }
}

fn convert_feature(feature: &Feature, out: &mut Vec<GeoFeature>) {
    let label = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if let Some(geometry) = &feature.geometry {
        convert_geometry(geometry, label, out);
    }
}

fn convert_geometry(geometry: &Geometry, label: Option<String>, out: &mut Vec<GeoFeature>) {
    match &geometry.value {
        Value::Point(position) => {
            if let Some(coord) = to_coord(position) {
                out.push(GeoFeature::Point(coord, label));
            }
        }
        Value::MultiPoint(positions) => {
            for coord in positions.iter().filter_map(|p| to_coord(p)) {
                out.push(GeoFeature::Point(coord, label.clone()));
            }
        }
        Value::LineString(positions) => out.push(GeoFeature::LineString(to_line(positions))),
        Value::MultiLineString(lines) => out.push(GeoFeature::MultiLineString(
            lines.iter().map(|l| to_line(l)).collect(),
        )),
        Value::Polygon(rings) => {
            if let Some((exterior, holes)) = to_rings(rings) {
                out.push(GeoFeature::Polygon {
                    exterior,
                    holes,
                    label,
                });
            }
        }
        Value::MultiPolygon(polygons) => {
            let polygons: Vec<PolygonRings> =
                polygons.iter().filter_map(|rings| to_rings(rings)).collect();
            out.push(GeoFeature::MultiPolygon { polygons, label });
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                convert_geometry(g, label.clone(), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Plein" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[5.0, 52.0], [5.1, 52.0], [5.1, 52.1], [5.0, 52.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": [[5.0, 52.0], [5.2, 52.2]] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "MultiPoint", "coordinates": [[5.0, 52.0], [5.3, 52.3]] }
            },
            { "type": "Feature", "properties": {}, "geometry": null }
        ]
    }"#;

    #[test]
    fn test_load_feature_collection() {
        let mut source = FeaturesDataSource::new("geojson");
        source.set_from_geojson(SAMPLE).unwrap();

        let types: Vec<_> = source
            .features()
            .iter()
            .map(GeoFeature::geometry_type)
            .collect();
        assert_eq!(
            types,
            vec![
                GeometryType::Polygon,
                GeometryType::Line,
                GeometryType::Point,
                GeometryType::Point,
            ]
        );

        match &source.features()[0] {
            GeoFeature::Polygon {
                exterior, label, ..
            } => {
                assert_eq!(exterior.len(), 4);
                assert_eq!(label.as_deref(), Some("Plein"));
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_single_geometry() {
        let mut source = FeaturesDataSource::new("geojson");
        source
            .set_from_geojson(r#"{ "type": "Point", "coordinates": [4.9, 52.37] }"#)
            .unwrap();
        assert_eq!(
            source.features(),
            &[GeoFeature::Point(Coord { x: 4.9, y: 52.37 }, None)]
        );
    }

    #[test]
    fn test_malformed_geojson() {
        let mut source = FeaturesDataSource::new("geojson");
        let result = source.set_from_geojson("{ not json");
        assert!(matches!(result, Err(ViewError::GeoJson(_))));
        assert!(source.features().is_empty());
    }

    #[test]
    fn test_reload_replaces_features() {
        let mut source = FeaturesDataSource::new("geojson");
        source.set_from_geojson(SAMPLE).unwrap();
        source
            .set_from_geojson(r#"{ "type": "FeatureCollection", "features": [] }"#)
            .unwrap();
        assert!(source.features().is_empty());
    }
}
