//! Data the view is populated from: the GeoJSON overlay and train positions.

use crate::error::ViewError;
use serde::Deserialize;
use std::borrow::Cow;

// Embed fixture data at compile time
static GEOJSON: &str = include_str!("../assets/geo.json");
static TRAINS: &str = include_str!("../assets/trains.json");

/// A train position. Fields other than the coordinates are kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainRecord {
    pub lng: f64,
    pub lat: f64,
    #[serde(flatten)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Contents of the trains file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainFixture {
    pub treinen: Vec<TrainRecord>,
}

impl TrainFixture {
    pub fn parse(json: &str) -> Result<Self, ViewError> {
        serde_json::from_str(json).map_err(|e| ViewError::Fixture(e.to_string()))
    }
}

/// Raw fixture documents, parsed when the view is built.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub geojson: Cow<'static, str>,
    pub trains: Cow<'static, str>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            geojson: Cow::Borrowed(GEOJSON),
            trains: Cow::Borrowed(TRAINS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_trains_parse() {
        let trains = TrainFixture::parse(TRAINS).unwrap();
        assert!(!trains.treinen.is_empty());
        for train in &trains.treinen {
            assert!((-90.0..=90.0).contains(&train.lat));
            assert!((-180.0..=180.0).contains(&train.lng));
        }
    }

    #[test]
    fn test_extra_fields_kept() {
        let trains = TrainFixture::parse(
            r#"{ "treinen": [{ "lng": 10, "lat": 20, "treinNummer": 3021, "type": "IC" }] }"#,
        )
        .unwrap();
        let train = &trains.treinen[0];
        assert_eq!((train.lng, train.lat), (10.0, 20.0));
        assert_eq!(train.properties["treinNummer"], 3021);
        assert_eq!(train.properties["type"], "IC");
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let result = TrainFixture::parse(r#"{ "treinen": [{ "lng": 10 }] }"#);
        assert!(matches!(result, Err(ViewError::Fixture(_))));
    }

    #[test]
    fn test_missing_collection_rejected() {
        assert!(TrainFixture::parse(r#"{ "trains": [] }"#).is_err());
    }
}
