//! Geographic coordinates with optional altitude.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the globe in degrees, with altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Builds coordinates from a GeoJSON-ordered point `[lng, lat, alt?]`.
    ///
    /// Returns `None` if fewer than two components are given.
    pub fn from_geo_point(point: &[f64]) -> Option<Self> {
        match *point {
            [longitude, latitude] => Some(Self::new(latitude, longitude, None)),
            [longitude, latitude, altitude, ..] => {
                Some(Self::new(latitude, longitude, Some(altitude)))
            }
            _ => None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Returns the horizontal position as a `geo_types` coordinate (x = lon, y = lat).
    pub fn to_coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<Coord<f64>> for GeoCoordinates {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x, None)
    }
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat {:.6}, lng {:.6}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ", alt {:.1} m", altitude)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geo_point_order() {
        let c = GeoCoordinates::from_geo_point(&[10.0, 20.0]).unwrap();
        assert_eq!(c.longitude, 10.0);
        assert_eq!(c.latitude, 20.0);
        assert_eq!(c.altitude, None);

        let c = GeoCoordinates::from_geo_point(&[10.0, 20.0, 5.0]).unwrap();
        assert_eq!(c.altitude, Some(5.0));

        assert!(GeoCoordinates::from_geo_point(&[10.0]).is_none());
    }

    #[test]
    fn test_with_altitude_overrides() {
        let c = GeoCoordinates::new(1.0, 2.0, Some(3.0)).with_altitude(50.0);
        assert_eq!(c.altitude, Some(50.0));
    }

    #[test]
    fn test_display() {
        let c = GeoCoordinates::new(52.0894, 5.11, Some(50.0));
        assert_eq!(c.to_string(), "lat 52.089400, lng 5.110000, alt 50.0 m");
    }
}
