//! Map projection and coordinate transformation.
//!
//! Converts between geographic coordinates (lat/lon) and screen positions
//! using spherical Web Mercator. World space is normalized to the unit
//! square, with (0, 0) at the north-west corner.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use glam::DVec2;
use std::f64::consts::PI;

/// Edge length of a map tile in pixels at integer zoom levels.
pub const TILE_SIZE: f64 = 256.0;

/// Equatorial circumference of the earth in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Latitude limit of Web Mercator.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM_LEVEL: f64 = 1.0;
pub const MAX_ZOOM_LEVEL: f64 = 20.0;

/// Projects (lon, lat) to normalized world space.
pub fn project(coord: Coord<f64>) -> DVec2 {
    let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.x + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    DVec2::new(x, y)
}

/// Inverse of [`project`]. Longitude wraps into [-180, 180).
pub fn unproject(world: DVec2) -> Coord<f64> {
    let lon = (world.x * 360.0).rem_euclid(360.0) - 180.0;
    let lat = (PI * (1.0 - 2.0 * world.y)).sinh().atan().to_degrees();
    Coord { x: lon, y: lat }
}

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center latitude of the view
    pub center_lat: f64,
    /// Center longitude of the view
    pub center_lon: f64,
    /// Fractional zoom level (1 = whole world in 512 px)
    pub zoom_level: f64,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center_lat: 0.0,
            center_lon: 0.0,
            zoom_level: MIN_ZOOM_LEVEL,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub fn new(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            ..Default::default()
        }
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom_level(&mut self, zoom_level: f64) {
        self.zoom_level = zoom_level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
    }

    /// Size of the world in screen pixels at the current zoom.
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom_level)
    }

    fn center_world(&self) -> DVec2 {
        project(Coord {
            x: self.center_lon,
            y: self.center_lat,
        })
    }

    fn set_center_world(&mut self, world: DVec2) {
        let clamped = DVec2::new(world.x, world.y.clamp(0.0, 1.0));
        let coord = unproject(clamped);
        self.center_lon = coord.x;
        self.center_lat = coord.y;
    }

    /// Converts geographic coordinates (lon, lat) to a screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let offset = (project(coord) - self.center_world()) * self.world_size();
        let center = self.screen_rect.center();
        Pos2::new(center.x + offset.x as f32, center.y + offset.y as f32)
    }

    /// Converts a screen position to geographic coordinates (lon, lat).
    ///
    /// Returns `None` when the position lies above or below the projected
    /// world or the canvas has no area.
    pub fn screen_to_geo(&self, pos: Pos2) -> Option<Coord<f64>> {
        if self.screen_rect.width() <= 0.0 || self.screen_rect.height() <= 0.0 {
            return None;
        }
        let rel = pos - self.screen_rect.center();
        let world =
            self.center_world() + DVec2::new(rel.x as f64, rel.y as f64) / self.world_size();
        if !(0.0..=1.0).contains(&world.y) {
            return None;
        }
        Some(unproject(world))
    }

    /// Ground resolution in meters per pixel at the given latitude.
    pub fn meters_per_pixel(&self, latitude: f64) -> f64 {
        EARTH_CIRCUMFERENCE * latitude.to_radians().cos() / self.world_size()
    }

    /// Moves the view so that content follows a drag of `delta` pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        let shift = DVec2::new(delta.x as f64, delta.y as f64) / self.world_size();
        self.set_center_world(self.center_world() - shift);
    }

    /// Changes zoom while keeping the geographic point under `anchor` fixed.
    pub fn zoom_around(&mut self, zoom_level: f64, anchor: Pos2) {
        let rel = anchor - self.screen_rect.center();
        let rel = DVec2::new(rel.x as f64, rel.y as f64);
        let fixed = self.center_world() + rel / self.world_size();
        self.set_zoom_level(zoom_level);
        self.set_center_world(fixed - rel / self.world_size());
    }

    /// Returns the visible geographic bounds as (min_lon, min_lat, max_lon, max_lat).
    pub fn visible_bounds(&self) -> (f64, f64, f64, f64) {
        let half = DVec2::new(
            self.screen_rect.width() as f64,
            self.screen_rect.height() as f64,
        ) / (2.0 * self.world_size());
        let center = self.center_world();
        let top_left = unproject(DVec2::new(
            (center.x - half.x).max(0.0),
            (center.y - half.y).max(0.0),
        ));
        let bottom_right = unproject(DVec2::new(
            (center.x + half.x).min(1.0 - f64::EPSILON),
            (center.y + half.y).min(1.0),
        ));
        (top_left.x, bottom_right.y, bottom_right.x, top_left.y)
    }

    /// Checks if a coordinate is within the visible bounds (with margin).
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.visible_bounds();
        coord.x >= min_lon - margin_deg
            && coord.x <= max_lon + margin_deg
            && coord.y >= min_lat - margin_deg
            && coord.y <= max_lat + margin_deg
    }

    /// Checks if a bounding box intersects with the visible bounds.
    pub fn bbox_visible(&self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> bool {
        let (vis_min_lon, vis_min_lat, vis_max_lon, vis_max_lat) = self.visible_bounds();
        !(max_lon < vis_min_lon
            || min_lon > vis_max_lon
            || max_lat < vis_min_lat
            || min_lat > vis_max_lat)
    }
}
