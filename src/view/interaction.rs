//! Pointer interaction on the view.

use crate::geo::GeoCoordinates;
use crate::mapview::{LongPressEvent, LongPressHandler, MapView};

/// Sets the initial zoom and returns the long-press handler that reports
/// the geographic position under the pointer.
pub fn add_mouse_event_listener(map_view: &mut MapView, zoom_level: f64) -> LongPressHandler {
    map_view.set_zoom_level(zoom_level);

    LongPressHandler::new(|map_view, event| {
        report_geo_position(map_view, event);
    })
}

/// Logs the position under a long press. Presses that miss the map are
/// ignored.
pub fn report_geo_position(map_view: &MapView, event: LongPressEvent) -> Option<GeoCoordinates> {
    let geo_position = map_view.geo_coordinates_at(event.pos.x, event.pos.y)?;
    log::info!("Long press at {}", geo_position);
    Some(geo_position)
}
