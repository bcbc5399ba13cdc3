//! Pan and zoom controls for the map canvas.

use super::MapView;
use eframe::egui;

/// Zoom levels gained per scrolled point.
const SCROLL_ZOOM_SPEED: f64 = 0.002;

/// Mouse and touch navigation: drag to pan, scroll to zoom around the
/// cursor, double-click to zoom in one level at the clicked point.
#[derive(Debug, Clone)]
pub struct MapControls {
    pub enabled: bool,
    pub double_click_zoom_step: f64,
}

impl Default for MapControls {
    fn default() -> Self {
        Self {
            enabled: true,
            double_click_zoom_step: 1.0,
        }
    }
}

impl MapControls {
    /// Attaches controls to the map view.
    pub fn create(map_view: &mut MapView) {
        map_view.controls = Some(Self::default());
    }

    /// Applies this frame's canvas interaction. Returns true if the camera moved.
    pub fn handle(&self, response: &egui::Response, map_view: &mut MapView) -> bool {
        if !self.enabled {
            return false;
        }
        let mut moved = false;

        // Handle dragging for panning
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                map_view.projection.pan_by(delta);
                moved = true;
            }
        }

        // Handle scroll for zooming relative to cursor position
        if response.hovered() {
            let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
            if scroll_delta.y != 0.0 {
                let anchor = response
                    .hover_pos()
                    .unwrap_or_else(|| response.rect.center());
                let zoom = map_view.zoom_level() + scroll_delta.y as f64 * SCROLL_ZOOM_SPEED;
                map_view.projection.zoom_around(zoom, anchor);
                moved = true;
            }
        }

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let zoom = map_view.zoom_level() + self.double_click_zoom_step;
                map_view.projection.zoom_around(zoom, pos);
                moved = true;
            }
        }

        moved
    }
}
