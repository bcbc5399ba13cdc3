//! Info overlay drawn on top of the map.

use super::colors::overlay;
use crate::mapview::MapView;
use eframe::egui::{self, Pos2, Rect, RichText, Vec2};
use egui_phosphor::regular;

/// Overlay rows as (icon, text) pairs.
fn overlay_lines(map_view: &MapView, pointer: Option<Pos2>) -> Vec<(&'static str, String)> {
    let target = map_view.camera_target();
    let mut lines = vec![
        (
            regular::MAGNIFYING_GLASS,
            format!("Zoom: {:.1}", map_view.zoom_level()),
        ),
        (
            regular::CROSSHAIR,
            format!("Center: {:.4}, {:.4}", target.latitude, target.longitude),
        ),
        (
            regular::CUBE,
            format!("Trains: {}", map_view.map_anchors.len()),
        ),
    ];

    if let Some(geo) = pointer.and_then(|p| map_view.geo_coordinates_at(p.x, p.y)) {
        lines.push((
            regular::MAP_PIN,
            format!("{:.5}, {:.5}", geo.latitude, geo.longitude),
        ));
    }

    lines
}

pub fn draw_overlay_info(ui: &mut egui::Ui, rect: &Rect, map_view: &MapView) {
    let pointer = ui
        .input(|i| i.pointer.hover_pos())
        .filter(|p| rect.contains(*p));
    let lines = overlay_lines(map_view, pointer);

    let overlay_pos = rect.left_top() + Vec2::new(10.0, 10.0);
    let overlay_rect = Rect::from_min_size(overlay_pos, Vec2::new(190.0, 18.0 * lines.len() as f32));
    ui.painter()
        .rect_filled(overlay_rect.expand(4.0), 4.0, overlay::BACKGROUND);

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            for (icon, text) in lines {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icon).size(12.0).color(overlay::ICON));
                    ui.label(
                        RichText::new(text)
                            .monospace()
                            .size(12.0)
                            .color(overlay::TEXT),
                    );
                });
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoCoordinates;
    use crate::mapview::{Canvas, MapViewOptions};
    use crate::style::Theme;

    fn map_view() -> MapView {
        let mut map_view = MapView::new(MapViewOptions {
            canvas: Canvas::new(egui::Context::default()),
            theme: Theme::default().into(),
            decoder_url: "decoder.bundle.js".to_string(),
        })
        .unwrap();
        map_view.look_at(GeoCoordinates::new(52.0894, 5.11, None));
        map_view.set_zoom_level(15.5);
        map_view
    }

    #[test]
    fn test_lines_without_pointer() {
        let lines = overlay_lines(&map_view(), None);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].1, "Zoom: 15.5");
        assert_eq!(lines[1].1, "Center: 52.0894, 5.1100");
        assert_eq!(lines[2].1, "Trains: 0");
    }

    #[test]
    fn test_pointer_position_line() {
        let lines = overlay_lines(&map_view(), Some(Pos2::new(400.0, 300.0)));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], (regular::MAP_PIN, "52.08940, 5.11000".to_string()));
    }
}
