//! The train map view.
//!
//! Builds a map view from a theme, a vector-tile base map, a styled
//! GeoJSON overlay and one cube marker per train, then wires up the
//! long-press handler.

mod interaction;
mod marker;

pub use interaction::add_mouse_event_listener;
pub use marker::CubeFactory;

use crate::error::ViewError;
use crate::fixtures::{Fixtures, TrainFixture};
use crate::geo::{FeaturesDataSource, GeoCoordinates};
use crate::mapview::{
    Canvas, LongPressHandler, MapAnchor, MapControls, MapView, MapViewOptions, Object3D,
    PointerSample, VectorTileDataSource,
};
use crate::settings::ViewSettings;
use crate::style::{geojson_style_set, Theme, ThemeSource};
use eframe::egui;
use std::collections::BTreeMap;

/// Input of [`View::new`].
#[derive(Debug, Clone)]
pub struct ViewParameters {
    /// Theme to start with; `None` uses `settings.default_theme`.
    pub theme: Option<ThemeSource>,
    pub canvas: Canvas,
    pub fixtures: Fixtures,
    pub settings: ViewSettings,
}

impl ViewParameters {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            theme: None,
            canvas,
            fixtures: Fixtures::default(),
            settings: ViewSettings::default(),
        }
    }
}

pub struct View {
    theme: ThemeSource,
    settings: ViewSettings,
    cube_factory: CubeFactory,
    map_view: MapView,
    /// Set once initialization has finished.
    long_press: Option<LongPressHandler>,
}

impl View {
    pub fn new(args: ViewParameters) -> Result<Self, ViewError> {
        let ViewParameters {
            theme,
            canvas,
            fixtures,
            settings,
        } = args;
        let theme = theme.unwrap_or_else(|| ThemeSource::Path(settings.default_theme.clone()));

        let map_view = MapView::new(MapViewOptions {
            canvas,
            theme: theme.clone(),
            decoder_url: settings.decoder_url.clone(),
        })?;

        let mut view = Self {
            cube_factory: CubeFactory::new(settings.cube_scale),
            theme,
            settings,
            map_view,
            long_press: None,
        };
        view.initialize(&fixtures)?;
        view.long_press = Some(add_mouse_event_listener(
            &mut view.map_view,
            view.settings.initial_zoom_level,
        ));

        Ok(view)
    }

    /// The theme the view was created with, as given.
    pub fn theme(&self) -> &ThemeSource {
        &self.theme
    }

    pub fn map_view(&self) -> &MapView {
        &self.map_view
    }

    pub fn create_pink_cube(&self) -> Object3D {
        self.cube_factory.create_pink_cube()
    }

    /// Feeds a pointer sample to the long-press handler.
    pub fn on_pointer(&mut self, sample: PointerSample) {
        if let Some(long_press) = &mut self.long_press {
            long_press.on_pointer(&self.map_view, sample);
        }
    }

    /// Paints the map into the remaining space of `ui` and processes input.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let response = self.map_view.show(ui);

        let pressed_on_map = response.is_pointer_button_down_on();
        let sample = ui.input(|i| PointerSample {
            time: i.time,
            pos: i.pointer.latest_pos(),
            down: pressed_on_map && i.pointer.primary_down(),
        });
        self.on_pointer(sample);

        // Keep frames coming while a press is being timed.
        if self.long_press.as_ref().is_some_and(|l| l.is_pressing()) {
            ui.ctx().request_repaint();
        }

        response
    }

    fn initialize(&mut self, fixtures: &Fixtures) -> Result<(), ViewError> {
        log::info!("Initializing map view with theme {}", self.theme);
        self.map_view.look_at(self.settings.initial_center);

        self.map_view
            .add_data_source(VectorTileDataSource::from_env());

        MapControls::create(&mut self.map_view);

        let mut styles = BTreeMap::new();
        styles.insert(self.settings.style_set_name.clone(), geojson_style_set());
        let custom_theme = Theme {
            extends: Some(ThemeSource::Path(self.settings.effects_theme.clone())),
            clear_color: None,
            styles,
        };
        self.map_view.set_theme(&custom_theme.into())?;

        let mut features = FeaturesDataSource::new(self.settings.style_set_name.clone());
        features.set_from_geojson(&fixtures.geojson)?;
        self.map_view.add_data_source(features);

        let trains = TrainFixture::parse(&fixtures.trains)?;
        for train in &trains.treinen {
            let Some(geo_position) = GeoCoordinates::from_geo_point(&[train.lng, train.lat])
            else {
                continue;
            };
            let geo_position = geo_position.with_altitude(self.settings.anchor_altitude);
            log::info!("Anchoring cube at {}", geo_position);

            let cube = self.create_pink_cube();
            self.map_view
                .map_anchors
                .add(MapAnchor::new(cube, geo_position));
        }
        if self.map_view.map_anchors.is_empty() {
            log::warn!("No train positions to show");
        } else {
            log::info!("Placed {} train markers", self.map_view.map_anchors.len());
        }

        self.map_view.update();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::interaction::report_geo_position;
    use super::*;
    use crate::mapview::{DataSource, LongPressEvent};
    use eframe::egui::Pos2;
    use std::borrow::Cow;

    fn params() -> ViewParameters {
        ViewParameters::new(Canvas::new(egui::Context::default()))
    }

    fn with_trains(trains: &'static str) -> ViewParameters {
        let mut params = params();
        params.fixtures.trains = Cow::Borrowed(trains);
        params
    }

    #[test]
    fn test_default_theme_resolved() {
        let view = View::new(params()).unwrap();
        assert_eq!(
            view.theme(),
            &ThemeSource::Path("resources/berlin_tilezen_base.json".to_string())
        );
    }

    #[test]
    fn test_explicit_theme_kept_unmodified() {
        let mut p = params();
        let theme = Theme {
            clear_color: crate::style::Color::from_hex("#101010"),
            ..Default::default()
        };
        p.theme = Some(theme.clone().into());
        let view = View::new(p).unwrap();
        assert_eq!(view.theme(), &ThemeSource::from(theme));

        let mut p = params();
        p.theme = Some("resources/berlin_tilezen_effects_outlines.json".into());
        let view = View::new(p).unwrap();
        assert_eq!(
            view.theme(),
            &ThemeSource::Path("resources/berlin_tilezen_effects_outlines.json".to_string())
        );
    }

    #[test]
    fn test_bad_theme_propagates() {
        let mut p = params();
        p.theme = Some("resources/nope.json".into());
        assert!(matches!(View::new(p), Err(ViewError::ThemeNotFound(_))));
    }

    #[test]
    fn test_one_marker_per_train_in_order() {
        let view = View::new(with_trains(
            r#"{ "treinen": [{ "lng": 10, "lat": 20 }, { "lng": 30, "lat": 40 }] }"#,
        ))
        .unwrap();

        let anchors: Vec<GeoCoordinates> = view
            .map_view()
            .map_anchors
            .iter()
            .map(|a| a.anchor)
            .collect();
        assert_eq!(
            anchors,
            vec![
                GeoCoordinates::new(20.0, 10.0, Some(50.0)),
                GeoCoordinates::new(40.0, 30.0, Some(50.0)),
            ]
        );
        for anchor in view.map_view().map_anchors.iter() {
            assert_eq!(anchor.object.children().len(), 2);
        }
    }

    #[test]
    fn test_embedded_fixture_markers_float() {
        let view = View::new(params()).unwrap();
        let trains = TrainFixture::parse(&Fixtures::default().trains).unwrap();

        assert_eq!(view.map_view().map_anchors.len(), trains.treinen.len());
        for anchor in view.map_view().map_anchors.iter() {
            assert_eq!(anchor.anchor.altitude, Some(50.0));
        }
    }

    #[test]
    fn test_empty_train_list() {
        let view = View::new(with_trains(r#"{ "treinen": [] }"#)).unwrap();
        assert!(view.map_view().map_anchors.is_empty());
    }

    #[test]
    fn test_malformed_fixtures_propagate() {
        let view = View::new(with_trains(r#"{ "treinen": [{ "lat": 1 }] }"#));
        assert!(matches!(view, Err(ViewError::Fixture(_))));

        let mut p = params();
        p.fixtures.geojson = Cow::Borrowed("not geojson");
        assert!(matches!(View::new(p), Err(ViewError::GeoJson(_))));
    }

    #[test]
    fn test_composition() {
        let view = View::new(params()).unwrap();
        let map_view = view.map_view();

        assert_eq!(map_view.zoom_level(), 15.5);
        assert_eq!(map_view.decoder_url(), "decoder.bundle.js");
        assert!(map_view.controls.is_some());
        assert!(map_view.is_update_pending());
        assert_eq!(
            map_view.theme().style_set("geojson"),
            Some(&geojson_style_set())
        );

        let sources = map_view.data_sources();
        assert_eq!(sources.len(), 2);
        assert!(matches!(sources[0], DataSource::VectorTile(_)));
        match &sources[1] {
            DataSource::Features(features) => {
                assert_eq!(features.style_set_name(), "geojson");
                assert!(!features.features().is_empty());
            }
            other => panic!("expected features source, got {:?}", other),
        }
    }

    #[test]
    fn test_long_press_off_map_is_silent() {
        let mut view = View::new(params()).unwrap();

        // Far above the top edge of the Mercator world.
        let pos = Pos2::new(400.0, -1.0e8);
        assert_eq!(
            report_geo_position(view.map_view(), LongPressEvent { pos }),
            None
        );

        // Driving the full gesture must not panic either.
        for (time, down) in [(0.0, true), (0.6, true), (0.7, false)] {
            view.on_pointer(PointerSample {
                time,
                pos: Some(pos),
                down,
            });
        }
    }

    #[test]
    fn test_long_press_reports_position() {
        let view = View::new(params()).unwrap();
        let geo = report_geo_position(
            view.map_view(),
            LongPressEvent {
                pos: Pos2::new(400.0, 300.0),
            },
        )
        .unwrap();
        assert!((geo.latitude - 52.0894).abs() < 1e-6);
        assert!((geo.longitude - 5.11).abs() < 1e-6);
    }

    #[test]
    fn test_long_press_adds_no_markers() {
        let mut view = View::new(params()).unwrap();
        let before = view.map_view().map_anchors.len();
        for (time, down) in [(0.0, true), (0.6, true), (0.7, false)] {
            view.on_pointer(PointerSample {
                time,
                pos: Some(Pos2::new(400.0, 300.0)),
                down,
            });
        }
        assert_eq!(view.map_view().map_anchors.len(), before);
    }

    #[test]
    fn test_create_pink_cube_from_view() {
        let view = View::new(params()).unwrap();
        assert_eq!(view.create_pink_cube().children().len(), 2);
    }
}
