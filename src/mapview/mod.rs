//! Map view: owns the theme, data sources, anchored objects and camera,
//! and paints them onto an egui canvas.

mod anchors;
mod controls;
mod data_source;
mod long_press;

pub use anchors::{BoxGeometry, MapAnchor, MapAnchors, Material, Mesh, Object3D, MAX_RENDER_ORDER};
pub use controls::MapControls;
pub use data_source::{DataSource, VectorTileDataSource};
pub use long_press::{LongPressEvent, LongPressHandler, PointerSample};

use crate::error::ViewError;
use crate::geo::{
    sort_draw_commands, style_features, DrawCommand, FeaturesDataSource, GeoCoordinates,
    MapProjection,
};
use crate::style::{ResolvedTheme, ThemeLoader, ThemeSource};
use eframe::egui::{self, Painter, Pos2, Rect, Sense, Vec2};

/// Drawing surface handle: the egui context the map paints through.
#[derive(Clone)]
pub struct Canvas {
    ctx: egui::Context,
    initial_size: Vec2,
}

impl Canvas {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            initial_size: Vec2::new(800.0, 600.0),
        }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("initial_size", &self.initial_size)
            .finish_non_exhaustive()
    }
}

/// Construction options of a [`MapView`].
#[derive(Debug, Clone)]
pub struct MapViewOptions {
    pub canvas: Canvas,
    pub theme: ThemeSource,
    /// Script that decodes vector tiles off the main thread.
    pub decoder_url: String,
}

pub struct MapView {
    canvas: Canvas,
    theme: ResolvedTheme,
    theme_loader: ThemeLoader,
    decoder_url: String,
    data_sources: Vec<DataSource>,
    /// Objects anchored to geographic positions.
    pub map_anchors: MapAnchors,
    pub(crate) projection: MapProjection,
    pub(crate) controls: Option<MapControls>,
    update_pending: bool,
}

impl MapView {
    /// Creates a map view bound to the canvas, resolving the initial theme.
    pub fn new(options: MapViewOptions) -> Result<Self, ViewError> {
        let theme_loader = ThemeLoader::new();
        let theme = theme_loader.resolve(&options.theme)?;

        // Null island until the camera is pointed somewhere.
        let mut projection = MapProjection::new(0.0, 0.0);
        projection.screen_rect = Rect::from_min_size(Pos2::ZERO, options.canvas.initial_size);

        log::debug!(
            "Created map view (decoder {}, {} style sets)",
            options.decoder_url,
            theme.styles.len()
        );

        Ok(Self {
            canvas: options.canvas,
            theme,
            theme_loader,
            decoder_url: options.decoder_url,
            data_sources: Vec::new(),
            map_anchors: MapAnchors::default(),
            projection,
            controls: None,
            update_pending: false,
        })
    }

    pub fn add_data_source(&mut self, source: impl Into<DataSource>) {
        let source = source.into();
        if let DataSource::VectorTile(tiles) = &source {
            log::debug!(
                "Vector tiles from {} ({}), decoded by {}",
                tiles.base_url,
                if tiles.authentication_code.is_some() {
                    "authenticated"
                } else {
                    "unauthenticated"
                },
                self.decoder_url
            );
        }
        log::debug!("Added {} data source", source.name());
        self.data_sources.push(source);
    }

    /// Replaces the current theme.
    pub fn set_theme(&mut self, source: &ThemeSource) -> Result<(), ViewError> {
        self.theme = self.theme_loader.resolve(source)?;
        log::info!(
            "Applied theme with style sets: {:?}",
            self.theme.styles.keys().collect::<Vec<_>>()
        );
        Ok(())
    }

    pub fn zoom_level(&self) -> f64 {
        self.projection.zoom_level
    }

    pub fn set_zoom_level(&mut self, zoom_level: f64) {
        self.projection.set_zoom_level(zoom_level);
    }

    /// Centers the camera on the given position.
    pub fn look_at(&mut self, target: GeoCoordinates) {
        self.projection.center_lat = target.latitude;
        self.projection.center_lon = target.longitude;
    }

    pub fn camera_target(&self) -> GeoCoordinates {
        GeoCoordinates::new(self.projection.center_lat, self.projection.center_lon, None)
    }

    /// Geographic position under a canvas pixel, or `None` if the pixel
    /// does not hit the map.
    pub fn geo_coordinates_at(&self, x: f32, y: f32) -> Option<GeoCoordinates> {
        self.projection
            .screen_to_geo(Pos2::new(x, y))
            .map(GeoCoordinates::from)
    }

    /// Requests a redraw of the canvas.
    pub fn update(&mut self) {
        if !self.update_pending {
            self.update_pending = true;
            self.canvas.context().request_repaint();
        }
    }

    /// Draw commands for the current frame, sorted by render order.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();

        for source in &self.data_sources {
            if let DataSource::Features(features) = source {
                self.feature_commands(features, &mut commands);
            }
        }
        self.map_anchors
            .draw_commands(&self.projection, &mut commands);

        sort_draw_commands(&mut commands);
        commands
    }

    fn feature_commands(&self, source: &FeaturesDataSource, out: &mut Vec<DrawCommand>) {
        match self.theme.style_set(source.style_set_name()) {
            Some(style_set) => style_features(source.features(), style_set, &self.projection, out),
            None => log::trace!("No style set named {}", source.style_set_name()),
        }
    }

    /// Paints the map into `painter`, clipped to its rectangle.
    pub fn render(&mut self, painter: &Painter) {
        painter.rect_filled(painter.clip_rect(), 0.0, self.theme.clear_color);
        painter.extend(self.draw_commands().into_iter().map(|c| c.shape));
        self.update_pending = false;
    }

    /// Allocates the canvas area, applies controls and paints the map.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        self.projection.screen_rect = response.rect;

        if let Some(controls) = self.controls.clone() {
            controls.handle(&response, self);
        }

        self.render(&painter);
        response
    }
}

#[cfg(test)]
impl MapView {
    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    pub fn decoder_url(&self) -> &str {
        &self.decoder_url
    }

    pub fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    pub fn is_update_pending(&self) -> bool {
        self.update_pending
    }
}
