#![warn(clippy::all)]

//! Train Map - a map of the Netherlands with live train positions.
//!
//! The map shows a vector-tile base map, a styled GeoJSON overlay and a
//! pink cube floating above every train. Long-pressing the map logs the
//! geographic position under the pointer.

mod error;
mod fixtures;
mod geo;
mod mapview;
mod settings;
mod style;
mod ui;
mod view;

use eframe::egui;
use error::ViewError;
use mapview::Canvas;
use settings::ViewSettings;
use view::{View, ViewParameters};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Train Map",
        native_options,
        Box::new(|cc| Ok(Box::new(TrainMapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to attach to");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("app_canvas")
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("app_canvas is missing or not a HtmlCanvasElement");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(TrainMapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Application shell around the map view.
pub struct TrainMapApp {
    /// The map view, or the reason it could not be built
    view: Result<View, ViewError>,
}

impl TrainMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut params = ViewParameters::new(Canvas::new(cc.egui_ctx.clone()));
        params.settings = ViewSettings::load();

        let view = View::new(params);
        match &view {
            Ok(view) => log::info!(
                "Map view ready with theme {} and {} train markers",
                view.theme(),
                view.map_view().map_anchors.len()
            ),
            Err(e) => log::error!("Failed to create map view: {}", e),
        }

        Self { view }
    }
}

impl eframe::App for TrainMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| match &mut self.view {
                Ok(view) => {
                    let response = view.show(ui);
                    ui::draw_overlay_info(ui, &response.rect, view.map_view());
                }
                Err(e) => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(format!("Failed to create map view: {}", e))
                                .color(ui::overlay_colors::ERROR),
                        );
                    });
                }
            });
    }
}
