//! View settings.
//!
//! Settings are read from `trainmap.json` in the working directory on
//! native targets and from localStorage on the web. Missing fields take
//! their default values.

use crate::geo::GeoCoordinates;
use serde::{Deserialize, Serialize};

/// Configuration of the map view and its markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewSettings {
    /// Theme used when the caller does not supply one.
    pub default_theme: String,
    /// Theme the GeoJSON styling extends.
    pub effects_theme: String,
    /// Script that decodes vector tiles.
    pub decoder_url: String,
    /// Style set name the GeoJSON overlay is bound to.
    pub style_set_name: String,
    pub initial_zoom_level: f64,
    /// Camera target before any interaction.
    pub initial_center: GeoCoordinates,
    /// Altitude in meters at which markers float above ground.
    pub anchor_altitude: f64,
    /// Edge length of a marker cube in meters.
    pub cube_scale: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_theme: "resources/berlin_tilezen_base.json".to_string(),
            effects_theme: "resources/berlin_tilezen_effects_outlines.json".to_string(),
            decoder_url: "decoder.bundle.js".to_string(),
            style_set_name: "geojson".to_string(),
            initial_zoom_level: 15.5,
            // Utrecht Centraal
            initial_center: GeoCoordinates::new(52.0894, 5.1100, None),
            anchor_altitude: 50.0,
            cube_scale: 400.0,
        }
    }
}

impl ViewSettings {
    /// File name used on native targets.
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_NAME: &'static str = "trainmap.json";

    /// localStorage key used on the web.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "trainmap_settings";

    /// Parses settings JSON, falling back to defaults on error.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse view settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from `trainmap.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => {
                log::info!("Loaded view settings from {}", Self::FILE_NAME);
                Self::from_json(&json)
            }
            Err(_) => Self::default(),
        }
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(s))) => s,
            _ => return Self::default(),
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                log::info!("Loaded view settings from localStorage");
                Self::from_json(&json)
            }
            _ => Self::default(),
        }
    }
}
