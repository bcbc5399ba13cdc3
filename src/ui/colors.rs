//! Centralized color constants for the UI.

use eframe::egui::Color32;

/// Colors for the map overlay.
pub mod overlay {
    use super::Color32;

    /// Backdrop behind the overlay text.
    pub const BACKGROUND: Color32 = Color32::from_rgba_premultiplied(20, 20, 28, 200);
    /// Overlay labels.
    pub const TEXT: Color32 = Color32::from_rgb(200, 200, 220);
    /// Icons next to the labels.
    pub const ICON: Color32 = Color32::from_rgb(255, 0, 254);
    /// Error message shown when the view failed to build.
    pub const ERROR: Color32 = Color32::from_rgb(255, 80, 80);
}
