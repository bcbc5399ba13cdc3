//! Errors raised while composing the map view.

/// Errors that can occur while building a [`crate::view::View`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    /// A theme path could not be found among embedded or on-disk resources.
    ThemeNotFound(String),
    /// A theme file was found but is not a valid theme.
    ThemeParse { path: String, message: String },
    /// The `extends` chain of a theme is too deep or loops back on itself.
    ThemeCycle(String),
    /// The GeoJSON overlay could not be parsed.
    GeoJson(String),
    /// A fixture file is malformed.
    Fixture(String),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::ThemeNotFound(path) => write!(f, "Theme not found: {}", path),
            ViewError::ThemeParse { path, message } => {
                write!(f, "Failed to parse theme {}: {}", path, message)
            }
            ViewError::ThemeCycle(path) => write!(f, "Theme extends chain too deep at {}", path),
            ViewError::GeoJson(msg) => write!(f, "Failed to parse GeoJSON: {}", msg),
            ViewError::Fixture(msg) => write!(f, "Invalid fixture: {}", msg),
        }
    }
}

impl std::error::Error for ViewError {}
