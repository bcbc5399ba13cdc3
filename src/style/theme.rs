//! Themes: a background color plus named style sets, optionally extending
//! another theme.
//!
//! Themes are referenced either by path or given inline. Paths are looked
//! up among the embedded `resources/` first and, on native targets, on disk.

use super::{Color, StyleSet};
use crate::error::ViewError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Clear color used when no theme in the chain sets one.
pub const DEFAULT_CLEAR_COLOR: Color = Color::rgb(0xef, 0xe9, 0xe1);

/// Maximum length of an `extends` chain.
const MAX_EXTENDS_DEPTH: usize = 8;

/// Themes shipped with the application, keyed by their resource path.
static EMBEDDED_THEMES: &[(&str, &str)] = &[
    (
        "resources/berlin_tilezen_base.json",
        include_str!("../../resources/berlin_tilezen_base.json"),
    ),
    (
        "resources/berlin_tilezen_effects_outlines.json",
        include_str!("../../resources/berlin_tilezen_effects_outlines.json"),
    ),
];

/// A theme given either by path or as a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSource {
    Path(String),
    Inline(Box<Theme>),
}

impl std::fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeSource::Path(path) => write!(f, "{}", path),
            ThemeSource::Inline(_) => write!(f, "<inline>"),
        }
    }
}

impl From<&str> for ThemeSource {
    fn from(path: &str) -> Self {
        ThemeSource::Path(path.to_string())
    }
}

impl From<String> for ThemeSource {
    fn from(path: String) -> Self {
        ThemeSource::Path(path)
    }
}

impl From<Theme> for ThemeSource {
    fn from(theme: Theme) -> Self {
        ThemeSource::Inline(Box::new(theme))
    }
}

/// Structured theme description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<ThemeSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_color: Option<Color>,
    /// Style sets keyed by the name data sources refer to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, StyleSet>,
}

/// A theme with its `extends` chain flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub clear_color: Color,
    pub styles: BTreeMap<String, StyleSet>,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            styles: BTreeMap::new(),
        }
    }
}

impl ResolvedTheme {
    pub fn style_set(&self, name: &str) -> Option<&StyleSet> {
        self.styles.get(name)
    }
}

/// Loads theme files by path.
#[derive(Debug, Clone, Default)]
pub struct ThemeLoader;

impl ThemeLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads and parses the theme at `path`.
    pub fn load(&self, path: &str) -> Result<Theme, ViewError> {
        let text = self.read(path)?;
        serde_json::from_str(&text).map_err(|e| ViewError::ThemeParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn read(&self, path: &str) -> Result<String, ViewError> {
        if let Some((_, text)) = EMBEDDED_THEMES.iter().find(|(p, _)| *p == path) {
            return Ok((*text).to_string());
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::fs::read_to_string(path).map_err(|e| {
                log::debug!("Reading theme {} failed: {}", path, e);
                ViewError::ThemeNotFound(path.to_string())
            })
        }

        #[cfg(target_arch = "wasm32")]
        {
            Err(ViewError::ThemeNotFound(path.to_string()))
        }
    }

    /// Resolves a theme source, following `extends` until a theme without
    /// a base is reached. Values of derived themes win over their bases and
    /// a style group replaces the base's group of the same name.
    pub fn resolve(&self, source: &ThemeSource) -> Result<ResolvedTheme, ViewError> {
        let mut chain: Vec<Theme> = Vec::new();
        let mut next = Some(source.clone());

        while let Some(source) = next {
            if chain.len() == MAX_EXTENDS_DEPTH {
                return Err(ViewError::ThemeCycle(source.to_string()));
            }
            let theme = match source {
                ThemeSource::Path(path) => self.load(&path)?,
                ThemeSource::Inline(theme) => *theme,
            };
            next = theme.extends.clone();
            chain.push(theme);
        }

        let mut resolved = ResolvedTheme::default();
        for theme in chain.into_iter().rev() {
            if let Some(color) = theme.clear_color {
                resolved.clear_color = color;
            }
            resolved.styles.extend(theme.styles);
        }
        Ok(resolved)
    }
}
