//! Theming: colors, style rules and themes.

mod color;
mod style_set;
mod theme;

pub use color::Color;
pub use style_set::{
    geojson_style_set, FillAttributes, GeometryType, MetricUnit, StyleRule, StyleSet, Technique,
};
pub use theme::{ResolvedTheme, Theme, ThemeLoader, ThemeSource};
