//! Geographic primitives: coordinates, projection and GeoJSON features.
//!
//! This module provides functionality for loading geographic features and
//! turning them into styled shapes on the map canvas.

mod coordinates;
mod features;
mod projection;
mod renderer;

pub use coordinates::GeoCoordinates;
pub use features::{FeaturesDataSource, GeoFeature};
pub use projection::MapProjection;
pub use renderer::{sort_draw_commands, style_features, DrawCommand};
