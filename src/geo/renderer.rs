//! Styled feature rendering.
//!
//! Turns features into egui shapes according to the rules of a style set.
//! Shapes are tagged with the rule's render order so the caller can merge
//! them with other draw calls before painting.

use super::{GeoFeature, MapProjection};
use crate::style::{MetricUnit, StyleRule, StyleSet, Technique};
use eframe::egui::{epaint::PathShape, Color32, Pos2, Shape, Stroke};
use geo_types::Coord;

/// A shape waiting to be painted, ordered by `render_order`.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub render_order: i64,
    pub shape: Shape,
}

/// Sorts commands by render order. The sort is stable, so commands with
/// equal order keep the sequence in which they were produced.
pub fn sort_draw_commands(commands: &mut [DrawCommand]) {
    commands.sort_by_key(|c| c.render_order);
}

/// Produces draw commands for all features using the matching rules of
/// `style_set`. Rules are applied in list order for every feature.
pub fn style_features(
    features: &[GeoFeature],
    style_set: &StyleSet,
    projection: &MapProjection,
    out: &mut Vec<DrawCommand>,
) {
    for feature in features {
        if !feature_visible(feature, projection) {
            continue;
        }
        for rule in style_set.matching(feature.geometry_type()) {
            render_feature(feature, rule, projection, out);
        }
    }
}

fn line_width_px(width: f32, unit: MetricUnit, projection: &MapProjection) -> f32 {
    match unit {
        MetricUnit::Pixel => width,
        MetricUnit::Meter => {
            (width as f64 / projection.meters_per_pixel(projection.center_lat)) as f32
        }
    }
}

fn render_feature(
    feature: &GeoFeature,
    rule: &StyleRule,
    projection: &MapProjection,
    out: &mut Vec<DrawCommand>,
) {
    let mut push = |shape: Shape| {
        out.push(DrawCommand {
            render_order: rule.render_order,
            shape,
        })
    };

    match (&rule.technique, feature) {
        (Technique::Fill(attr), GeoFeature::Polygon { exterior, .. }) => {
            let fill = fill_color(attr.color, attr.transparent, attr.opacity);
            push(fill_shape(exterior, projection, fill, outline(attr)));
        }
        (Technique::Fill(attr), GeoFeature::MultiPolygon { polygons, .. }) => {
            let fill = fill_color(attr.color, attr.transparent, attr.opacity);
            for (exterior, _holes) in polygons {
                push(fill_shape(exterior, projection, fill, outline(attr)));
            }
        }
        (Technique::SolidLine(attr), GeoFeature::Polygon { exterior, holes, .. }) => {
            let stroke = Stroke::new(
                line_width_px(attr.line_width, attr.metric_unit, projection),
                Color32::from(attr.color),
            );
            push(line_shape(exterior, projection, stroke, true));
            for hole in holes {
                push(line_shape(hole, projection, stroke, true));
            }
        }
        (Technique::SolidLine(attr), GeoFeature::MultiPolygon { polygons, .. }) => {
            let stroke = Stroke::new(
                line_width_px(attr.line_width, attr.metric_unit, projection),
                Color32::from(attr.color),
            );
            for (exterior, holes) in polygons {
                push(line_shape(exterior, projection, stroke, true));
                for hole in holes {
                    push(line_shape(hole, projection, stroke, true));
                }
            }
        }
        (Technique::SolidLine(attr), GeoFeature::LineString(coords)) => {
            let stroke = Stroke::new(
                line_width_px(attr.line_width, attr.metric_unit, projection),
                Color32::from(attr.color),
            );
            push(line_shape(coords, projection, stroke, false));
        }
        (Technique::SolidLine(attr), GeoFeature::MultiLineString(lines)) => {
            let stroke = Stroke::new(
                line_width_px(attr.line_width, attr.metric_unit, projection),
                Color32::from(attr.color),
            );
            for coords in lines {
                push(line_shape(coords, projection, stroke, false));
            }
        }
        (Technique::Circles(attr), GeoFeature::Point(coord, _label)) => {
            let pos = projection.geo_to_screen(*coord);
            push(Shape::circle_filled(
                pos,
                attr.size / 2.0,
                Color32::from(attr.color),
            ));
        }
        // Techniques that do not apply to the geometry draw nothing.
        _ => log::trace!(
            "{} does not apply to {:?}",
            rule.technique.name(),
            feature.geometry_type()
        ),
    }
}

fn fill_color(color: crate::style::Color, transparent: bool, opacity: f32) -> Color32 {
    if transparent {
        color.with_opacity(opacity)
    } else {
        Color32::from(color)
    }
}

fn outline(attr: &crate::style::FillAttributes) -> Stroke {
    match attr.line_color {
        Some(color) if attr.line_width > 0.0 => Stroke::new(attr.line_width, Color32::from(color)),
        _ => Stroke::NONE,
    }
}

fn screen_points(coords: &[Coord<f64>], projection: &MapProjection) -> Vec<Pos2> {
    coords.iter().map(|c| projection.geo_to_screen(*c)).collect()
}

fn fill_shape(
    exterior: &[Coord<f64>],
    projection: &MapProjection,
    fill: Color32,
    stroke: Stroke,
) -> Shape {
    let mut points = screen_points(exterior, projection);
    // GeoJSON rings repeat the first position at the end.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Shape::Path(PathShape::convex_polygon(points, fill, stroke))
}

fn line_shape(
    coords: &[Coord<f64>],
    projection: &MapProjection,
    stroke: Stroke,
    closed: bool,
) -> Shape {
    let points = screen_points(coords, projection);
    if closed {
        Shape::closed_line(points, stroke)
    } else {
        Shape::line(points, stroke)
    }
}

/// Quick bounding box check against the visible area.
fn feature_visible(feature: &GeoFeature, projection: &MapProjection) -> bool {
    let coords: Box<dyn Iterator<Item = &Coord<f64>>> = match feature {
        GeoFeature::Point(coord, _) => return projection.is_visible(*coord, 0.01),
        GeoFeature::LineString(coords) => Box::new(coords.iter()),
        GeoFeature::MultiLineString(lines) => Box::new(lines.iter().flatten()),
        GeoFeature::Polygon { exterior, .. } => Box::new(exterior.iter()),
        GeoFeature::MultiPolygon { polygons, .. } => {
            Box::new(polygons.iter().flat_map(|(exterior, _)| exterior.iter()))
        }
    };

    let (min_lon, max_lon, min_lat, max_lat) = coords.fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), c| {
            (
                min_x.min(c.x),
                max_x.max(c.x),
                min_y.min(c.y),
                max_y.max(c.y),
            )
        },
    );
    if min_lon > max_lon {
        return false;
    }

    projection.bbox_visible(min_lon, min_lat, max_lon, max_lat)
}
