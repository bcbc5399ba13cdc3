//! 3D objects anchored to geographic positions.
//!
//! Geometry and materials are reference counted so many objects can share
//! them. Materials expose no mutators: a shared material looks the same on
//! every object that uses it.

use crate::geo::{DrawCommand, GeoCoordinates, MapProjection};
use crate::style::Color;
use eframe::egui::{epaint::RectShape, Color32, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2};
use std::rc::Rc;

/// Highest render order; meshes with this order are drawn last.
pub const MAX_RENDER_ORDER: i64 = i64::MAX;

/// Axis-aligned box, dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoxGeometry {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn cube(edge: f64) -> Self {
        Self::new(edge, edge, edge)
    }
}

/// Surface appearance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    color: Color,
    opacity: f32,
    transparent: bool,
    depth_test: bool,
}

impl Material {
    /// Opaque, depth-tested material.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            depth_test: true,
        }
    }

    /// Makes the material transparent with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }
}

/// A geometry drawn with a material at a given render order.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Rc<BoxGeometry>,
    pub material: Rc<Material>,
    pub render_order: i64,
}

impl Mesh {
    pub fn new(geometry: Rc<BoxGeometry>, material: Rc<Material>) -> Self {
        Self {
            geometry,
            material,
            render_order: 0,
        }
    }
}

/// A group of meshes positioned together.
#[derive(Debug, Clone, Default)]
pub struct Object3D {
    children: Vec<Mesh>,
}

impl Object3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.children.push(mesh);
    }

    pub fn children(&self) -> &[Mesh] {
        &self.children
    }
}

/// An object bound to a world position.
#[derive(Debug, Clone)]
pub struct MapAnchor {
    pub object: Object3D,
    pub anchor: GeoCoordinates,
}

impl MapAnchor {
    pub fn new(object: Object3D, anchor: GeoCoordinates) -> Self {
        Self { object, anchor }
    }
}

/// Anchored objects of a map view, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MapAnchors {
    anchors: Vec<MapAnchor>,
}

impl MapAnchors {
    pub fn add(&mut self, anchor: MapAnchor) {
        self.anchors.push(anchor);
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapAnchor> {
        self.anchors.iter()
    }

    /// Produces one draw command per mesh of every visible anchor.
    ///
    /// The camera looks straight down, so a box shows as its footprint;
    /// altitude does not move it on screen.
    pub fn draw_commands(&self, projection: &MapProjection, out: &mut Vec<DrawCommand>) {
        for anchor in self.iter() {
            let coord = anchor.anchor.to_coord();
            if !projection.is_visible(coord, 0.05) {
                continue;
            }
            let center = projection.geo_to_screen(coord);
            let meters_per_pixel = projection.meters_per_pixel(anchor.anchor.latitude);

            for mesh in anchor.object.children() {
                let size = Vec2::new(
                    (mesh.geometry.width / meters_per_pixel) as f32,
                    (mesh.geometry.depth / meters_per_pixel) as f32,
                );
                out.push(DrawCommand {
                    render_order: mesh.render_order,
                    shape: footprint(center, size, &mesh.material),
                });
            }
        }
    }
}

fn footprint(center: Pos2, size: Vec2, material: &Material) -> Shape {
    let fill = if material.transparent() {
        material.color().with_opacity(material.opacity())
    } else {
        material.color().into()
    };
    // Depth-tested passes get a thin edge so the box reads as solid.
    let stroke = if material.depth_test() {
        Stroke::new(1.0, Color32::from(material.color()))
    } else {
        Stroke::NONE
    };
    Shape::Rect(RectShape::new(
        Rect::from_center_size(center, size),
        0.0,
        fill,
        stroke,
        StrokeKind::Inside,
    ))
}
