//! Pink cube markers.

use crate::mapview::{BoxGeometry, Material, Mesh, Object3D, MAX_RENDER_ORDER};
use crate::style::Color;
use std::rc::Rc;

pub const CUBE_COLOR: Color = Color::rgb(0xff, 0x00, 0xfe);

/// Builds cube markers that all share one geometry and two materials.
#[derive(Debug, Clone)]
pub struct CubeFactory {
    geometry: Rc<BoxGeometry>,
    pre_pass_material: Rc<Material>,
    material: Rc<Material>,
}

impl CubeFactory {
    /// `scale` is the cube edge length in meters.
    pub fn new(scale: f64) -> Self {
        Self {
            geometry: Rc::new(BoxGeometry::cube(scale)),
            pre_pass_material: Rc::new(
                Material::new(CUBE_COLOR)
                    .with_opacity(0.3)
                    .with_depth_test(false),
            ),
            material: Rc::new(Material::new(CUBE_COLOR).with_opacity(0.9)),
        }
    }

    /// Creates a cube drawn in two passes so it stays locatable behind
    /// other geometry:
    /// 1. semi-transparent without depth test (whole cube, always visible)
    /// 2. almost opaque with depth test (only the un-occluded part)
    pub fn create_pink_cube(&self) -> Object3D {
        let mut cube = Object3D::new();

        let mut pre_pass_mesh = Mesh::new(self.geometry.clone(), self.pre_pass_material.clone());
        pre_pass_mesh.render_order = MAX_RENDER_ORDER - 1;
        cube.add(pre_pass_mesh);

        let mut mesh = Mesh::new(self.geometry.clone(), self.material.clone());
        mesh.render_order = MAX_RENDER_ORDER;
        cube.add(mesh);

        cube
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_two_passes() {
        let factory = CubeFactory::new(400.0);
        let cube = factory.create_pink_cube();
        let meshes = cube.children();
        assert_eq!(meshes.len(), 2);

        let (pre_pass, main) = (&meshes[0], &meshes[1]);
        assert_eq!(pre_pass.render_order, main.render_order - 1);
        assert_eq!(main.render_order, MAX_RENDER_ORDER);
        assert!(!pre_pass.material.depth_test());
        assert!(main.material.depth_test());
        assert!((pre_pass.material.opacity() - 0.3).abs() < f32::EPSILON);
        assert!((main.material.opacity() - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cubes_share_geometry_and_materials() {
        let factory = CubeFactory::new(400.0);
        let a = factory.create_pink_cube();
        let b = factory.create_pink_cube();

        for (x, y) in a.children().iter().zip(b.children()) {
            assert!(Rc::ptr_eq(&x.geometry, &y.geometry));
            assert!(Rc::ptr_eq(&x.material, &y.material));
        }
        assert!(Rc::ptr_eq(&a.children()[0].geometry, &a.children()[1].geometry));
        assert!(!Rc::ptr_eq(&a.children()[0].material, &a.children()[1].material));
    }

    #[test]
    fn test_cube_dimensions() {
        let factory = CubeFactory::new(400.0);
        assert_eq!(*factory.geometry, BoxGeometry::cube(400.0));
        assert_eq!(factory.material.color(), CUBE_COLOR);
        assert_eq!(factory.pre_pass_material.color(), CUBE_COLOR);
    }
}
