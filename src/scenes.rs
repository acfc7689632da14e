//! Built-in scenes.
//!
//! Each function takes the output resolution and returns a fully owned
//! [`Scene`]; there is no shared scene state.

use std::path::Path;

use glam::DVec3;
use log::{info, warn};

use crate::camera::{Camera, ViewWindow};
use crate::color::Color;
use crate::light::PointLight;
use crate::material::{Material, MaterialId};
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::scene::{Scene, SceneBuilder, SceneError};
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Distance from the eye to the image plane for the built-in cameras.
const NEAR: f64 = 3.0;

fn camera(eye: DVec3, width: u32, height: u32) -> Camera {
    Camera::new(
        eye,
        DVec3::new(45.0, 22.0, 55.0),
        DVec3::Y,
        ViewWindow::from_aspect(width, height),
        NEAR,
        width,
        height,
    )
}

/// Phong material whose ambient coefficient is the light-red diffuse color,
/// which all the built-in materials share.
fn material(k_d: Color, k_r: Color, k_rg: Color, n: f32) -> Material {
    Material::new(k_d, Color::new(0.8, 0.4, 0.4), k_r, k_rg, n)
}

/// Materials shared by both scenes, in table order: light red, light green,
/// light blue, yellow.
fn add_base_materials(b: &mut SceneBuilder) -> [MaterialId; 4] {
    let specular = Color::splat(0.8) / 1.5;
    [
        b.add_material(material(Color::new(0.8, 0.4, 0.4), specular, Color::splat(0.8) / 3.0, 64.0)),
        b.add_material(material(Color::new(0.4, 0.8, 0.4), specular, Color::splat(0.8) / 3.0, 64.0)),
        b.add_material(material(Color::new(0.4, 0.4, 0.8) * 0.9, specular, Color::splat(0.8) / 2.5, 64.0)),
        b.add_material(material(Color::new(0.6, 0.6, 0.2), specular, Color::splat(0.8) / 3.0, 64.0)),
    ]
}

/// Axis-aligned box `[min, max]` as ten outward-facing triangles.
///
/// The bottom face is left open since the boxes rest on the ground plane.
/// `front` shades the first triangle of the +z face, `sides` everything else.
fn open_box(min: DVec3, max: DVec3, sides: MaterialId, front: MaterialId) -> Vec<Triangle> {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let p = DVec3::new;
    vec![
        // +y
        Triangle::new(p(x1, y1, z1), p(x1, y1, z0), p(x0, y1, z0), sides),
        Triangle::new(p(x1, y1, z1), p(x0, y1, z0), p(x0, y1, z1), sides),
        // +x
        Triangle::new(p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), sides),
        Triangle::new(p(x1, y0, z0), p(x1, y1, z1), p(x1, y0, z1), sides),
        // -x
        Triangle::new(p(x0, y0, z1), p(x0, y1, z1), p(x0, y1, z0), sides),
        Triangle::new(p(x0, y0, z1), p(x0, y1, z0), p(x0, y0, z0), sides),
        // +z
        Triangle::new(p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1), front),
        Triangle::new(p(x1, y0, z1), p(x0, y1, z1), p(x0, y0, z1), sides),
        // -z
        Triangle::new(p(x0, y0, z0), p(x0, y1, z0), p(x1, y1, z0), sides),
        Triangle::new(p(x0, y0, z0), p(x1, y1, z0), p(x1, y0, z0), sides),
    ]
}

/// Two spheres and a yellow box in a corner formed by three planes.
pub fn spheres_and_cube(width: u32, height: u32) -> Result<Scene, SceneError> {
    let mut b = Scene::builder(camera(DVec3::new(150.0, 120.0, 150.0), width, height))
        .background(Color::new(0.2, 0.3, 0.5))
        .ambient(Color::WHITE * 0.25);

    let [red, green, blue, yellow] = add_base_materials(&mut b);
    let gray = b.add_material(material(Color::splat(0.6), Color::splat(0.6), Color::splat(0.8) / 3.0, 128.0));

    b.add_light(PointLight::new(Color::WHITE * 0.6, DVec3::new(100.0, 120.0, 10.0)))
        .add_light(PointLight::new(Color::WHITE * 0.6, DVec3::new(5.0, 80.0, 60.0)));

    b.add_surface(Plane::new(0.0, 1.0, 0.0, 0.0, blue)) // floor
        .add_surface(Plane::new(1.0, 0.0, 0.0, 0.0, gray)) // left wall
        .add_surface(Plane::new(0.0, 0.0, 1.0, 0.0, gray)) // right wall
        .add_surface(Sphere::new(DVec3::new(40.0, 20.0, 42.0), 22.0, red))
        .add_surface(Sphere::new(DVec3::new(75.0, 10.0, 40.0), 12.0, green))
        .extend_surfaces(open_box(DVec3::new(30.0, 0.0, 70.0), DVec3::new(50.0, 20.0, 90.0), yellow, yellow));

    b.build()
}

/// Room with a green box, floating spheres, and the teddy bear and teapot
/// meshes read from `mesh_dir`.
///
/// `Teddy.obj` and `Teapot.obj` are optional: a mesh that fails to load is
/// reported and left out.
pub fn room_with_meshes(width: u32, height: u32, mesh_dir: &Path) -> Result<Scene, SceneError> {
    let mut b = Scene::builder(camera(DVec3::new(130.0, 50.0, 130.0), width, height))
        .background(Color::new(0.5, 0.5, 0.9))
        .ambient(Color::new(0.5, 0.5, 1.0) * 0.25);

    let [red, green, blue, yellow] = add_base_materials(&mut b);
    let slate = b.add_material(material(Color::new(0.3, 0.3, 0.6), Color::new(0.3, 0.3, 0.6), Color::new(0.3, 0.3, 0.7) / 3.0, 10.0));
    let white = b.add_material(material(Color::splat(0.9), Color::splat(0.9), Color::splat(0.9) / 3.0, 10.0));
    let black = b.add_material(material(Color::splat(0.1), Color::splat(0.1), Color::splat(0.1) / 3.0, 10.0));
    let pink = b.add_material(material(Color::new(1.0, 0.4, 0.7), Color::new(1.0, 0.4, 0.7), Color::new(1.0, 0.4, 0.7) / 3.0, 120.0));
    let dull_yellow = b.add_material(material(Color::new(0.6, 0.6, 0.2), Color::splat(0.8) / 1.5, Color::splat(0.8) / 3.0, 128.0));

    b.add_light(PointLight::new(Color::WHITE * 0.6, DVec3::new(100.0, 120.0, 30.0)))
        .add_light(PointLight::new(Color::WHITE * 0.6, DVec3::new(15.0, 80.0, 60.0)));

    b.add_surface(Plane::new(0.0, 1.0, 0.0, 0.0, blue)) // floor
        .add_surface(Plane::new(1.0, 0.0, 0.0, 10.0, slate)) // left wall
        .add_surface(Plane::new(0.0, 0.0, 1.0, 0.0, slate)) // right wall
        .extend_surfaces(open_box(DVec3::new(30.0, 0.0, 60.0), DVec3::new(50.0, 20.0, 80.0), green, yellow));

    // teddy bear eyes
    b.add_surface(Sphere::new(DVec3::new(27.5, 30.0, 15.0), 1.0, black))
        .add_surface(Sphere::new(DVec3::new(32.5, 30.0, 15.0), 1.0, black));

    // hovering spheres
    b.add_surface(Sphere::new(DVec3::new(20.0, 35.0, 70.0), 3.0, red))
        .add_surface(Sphere::new(DVec3::new(60.0, 35.0, 70.0), 3.0, pink))
        .add_surface(Sphere::new(DVec3::new(40.0, 35.0, 50.0), 3.0, blue))
        .add_surface(Sphere::new(DVec3::new(40.0, 35.0, 90.0), 3.0, yellow));

    let meshes = [
        ("Teddy.obj", 1.0, DVec3::new(30.0, 20.0, 6.0), dull_yellow),
        ("Teapot.obj", 4.0, DVec3::new(40.0, 21.0, 70.0), white),
    ];
    for (file, scale, offset, material) in meshes {
        let path = mesh_dir.join(file);
        match Mesh::load(&path) {
            Ok(mesh) => {
                info!("Loaded {} ({} vertices, {} faces)", path.display(), mesh.vertices.len(), mesh.faces.len());
                b.extend_surfaces(mesh.triangles(scale, offset, material));
            }
            Err(e) => warn!("Skipping mesh {}: {}", path.display(), e),
        }
    }

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Surface;

    #[test]
    fn spheres_and_cube_contents() {
        let scene = spheres_and_cube(64, 48).unwrap();
        assert_eq!(scene.materials().len(), 5);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.surfaces().len(), 15);
        let triangles = scene.surfaces().iter().filter(|s| matches!(s, Surface::Triangle(_))).count();
        assert_eq!(triangles, 10);
        assert_eq!((scene.camera.image_width, scene.camera.image_height), (64, 48));
    }

    #[test]
    fn box_faces_point_outwards() {
        let min = DVec3::new(30.0, 0.0, 70.0);
        let max = DVec3::new(50.0, 20.0, 90.0);
        let centre = (min + max) / 2.0;
        let m = MaterialId(0);
        for tri in open_box(min, max, m, m) {
            let face_centre = (tri.vertices[0] + tri.vertices[1] + tri.vertices[2]) / 3.0;
            assert!(tri.normal.dot(face_centre - centre) > 0.0, "{:?}", tri.vertices);
        }
    }

    #[test]
    fn room_without_meshes_still_builds() {
        let scene = room_with_meshes(32, 24, Path::new("/nonexistent/meshes")).unwrap();
        assert_eq!(scene.materials().len(), 9);
        assert_eq!(scene.surfaces().len(), 3 + 10 + 6);
    }

    #[test]
    fn room_includes_loaded_meshes() {
        let dir = std::env::temp_dir().join("phongtrace_scene_meshes");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Teddy.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        std::fs::write(dir.join("Teapot.obj"), "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

        let scene = room_with_meshes(32, 24, &dir).unwrap();
        assert_eq!(scene.surfaces().len(), 3 + 10 + 6 + 1 + 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
