//! Scene aggregate and its builder.
//!
//! A [`Scene`] owns every material, light and surface it references and is
//! read-only once built. [`SceneBuilder`] is the only way to assemble one; it
//! checks that every surface refers to a material of the same scene.

use log::debug;

use crate::camera::Camera;
use crate::color::Color;
use crate::hittable::{HitRecord, Hittable, Surface};
use crate::interval::Interval;
use crate::light::{AmbientLight, PointLight};
use crate::material::{Material, MaterialId};
use crate::ray::Ray;

/// Errors raised while assembling a scene.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    /// A surface refers to a material the scene does not own.
    #[error("surface {surface} uses material {material}, but the scene has {count} materials")]
    UnknownMaterial {
        /// Index of the offending surface.
        surface: usize,
        /// Material index it refers to.
        material: usize,
        /// Number of materials in the scene.
        count: usize,
    },
}

/// Everything needed to trace rays: geometry, materials, lights and camera.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Color returned for rays that hit nothing.
    pub background: Color,
    /// Global ambient light.
    pub ambient: AmbientLight,
    /// Camera producing primary rays.
    pub camera: Camera,
    materials: Vec<Material>,
    lights: Vec<PointLight>,
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Start building a scene viewed through `camera`.
    pub fn builder(camera: Camera) -> SceneBuilder {
        SceneBuilder::new(camera)
    }

    /// Material table.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Point lights, in insertion order.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Surfaces, in insertion order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Material referenced by a hit record or surface of this scene.
    pub fn material(&self, id: MaterialId) -> &Material {
        // ids are validated in SceneBuilder::build
        &self.materials[id.0]
    }

    /// Nearest intersection over all surfaces.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut nearest: Option<HitRecord> = None;

        for surface in &self.surfaces {
            let bound = nearest.map_or(ray_t, |rec| ray_t.with_max(rec.t));
            if let Some(rec) = surface.hit(r, bound) {
                if nearest.map_or(true, |n| rec.t < n.t) {
                    nearest = Some(rec);
                }
            }
        }

        nearest
    }

    /// Whether any surface blocks `r` inside `ray_t`.
    pub fn occluded(&self, r: &Ray, ray_t: Interval) -> bool {
        self.surfaces.iter().any(|s| s.shadow_hit(r, ray_t))
    }
}

/// Incremental scene assembly.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    background: Color,
    ambient: AmbientLight,
    camera: Camera,
    materials: Vec<Material>,
    lights: Vec<PointLight>,
    surfaces: Vec<Surface>,
}

impl SceneBuilder {
    /// Empty scene with black background and no ambient light.
    pub fn new(camera: Camera) -> Self {
        Self {
            background: Color::BLACK,
            ambient: AmbientLight::default(),
            camera,
            materials: Vec::new(),
            lights: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the ambient light intensity.
    pub fn ambient(mut self, intensity: Color) -> Self {
        self.ambient = AmbientLight::new(intensity);
        self
    }

    /// Add a material and return the id surfaces use to refer to it.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: PointLight) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// Add a surface.
    pub fn add_surface(&mut self, surface: impl Into<Surface>) -> &mut Self {
        self.surfaces.push(surface.into());
        self
    }

    /// Add every surface from an iterator.
    pub fn extend_surfaces<S: Into<Surface>>(&mut self, surfaces: impl IntoIterator<Item = S>) -> &mut Self {
        self.surfaces.extend(surfaces.into_iter().map(Into::into));
        self
    }

    /// Validate material references and produce the scene.
    pub fn build(self) -> Result<Scene, SceneError> {
        let count = self.materials.len();
        if let Some((surface, material)) = self
            .surfaces
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.material().0))
            .find(|&(_, material)| material >= count)
        {
            return Err(SceneError::UnknownMaterial {
                surface,
                material,
                count,
            });
        }

        debug!(
            "Scene built: {} surfaces, {} lights, {} materials",
            self.surfaces.len(),
            self.lights.len(),
            count
        );

        Ok(Scene {
            background: self.background,
            ambient: self.ambient,
            camera: self.camera,
            materials: self.materials,
            lights: self.lights,
            surfaces: self.surfaces,
        })
    }
}
