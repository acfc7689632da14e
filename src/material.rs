//! Phong material model.
//!
//! A material carries the diffuse, ambient, specular and global-reflection
//! coefficients used by the shading loop. Surfaces refer to materials by
//! [`MaterialId`], an index into the scene's material table.

use glam::DVec3;

use crate::color::Color;
use crate::light::PointLight;

/// Index of a material inside a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Surface reflectance coefficients for Phong shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse reflectance.
    pub k_d: Color,
    /// Ambient reflectance.
    pub k_a: Color,
    /// Specular reflectance.
    pub k_r: Color,
    /// Scale applied to the recursively traced mirror reflection.
    pub k_rg: Color,
    /// Specular shininess exponent (non-negative).
    pub n: f32,
}

impl Material {
    /// Create a material. A negative exponent is clamped to 0.
    pub fn new(k_d: Color, k_a: Color, k_r: Color, k_rg: Color, n: f32) -> Self {
        Self {
            k_d,
            k_a,
            k_r,
            k_rg,
            n: n.max(0.0),
        }
    }

    /// Diffuse plus specular light reflected from `light`.
    ///
    /// Computes `I_source * (k_d * max(N.L, 0) + k_r * max(R.V, 0)^n)`.
    /// `l`, `n` and `v` are unit vectors pointing away from the surface point.
    pub fn phong(&self, l: DVec3, n: DVec3, v: DVec3, light: &PointLight) -> Color {
        let r = mirror_reflect(l, n);

        let n_dot_l = n.dot(l).max(0.0) as f32;
        let r_dot_v = r.dot(v).max(0.0) as f32;

        light.intensity * (self.k_d * n_dot_l + self.k_r * r_dot_v.powf(self.n))
    }
}

/// Mirror `l` about the unit normal `n`.
///
/// Both input and output point away from the surface; the result has the
/// same length as `l`.
pub fn mirror_reflect(l: DVec3, n: DVec3) -> DVec3 {
    2.0 * n.dot(l) * n - l
}
