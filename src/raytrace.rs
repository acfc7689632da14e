//! Whitted-style ray tracing.
//!
//! [`trace_ray`] finds the nearest surface along a ray and shades it with
//! Phong direct lighting from every point light, optional hard shadows, a
//! global ambient term, and a bounded number of mirror-reflection bounces.

use glam::DVec3;

use crate::color::Color;
use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::material::mirror_reflect;
use crate::ray::Ray;
use crate::scene::Scene;

/// Lower bound on `t` for every traced ray. Keeps secondary rays from
/// re-hitting the surface they start on (shadow acne).
pub const DEFAULT_TMIN: f64 = 1e-5;

/// Per-render tracing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Number of mirror-reflection bounces; 0 disables reflection.
    pub reflect_levels: u32,
    /// Whether lights can be occluded.
    pub has_shadow: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            reflect_levels: 2,
            has_shadow: true,
        }
    }
}

/// Color seen along `ray`.
///
/// The result is unclamped. Rays that hit nothing return the scene background
/// no matter how many reflection levels remain.
///
/// Each mirror bounce contributes its local shading weighted by the product
/// of the `k_rg` coefficients along the path. Bounces run in a loop, so the
/// stack does not grow with `reflect_levels`.
pub fn trace_ray(ray: &Ray, scene: &Scene, reflect_levels: u32, has_shadow: bool) -> Color {
    let mut ray = ray.normalized();
    let mut weight = Color::WHITE;
    let mut result = Color::BLACK;
    let mut levels = reflect_levels;

    loop {
        let Some(rec) = scene.hit(&ray, Interval::from_min(DEFAULT_TMIN)) else {
            return result + scene.background * weight;
        };

        let n = rec.normal.normalize_or_zero();
        let v = -ray.direction;
        let material = scene.material(rec.material);

        result += shade(scene, &rec, n, v, has_shadow) * weight;

        if levels == 0 {
            return result;
        }
        weight = weight * material.k_rg;
        // nothing further can contribute
        if weight == Color::BLACK {
            return result;
        }
        levels -= 1;
        ray = Ray::new(rec.p, mirror_reflect(v, n)).normalized();
    }
}

/// Direct Phong lighting plus the ambient term at a hit point.
fn shade(scene: &Scene, rec: &HitRecord, n: DVec3, v: DVec3, has_shadow: bool) -> Color {
    let material = scene.material(rec.material);
    let mut local = Color::BLACK;

    for light in scene.lights() {
        let to_light = light.position - rec.p;
        let distance = to_light.length();
        let l = to_light.normalize_or_zero();

        if has_shadow {
            // stop short of the light itself
            let shadow_ray = Ray::new(rec.p, l);
            let ray_t = Interval::new(DEFAULT_TMIN, distance - DEFAULT_TMIN);
            if scene.occluded(&shadow_ray, ray_t) {
                continue;
            }
        }

        local += material.phong(l, n, v, light);
    }

    local + material.k_a * scene.ambient.intensity
}
