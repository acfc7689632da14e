//! Sphere primitive for ray tracing.
//!
//! Solves the full quadratic `a*t^2 + b*t + c = 0` and reports the smallest
//! positive root inside the requested range, so a ray starting inside the
//! sphere reports its forward exit point.

use glam::DVec3;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialId;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: DVec3,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f64,

    /// Material used to shade the sphere.
    pub material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: DVec3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Smallest positive root of the ray-sphere quadratic lying in `ray_t`.
    fn nearest_root(&self, r: &Ray, ray_t: Interval) -> Option<f64> {
        // Ray origin relative to the sphere center
        let oc = r.origin - self.center;

        let a = r.direction.dot(r.direction);
        let b = 2.0 * r.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // With a > 0 the roots come out in ascending order; a tangent ray
        // yields the same root twice.
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        [near, far]
            .into_iter()
            .find(|&t| t > 0.0 && ray_t.contains(t))
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = self.nearest_root(r, ray_t)?;
        let p = r.at(t);

        Some(HitRecord {
            t,
            p,
            normal: (p - self.center).normalize_or_zero(),
            material: self.material,
        })
    }

    fn shadow_hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.nearest_root(r, ray_t).is_some()
    }
}
