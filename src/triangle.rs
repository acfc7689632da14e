//! Triangle primitive.
//!
//! Intersects the supporting plane, then accepts the point only if it lies on
//! the inner side of all three edges. Edges are inclusive so that meshes with
//! shared edges have no cracks.

use glam::DVec3;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialId;
use crate::plane::PARALLEL_EPSILON;
use crate::ray::Ray;

/// Triangle defined by three vertices in counter-clockwise order around its
/// normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices in winding order.
    pub vertices: [DVec3; 3],
    /// `unit(cross(v2 - v1, v3 - v1))`; zero for a degenerate triangle.
    pub normal: DVec3,
    /// Material used to shade the triangle.
    pub material: MaterialId,
}

impl Triangle {
    /// Create a triangle; the normal follows the vertex winding.
    pub fn new(v1: DVec3, v2: DVec3, v3: DVec3, material: MaterialId) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normal: (v2 - v1).cross(v3 - v1).normalize_or_zero(),
            material,
        }
    }

    fn intersect(&self, r: &Ray, ray_t: Interval) -> Option<f64> {
        let [v1, v2, v3] = self.vertices;
        let n = self.normal;

        let denom = n.dot(r.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = n.dot(v1 - r.origin) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let p = r.at(t);
        let inside = [(v1, v2), (v2, v3), (v3, v1)]
            .into_iter()
            .all(|(a, b)| (b - a).cross(p - a).dot(n) >= 0.0);

        inside.then_some(t)
    }
}

impl Hittable for Triangle {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = self.intersect(r, ray_t)?;

        Some(HitRecord {
            t,
            p: r.at(t),
            normal: self.normal,
            material: self.material,
        })
    }

    fn shadow_hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.intersect(r, ray_t).is_some()
    }
}
