//! Infinite plane primitive.

use glam::DVec3;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialId;
use crate::ray::Ray;

/// Below this `|N.d|` a ray is treated as parallel to the plane.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Plane `a*x + b*y + c*z + d = 0`.
///
/// The coefficients are rescaled on construction so that `(a, b, c)` is the
/// unit normal; the set of points on the plane is unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal `(a, b, c)`. Zero for a degenerate plane.
    pub normal: DVec3,
    /// Offset term `d` after rescaling.
    pub d: f64,
    /// Material used to shade the plane.
    pub material: MaterialId,
}

impl Plane {
    /// Plane from its implicit-form coefficients.
    ///
    /// If `(a, b, c)` is the zero vector the plane never reports a hit.
    pub fn new(a: f64, b: f64, c: f64, d: f64, material: MaterialId) -> Self {
        let abc = DVec3::new(a, b, c);
        let len = abc.length();
        if len == 0.0 {
            return Self {
                normal: DVec3::ZERO,
                d: 0.0,
                material,
            };
        }

        Self {
            normal: abc / len,
            d: d / len,
            material,
        }
    }

    fn intersect(&self, r: &Ray, ray_t: Interval) -> Option<f64> {
        let denom = self.normal.dot(r.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -(self.normal.dot(r.origin) + self.d) / denom;
        ray_t.contains(t).then_some(t)
    }
}

impl Hittable for Plane {
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

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-5;

    #[test]
    fn ground_plane_hit_from_above() {
        let plane = Plane::new(0.0, 1.0, 0.0, 0.0, MaterialId(2));
        let r = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::new(0.0, -1.0, 0.0));

        let rec = plane.hit(&r, Interval::from_min(EPS)).expect("straight down");
        assert!((rec.t - 5.0).abs() < 1e-12);
        assert!(rec.p.abs_diff_eq(DVec3::ZERO, 1e-12));
        assert!(rec.normal.abs_diff_eq(DVec3::Y, 1e-12));
        assert_eq!(rec.material, MaterialId(2));
    }

    #[test]
    fn normal_is_fixed_regardless_of_side() {
        let plane = Plane::new(0.0, 1.0, 0.0, 0.0, MaterialId(0));
        let r = Ray::new(DVec3::new(0.0, -3.0, 0.0), DVec3::Y);
        let rec = plane.hit(&r, Interval::from_min(EPS)).expect("from below");
        assert!((rec.t - 3.0).abs() < 1e-12);
        assert!(rec.normal.abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn coefficients_are_normalized() {
        // 2x + 20 = 0 is the plane x = -10
        let plane = Plane::new(2.0, 0.0, 0.0, 20.0, MaterialId(0));
        assert!(plane.normal.abs_diff_eq(DVec3::X, 1e-12));
        assert!((plane.d - 10.0).abs() < 1e-12);

        let r = Ray::new(DVec3::ZERO, -DVec3::X);
        let rec = plane.hit(&r, Interval::from_min(EPS)).expect("x = -10");
        assert!((rec.t - 10.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::new(0.0, 1.0, 0.0, 0.0, MaterialId(0));
        let r = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 0.0, 1.0));
        assert!(plane.hit(&r, Interval::from_min(EPS)).is_none());
        assert!(!plane.shadow_hit(&r, Interval::from_min(EPS)));

        // lying in the plane counts as parallel too
        let r = Ray::new(DVec3::ZERO, DVec3::X);
        assert!(plane.hit(&r, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn plane_behind_origin_is_missed() {
        let plane = Plane::new(0.0, 1.0, 0.0, 0.0, MaterialId(0));
        let r = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::Y);
        assert!(plane.hit(&r, Interval::from_min(EPS)).is_none());
        assert!(!plane.shadow_hit(&r, Interval::from_min(EPS)));
    }

    #[test]
    fn range_limits_are_respected() {
        let plane = Plane::new(0.0, 1.0, 0.0, 0.0, MaterialId(0));
        let r = Ray::new(DVec3::new(0.0, 5.0, 0.0), -DVec3::Y);
        assert!(!plane.shadow_hit(&r, Interval::new(EPS, 4.0)));
        assert!(plane.shadow_hit(&r, Interval::new(EPS, 5.0)));
    }

    #[test]
    fn degenerate_plane_never_hits() {
        let plane = Plane::new(0.0, 0.0, 0.0, 1.0, MaterialId(0));
        let r = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!(plane.hit(&r, Interval::UNIVERSE).is_none());
    }
}
