//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait for geometric primitives, the [`HitRecord`]
//! describing an intersection, and [`Surface`], the closed set of primitive
//! kinds a scene can hold.

use glam::DVec3;

use crate::interval::Interval;
use crate::material::MaterialId;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Ray-object intersection information.
///
/// Built fresh for every successful intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Ray parameter of the intersection
    pub t: f64,
    /// Point where the ray intersects the object
    pub p: DVec3,
    /// Outward surface normal at the intersection point (unit vector)
    pub normal: DVec3,
    /// Material of the object at the hit point
    pub material: MaterialId,
}

/// Trait for objects that can be intersected by rays.
///
/// Implementations must agree between [`hit`](Hittable::hit) and
/// [`shadow_hit`](Hittable::shadow_hit) on whether an intersection exists in
/// `ray_t`. Grazing or degenerate configurations report no hit.
pub trait Hittable: Sync + Send {
    /// Nearest intersection with parameter inside `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Whether any intersection lies inside `ray_t`.
    ///
    /// Used for shadow rays, where only occlusion matters.
    fn shadow_hit(&self, r: &Ray, ray_t: Interval) -> bool;
}

/// Any primitive that can be placed in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Sphere primitive.
    Sphere(Sphere),
    /// Infinite plane.
    Plane(Plane),
    /// Single triangle.
    Triangle(Triangle),
}

impl Surface {
    /// Material used to shade this surface.
    pub fn material(&self) -> MaterialId {
        match self {
            Surface::Sphere(s) => s.material,
            Surface::Plane(p) => p.material,
            Surface::Triangle(t) => t.material,
        }
    }
}

impl Hittable for Surface {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Surface::Sphere(s) => s.hit(r, ray_t),
            Surface::Plane(p) => p.hit(r, ray_t),
            Surface::Triangle(t) => t.hit(r, ray_t),
        }
    }

    fn shadow_hit(&self, r: &Ray, ray_t: Interval) -> bool {
        match self {
            Surface::Sphere(s) => s.shadow_hit(r, ray_t),
            Surface::Plane(p) => p.shadow_hit(r, ray_t),
            Surface::Triangle(t) => t.shadow_hit(r, ray_t),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(s: Sphere) -> Self {
        Surface::Sphere(s)
    }
}

impl From<Plane> for Surface {
    fn from(p: Plane) -> Self {
        Surface::Plane(p)
    }
}

impl From<Triangle> for Surface {
    fn from(t: Triangle) -> Self {
        Surface::Triangle(t)
    }
}
