//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::DVec3;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// This is the eye position for primary rays or a surface point for
    /// shadow and reflection rays.
    pub origin: DVec3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Camera rays carry the offset from the
    /// eye to the image plane; the tracer normalizes before shading.
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }

    /// Copy of this ray with a unit-length direction.
    ///
    /// A zero direction stays zero.
    pub fn normalized(&self) -> Self {
        Self::new(self.origin, self.direction.normalize_or_zero())
    }
}
