//! Light sources.

use glam::DVec3;

use crate::color::Color;

/// Point light emitting `intensity` from `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Emitted intensity (I_source).
    pub intensity: Color,
    /// World-space position.
    pub position: DVec3,
}

impl PointLight {
    /// Create a point light.
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
        }
    }
}

/// Global ambient light (I_a), added to every hit regardless of shadowing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientLight {
    /// Ambient intensity.
    pub intensity: Color,
}

impl AmbientLight {
    /// Create an ambient light.
    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }
}
