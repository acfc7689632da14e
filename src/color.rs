//! RGB colors.
//!
//! Channels are unbounded while light is being accumulated; `clamp` restricts
//! them to the displayable [0, 1] range once per pixel.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

use glam::Vec3A;

/// RGB color with f32 channels, backed by `Vec3A` for SIMD arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(Vec3A);

impl Color {
    /// All channels zero.
    pub const BLACK: Color = Color(Vec3A::ZERO);
    /// All channels one.
    pub const WHITE: Color = Color(Vec3A::ONE);

    /// Create a color from its red, green and blue channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self(Vec3A::new(r, g, b))
    }

    /// Color with every channel set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self(Vec3A::splat(v))
    }

    /// Red channel.
    pub fn r(&self) -> f32 {
        self.0.x
    }

    /// Green channel.
    pub fn g(&self) -> f32 {
        self.0.y
    }

    /// Blue channel.
    pub fn b(&self) -> f32 {
        self.0.z
    }

    /// Restrict every channel to [0, 1].
    pub fn clamp(self) -> Self {
        Self(self.0.clamp(Vec3A::ZERO, Vec3A::ONE))
    }

    /// Channels as an `[r, g, b]` array, e.g. for an image pixel.
    pub fn to_array(self) -> [f32; 3] {
        self.0.to_array()
    }

    /// Channel-wise comparison with tolerance.
    pub fn abs_diff_eq(&self, other: Color, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

/// Component-wise product, used to filter light by a reflectance.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color(self.0 * rhs)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(self * rhs.0)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, rhs: f32) -> Color {
        Color(self.0 / rhs)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, Add::add)
    }
}
