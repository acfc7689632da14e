//! Camera for ray generation and scene rendering

use glam::DVec3;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::ray::Ray;
use crate::raytrace::{trace_ray, RenderSettings};
use crate::scene::Scene;

/// Linear HDR image produced by [`Camera::render`].
pub type RgbImage32 = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Bounds of the virtual image plane in camera `(u, v)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    /// Coordinate of the left image edge along `u`
    pub left: f64,
    /// Coordinate of the right image edge along `u`
    pub right: f64,
    /// Coordinate of the bottom image edge along `v`
    pub bottom: f64,
    /// Coordinate of the top image edge along `v`
    pub top: f64,
}

impl ViewWindow {
    /// Create a view window from its four edges.
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Window `[-aspect, aspect] x [-1, 1]` matching the image aspect ratio.
    ///
    /// Zero dimensions count as 1, the same as in [`Camera::new`].
    pub fn from_aspect(image_width: u32, image_height: u32) -> Self {
        let aspect = f64::from(image_width.max(1)) / f64::from(image_height.max(1));
        Self::new(-aspect, aspect, -1.0, 1.0)
    }
}

/// Pinhole camera mapping pixel coordinates to world-space rays.
///
/// The image plane sits `near` units in front of the eye, spanning the
/// [`ViewWindow`] in the camera's `(u, v)` basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Point camera is looking from
    pub eye: DVec3,
    /// Image plane bounds
    pub window: ViewWindow,
    /// Distance from the eye to the image plane
    pub near: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,

    /// Camera frame basis vector pointing right (u)
    u: DVec3,
    /// Camera frame basis vector pointing up (v)
    v: DVec3,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: DVec3,
}

impl Camera {
    /// Creates a camera looking from `eye` towards `look_at`.
    ///
    /// `up` only needs to be non-parallel to the view direction; the basis is
    /// re-orthogonalized. Image dimensions below 1 are raised to 1.
    pub fn new(
        eye: DVec3,
        look_at: DVec3,
        up: DVec3,
        window: ViewWindow,
        near: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (eye - look_at).normalize_or_zero(); // Points opposite view direction
        let u = up.cross(w).normalize_or_zero(); // Points to camera right
        let v = w.cross(u); // Points to camera up

        Self {
            eye,
            window,
            near,
            image_width: image_width.max(1),
            image_height: image_height.max(1),
            u,
            v,
            w,
        }
    }

    /// Orthonormal camera frame `(u, v, w)`.
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        (self.u, self.v, self.w)
    }

    /// Ray from the eye through image position `(px, py)`.
    ///
    /// Pixel `(x, y)` is sampled at `(x + 0.5, y + 0.5)`; `y` grows upwards
    /// from the bottom edge. The direction is not normalized.
    pub fn get_ray(&self, px: f64, py: f64) -> Ray {
        let ViewWindow {
            left,
            right,
            bottom,
            top,
        } = self.window;

        let s = left + (right - left) * px / f64::from(self.image_width);
        let t = bottom + (top - bottom) * py / f64::from(self.image_height);

        let on_plane = self.eye - self.near * self.w + s * self.u + t * self.v;
        Ray::new(self.eye, on_plane - self.eye)
    }

    /// Renders the scene, one ray per pixel centre.
    ///
    /// Each pixel is traced independently and clamped to [0, 1] once. Row 0 of
    /// the returned image is the top of the view window. Pixels are processed
    /// in parallel; the scene is only read.
    pub fn render(&self, scene: &Scene, settings: &RenderSettings) -> RgbImage32 {
        let mut image = RgbImage32::new(self.image_width, self.image_height);

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let height = self.image_height;
        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            // Image rows run top-down, camera y runs bottom-up
            let px = f64::from(i) + 0.5;
            let py = f64::from(height - 1 - j) + 0.5;

            let ray = self.get_ray(px, py);
            let color = trace_ray(&ray, scene, settings.reflect_levels, settings.has_shadow).clamp();
            *pixel = Rgb(color.to_array());
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_z(width: u32, height: u32) -> Camera {
        Camera::new(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            ViewWindow::from_aspect(width, height),
            3.0,
            width,
            height,
        )
    }

    #[test]
    fn basis_is_orthonormal() {
        let cam = Camera::new(
            DVec3::new(150.0, 120.0, 150.0),
            DVec3::new(45.0, 22.0, 55.0),
            DVec3::Y,
            ViewWindow::from_aspect(640, 480),
            3.0,
            640,
            480,
        );
        let (u, v, w) = cam.basis();
        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
        assert!(w.dot(u).abs() < 1e-12);
        // right-handed frame
        assert!(u.cross(v).abs_diff_eq(w, 1e-12));
        // up stays up
        assert!(v.y > 0.0);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let cam = looking_down_z(640, 480);
        let r = cam.get_ray(320.0, 240.0);
        assert_eq!(r.origin, DVec3::new(0.0, 0.0, 10.0));
        // unnormalized: reaches the image plane at distance `near`
        assert!(r.direction.abs_diff_eq(DVec3::new(0.0, 0.0, -3.0), 1e-12));
    }

    #[test]
    fn corners_map_to_window_edges() {
        let cam = looking_down_z(200, 100);
        let bottom_left = cam.get_ray(0.0, 0.0);
        assert!(bottom_left.direction.abs_diff_eq(DVec3::new(-2.0, -1.0, -3.0), 1e-12));
        let top_right = cam.get_ray(200.0, 100.0);
        assert!(top_right.direction.abs_diff_eq(DVec3::new(2.0, 1.0, -3.0), 1e-12));
    }

    #[test]
    fn from_aspect_uses_width_over_height() {
        assert_eq!(ViewWindow::from_aspect(640, 480), ViewWindow::new(-4.0 / 3.0, 4.0 / 3.0, -1.0, 1.0));
        // zero height does not divide by zero
        assert_eq!(ViewWindow::from_aspect(10, 0).right, 10.0);
        assert_eq!(ViewWindow::from_aspect(0, 10).right, 0.1);
    }

    #[test]
    fn zero_sized_image_is_raised() {
        let cam = looking_down_z(0, 0);
        assert_eq!((cam.image_width, cam.image_height), (1, 1));
    }
}
