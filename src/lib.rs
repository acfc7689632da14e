//! phongtrace ray tracer
//!
//! Recursive Whitted-style ray tracing of spheres, planes and triangles with
//! Phong direct lighting, hard shadows, an ambient term and a bounded number
//! of mirror-reflection bounces. Outputs PNG and EXR formats.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod config;
pub mod hittable;
pub mod interval;
pub mod light;
pub mod material;
pub mod mesh;
pub mod output;
pub mod plane;
pub mod ray;
pub mod raytrace;
pub mod scene;
pub mod scenes;
pub mod sphere;
pub mod triangle;
