//! Gate - CPU path tracing with linked portals
//!
//! A Monte Carlo path tracer for spheres and rectangular portals. A ray that
//! enters one portal of a linked pair leaves from the matching point on the
//! other one.
//!
//! Intersection is a brute-force scan over the scene; rendering runs row
//! parallel on a rayon pool with per-pixel seeded generators.

mod camera;
mod hittable;
mod material;
mod output;
mod portal;
mod renderer;
mod scene;
mod sphere;

pub mod sampling;

pub use camera::{Camera, DEFAULT_THREAD_COUNT, MAX_IMAGE_HEIGHT};
pub use hittable::{HitRecord, Hittable};
pub use material::{
    lambertian_direction, reflectance, Color, Dielectric, Lambertian, Material, Metal,
    PortalFluid, ScatterResult,
};
pub use output::{ImageBuffer, OutputError};
pub use portal::{Portal, PortalArena, PortalId};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_with_progress,
    sky_gradient, RenderError,
};
pub use scene::{Object, Scene, SceneError};
pub use sphere::Sphere;

/// Re-export the math types from gate_math
pub use gate_math::{Interval, Point3, Ray, Vec3};
