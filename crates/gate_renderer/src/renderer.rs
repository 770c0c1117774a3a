//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction and 8-bit quantization
//! - Row-parallel rendering on a dedicated rayon pool

use crate::sampling::pixel_rng;
use crate::{Camera, Color, Hittable, ImageBuffer, Ray, Scene};
use gate_math::Interval;
use rand::RngCore;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Hits closer than this are ignored to avoid self-intersection acne.
const T_MIN: f32 = 0.001;

/// Errors raised by the render loop.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("camera must be initialized before rendering")]
    CameraNotInitialized,

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Compute the color seen by a ray.
///
/// Walks the path iteratively, carrying the product of attenuations. A path
/// that runs out of depth contributes black; no Russian-roulette weighting is
/// applied, so very shallow depths lose some energy.
pub fn ray_color(ray: &Ray, scene: &Scene, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..max_depth {
        let Some(rec) = scene.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, scene.portals(), rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Depth budget exhausted
    Color::ZERO
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling, returning the averaged linear color.
pub fn render_pixel(camera: &Camera, scene: &Scene, row: u32, col: u32, rng: &mut dyn RngCore) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(row, col, rng);
        pixel_color += ray_color(&ray, scene, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, scene: &Scene) -> Result<ImageBuffer, RenderError> {
    render_with_progress(camera, scene, |_| {})
}

/// Render the entire scene, calling `progress` with the number of scanlines
/// still outstanding each time a row completes.
///
/// Each row is a disjoint slice of the pixel buffer, so every pixel is
/// written exactly once and no locking is needed. Pixels draw from their own
/// seeded generator, so the image does not depend on the thread count.
pub fn render_with_progress<F>(camera: &Camera, scene: &Scene, progress: F) -> Result<ImageBuffer, RenderError>
where
    F: Fn(u32) + Sync,
{
    if !camera.is_initialized() {
        return Err(RenderError::CameraNotInitialized);
    }

    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} threads, {} objects",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        camera.thread_count(),
        scene.len()
    );
    let start = Instant::now();

    if width > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(camera.thread_count())
            .thread_name(|i| format!("gate-render-{i}"))
            .build()?;

        let remaining = AtomicU32::new(height);
        pool.install(|| {
            image
                .pixels
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(|(row, line)| {
                    let row = row as u32;
                    for (col, pixel) in line.iter_mut().enumerate() {
                        let col = col as u32;
                        let mut rng = pixel_rng(camera.seed(), row, col);
                        *pixel = color_to_rgb(render_pixel(camera, scene, row, col, &mut rng));
                    }
                    let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
                    progress(left);
                });
        });
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
