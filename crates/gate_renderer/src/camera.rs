//! Camera for ray generation.

use crate::renderer::{self, RenderError};
use crate::sampling::{gen_f32, random_in_unit_disk};
use crate::{ImageBuffer, Ray, Scene};
use gate_math::{Point3, Vec3};
use rand::RngCore;

/// Default number of render workers.
pub const DEFAULT_THREAD_COUNT: usize = 16;

/// Largest image height `initialize` will derive from the aspect ratio.
pub const MAX_IMAGE_HEIGHT: u32 = 16_384;

/// Camera for generating rays into the scene.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// (or [`Camera::render`], which does it for you).
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    aspect_ratio: f32,
    image_width: u32,
    samples_per_pixel: u32,
    max_depth: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Variation angle of rays through each pixel
    focus_dist: f32,    // Distance from camera to plane of perfect focus

    // Execution
    thread_count: usize,
    seed: u64,

    // Cached computed values (set by initialize())
    initialized: bool,
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            thread_count: DEFAULT_THREAD_COUNT,
            seed: 0,
            initialized: false,
            image_height: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            samples_scale: 0.1,
        }
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self.initialized = false;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self.initialized = false;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialized = false;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self.initialized = false;
        self
    }

    /// Set the worker count. Zero is treated as one.
    pub fn with_threads(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    /// Set the base seed the per-pixel generators are derived from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Derive the viewport geometry from the configured fields.
    ///
    /// Calling it again without changing the configuration is a no-op.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.image_height = derive_image_height(self.image_width, self.aspect_ratio);
        self.samples_scale = 1.0 / self.samples_per_pixel.max(1) as f32;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;

        log::debug!(
            "Camera initialized: {}x{}, vfov {}, basis u={:?} v={:?} w={:?}",
            self.image_width,
            self.image_height,
            self.vfov,
            self.u,
            self.v,
            self.w
        );
    }

    /// Generate a jittered ray through pixel (row, col).
    pub fn get_ray(&self, row: u32, col: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((col as f32) + offset.x) * self.pixel_delta_u
            + ((row as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Initialize if needed and render `scene` on the worker pool.
    pub fn render(&mut self, scene: &Scene) -> Result<ImageBuffer, RenderError> {
        self.initialize();
        renderer::render(self, scene)
    }

    /// Like [`Camera::render`], reporting remaining scanlines after each row.
    pub fn render_with_progress<F>(&mut self, scene: &Scene, progress: F) -> Result<ImageBuffer, RenderError>
    where
        F: Fn(u32) + Sync,
    {
        self.initialize();
        renderer::render_with_progress(self, scene, progress)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// Center of pixel (row, col) on the focus plane, without jitter.
    pub fn pixel_center(&self, row: u32, col: u32) -> Point3 {
        self.pixel00_loc + (col as f32) * self.pixel_delta_u + (row as f32) * self.pixel_delta_v
    }

    pub fn pixel_delta_u(&self) -> Vec3 {
        self.pixel_delta_u
    }

    pub fn pixel_delta_v(&self) -> Vec3 {
        self.pixel_delta_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Image height for `width / aspect_ratio`, clamped to `[1, MAX_IMAGE_HEIGHT]`.
///
/// A zero, negative or non-finite ratio falls back to a square image.
fn derive_image_height(image_width: u32, aspect_ratio: f32) -> u32 {
    let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        log::warn!("Invalid aspect ratio {}, rendering a square image", aspect_ratio);
        1.0
    };
    let height = (image_width as f32 / aspect_ratio).min(MAX_IMAGE_HEIGHT as f32) as u32;
    height.clamp(1, MAX_IMAGE_HEIGHT)
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
