//! Surface materials and the scatter model.

use crate::portal::{PortalArena, PortalId};
use crate::sampling::{gen_f32, random_unit_vector};
use crate::{hittable::HitRecord, Ray};
use gate_math::{near_zero, reflect, refract, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a successful scatter: the color filter and the continuation ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    PortalFluid(PortalFluid),
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian(Lambertian::new(albedo))
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal(Metal::new(albedo, fuzz))
    }

    pub fn dielectric(ior: f32) -> Self {
        Self::Dielectric(Dielectric::new(ior))
    }

    pub fn portal_fluid(link: PortalId) -> Self {
        Self::PortalFluid(PortalFluid::new(link))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. `portals` resolves the link of a
    /// portal fluid.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        portals: &PortalArena,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
            Material::PortalFluid(m) => m.scatter(ray_in, rec, portals),
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let direction = lambertian_direction(rec.normal, random_unit_vector(rng));
        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// Diffuse bounce direction for a given unit sample.
///
/// Falls back to the normal when the sample cancels it out.
pub fn lambertian_direction(normal: Vec3, unit_sample: Vec3) -> Vec3 {
    let direction = normal + unit_sample;
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the ray below the surface; absorb it there
        (direction.dot(rec.normal) > 0.0).then(|| ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract || reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// Schlick's approximation for reflectance.
pub fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Teleports rays to the linked portal instead of shading them.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalFluid {
    link: PortalId,
}

impl PortalFluid {
    pub fn new(link: PortalId) -> Self {
        Self { link }
    }

    pub fn link(&self) -> PortalId {
        self.link
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, portals: &PortalArena) -> Option<ScatterResult> {
        // Only portal hits carry local coordinates; anything else absorbs
        let (q_coord, p_coord) = rec.local_uv?;
        let other = portals.get(self.link)?;

        let origin = other.point_at(q_coord, p_coord);
        let direction = -ray_in.direction().normalize() + (other.normal() - rec.normal);

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(origin, direction),
        })
    }
}
