//! Random sampling helpers.
//!
//! Every function takes the generator explicitly. The render loop gives each
//! pixel its own seeded generator (see [`pixel_rng`]), so nothing here touches
//! shared state.

use crate::Color;
use gate_math::Vec3;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling inside the unit ball keeps the distribution uniform
    loop {
        let v = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random RGB color with components in [0, 1).
pub fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

/// Random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// Generator for a single pixel: the render seed picks the key, the pixel's
/// coordinates pick the stream.
///
/// Output depends only on `(seed, row, col)`, never on which worker renders
/// the pixel.
pub fn pixel_rng(seed: u64, row: u32, col: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream((u64::from(row) << 32) | u64::from(col));
    rng
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4, "length {}", v.length());
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_gen_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = gen_range_f32(&mut rng, 0.5, 1.0);
            assert!((0.5..1.0).contains(&x));
        }
    }

    #[test]
    fn test_pixel_rng_is_reproducible() {
        let mut a = pixel_rng(42, 3, 9);
        let mut b = pixel_rng(42, 3, 9);
        for _ in 0..4 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_pixel_rng_differs_between_pixels() {
        let a = pixel_rng(42, 3, 9).next_u64();
        let b = pixel_rng(42, 9, 3).next_u64();
        let c = pixel_rng(43, 3, 9).next_u64();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_pixel_rng_stream_from_coordinates() {
        let rng = pixel_rng(42, 3, 9);
        assert_eq!(rng.get_stream(), (3 << 32) | 9);
        assert_eq!(rng.get_seed(), ChaCha8Rng::seed_from_u64(42).get_seed());
    }
}
