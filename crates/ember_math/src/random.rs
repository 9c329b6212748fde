//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so callers decide whether
//! a stream is shared, seeded, or owned per thread.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [0, 1).
pub fn random_vec3(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// Uniform point strictly inside the unit sphere (rejection sampled).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Tiny samples lose precision when normalized
        if len_sq > 1e-6 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk on the z = 0 plane.
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
