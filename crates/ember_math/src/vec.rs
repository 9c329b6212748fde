//! Vector operations beyond what glam provides.
//!
//! Arithmetic, dot/cross products and lengths come straight from
//! [`glam::Vec3`]. This module adds the optics helpers the materials need.

use crate::Vec3;

/// Components below this magnitude count as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Divide a vector by its length.
///
/// The input must be non-zero; a zero vector yields NaN components.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// True if every component is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the surface with normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit vector `uv` through a surface with normal `n` (Snell's law).
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
/// The result is split into the parts perpendicular and parallel to `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
