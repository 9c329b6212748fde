//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use ember_math::random::{gen_f32, random_in_unit_sphere, random_unit_vector};
use ember_math::{near_zero, reflect, refract, unit_vector, Color, Ray};
use rand::RngCore;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of light carried back along the path
    pub attenuation: Color,
    /// Continuation ray leaving the surface
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy)]
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
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Reflections pointing into the surface are absorbed
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ratio: f32) -> f32 {
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = unit_vector(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    /// Generator that replays a fixed cycle of words.
    struct ScriptedRng {
        words: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(words: &[u32]) -> Self {
            Self {
                words: words.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let word = self.words[self.next % self.words.len()];
            self.next += 1;
            word
        }

        fn next_u64(&mut self) -> u64 {
            (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn record(material: &dyn Material, normal: Vec3, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn test_lambertian_always_scatters_above_surface() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let rec = record(&mat, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.25);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("lambertian never absorbs");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert!(result.scattered.direction().dot(Vec3::Y) >= 0.0);
            assert!(!near_zero(result.scattered.direction()));
            assert_eq!(result.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_lambertian_degenerate_sample_falls_back_to_normal() {
        let mat = Lambertian::new(Color::ONE);
        let rec = record(&mat, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::Y, -Vec3::Y, 0.0);
        // Draws 0.5, 0.25, 0.5 give the sphere sample (0, -0.5, 0), which
        // normalizes to exactly -normal
        let mut rng = ScriptedRng::new(&[1 << 31, 1 << 30, 1 << 31]);

        let result = mat.scatter(&ray_in, &rec, &mut rng).expect("lambertian never absorbs");
        assert_eq!(result.scattered.direction(), rec.normal);
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let mat = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let rec = record(&mat, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);

        // Different seeds must not change the result
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("mirror reflection");
            let expected = unit_vector(Vec3::new(1.0, 1.0, 0.0));
            assert!((result.scattered.direction() - expected).length() < EPS);
            assert_eq!(result.scattered.origin(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_metal_absorbs_reflection_into_surface() {
        let mat = Metal::new(Color::ONE, 0.0);
        let rec = record(&mat, Vec3::Y, true);
        // Travelling along the normal reflects straight back into the surface
        let ray_in = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(mat.scatter(&ray_in, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        let mat = Metal::new(Color::ONE, 4.0);
        assert_eq!(mat.fuzz, 1.0);
    }

    #[test]
    fn test_dielectric_unit_index_does_not_bend() {
        let mat = Dielectric::new(1.0);
        let rec = record(&mat, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass never absorbs");
            assert!((result.scattered.direction() - Vec3::new(0.0, -1.0, 0.0)).length() < EPS);
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        // Leaving the glass: back face, stored normal opposes the ray
        let rec = record(&mat, -Vec3::Y, false);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.2, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(5);

        let expected = reflect(unit_vector(Vec3::new(1.0, 0.2, 0.0)), -Vec3::Y);
        for _ in 0..50 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass never absorbs");
            assert!((result.scattered.direction() - expected).length() < EPS);
        }
    }

    #[test]
    fn test_dielectric_splits_by_schlick_reflectance() {
        let mat = Dielectric::new(1.5);
        let rec = record(&mat, Vec3::Y, true);
        // Entering the glass at a grazing angle
        let direction = Vec3::new(1.0, -0.2, 0.0);
        let ray_in = Ray::new(Vec3::ZERO, direction, 0.0);
        let cos_theta = (-unit_vector(direction)).dot(Vec3::Y);
        let expected = Dielectric::reflectance(cos_theta, 1.0 / 1.5);
        let mut rng = StdRng::seed_from_u64(17);

        let trials = 4000;
        let mut reflected = 0;
        for _ in 0..trials {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass never absorbs");
            // Reflections leave above the surface, refractions below
            if result.scattered.direction().y > 0.0 {
                reflected += 1;
            }
        }

        assert!(reflected > 0 && reflected < trials);
        let fraction = reflected as f32 / trials as f32;
        assert!((fraction - expected).abs() < 0.03, "fraction={fraction} expected={expected}");
    }

    #[test]
    fn test_schlick_reflectance() {
        // Head-on reflectance equals r0
        let r0 = ((1.0 - 1.5_f32) / (1.0 + 1.5)).powi(2);
        assert!((Dielectric::reflectance(1.0, 1.5) - r0).abs() < EPS);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < EPS);
    }
}
