//! Sphere primitives for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Interval, Ray, Vec3};

/// A static sphere.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
}

impl<M: Material> Sphere<M> {
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }
}

impl<M: Material> Hittable for Sphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(self.center, self.radius, &self.material, ray, ray_t)
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`.
///
/// Outside the interval the motion is extrapolated along the same line.
pub struct MovingSphere<M: Material> {
    center0: Vec3,
    center1: Vec3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: M,
}

impl<M: Material> MovingSphere<M> {
    pub fn new(center0: Vec3, center1: Vec3, time0: f32, time1: f32, radius: f32, material: M) -> Self {
        debug_assert!(time0 < time1, "motion interval is empty: {time0}..{time1}");
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Center of the sphere at the given time.
    pub fn center(&self, time: f32) -> Vec3 {
        let fraction = (time - self.time0) / (self.time1 - self.time0);
        self.center0 + fraction * (self.center1 - self.center0)
    }
}

impl<M: Material> Hittable for MovingSphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(self.center(ray.time()), self.radius, &self.material, ray, ray_t)
    }
}

/// Intersect a ray with a sphere, preferring the nearer root.
fn hit_sphere<'a>(
    center: Vec3,
    radius: f32,
    material: &'a dyn Material,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let outward_normal = (ray.at(root) - center) / radius;
    Some(HitRecord::new(ray, root, outward_normal, material))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use ember_math::Color;

    const EPS: f32 = 1e-4;

    fn grey() -> Lambertian {
        Lambertian::new(Color::new(0.5, 0.5, 0.5))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.5, grey());

        for d in [3.0_f32, 10.0, 250.0] {
            let ray = Ray::new(Vec3::new(0.0, 0.0, d), Vec3::new(0.0, 0.0, -1.0), 0.0);
            let rec = sphere.hit(&ray, forward()).expect("ray aimed at center");

            assert!((rec.t - (d - 1.5)).abs() < EPS * d, "d={d} t={}", rec.t);
            assert!(rec.front_face);
            assert!((rec.normal - Vec3::Z).length() < EPS);
        }
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Offset sideways by more than the radius
        let ray = Ray::new(Vec3::new(0.6, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&ray, forward()).is_none());

        // Pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y, 0.0);

        let rec = sphere.hit(&ray, forward()).expect("inside rays always exit");
        assert!((rec.t - 1.5).abs() < EPS);
        assert!(!rec.front_face);
        // Stored normal opposes the ray, geometric one points out
        assert!((rec.normal + Vec3::Y).length() < EPS);
        assert!((rec.outward_normal() - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_sphere_far_clip() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);

        assert!(sphere.hit(&ray, Interval::new(0.001, 3.9)).is_none());
        // Near root clipped, far root still accepted
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).expect("far root");
        assert!((rec.t - 6.0).abs() < EPS);
    }

    #[test]
    fn test_moving_sphere_center() {
        let sphere = MovingSphere::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 0.0, 1.0, 0.2, grey());

        assert_eq!(sphere.center(0.0), Vec3::ZERO);
        assert_eq!(sphere.center(0.5), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.center(1.0), Vec3::new(0.0, 2.0, 0.0));
        // Extrapolated past the end of the interval
        assert_eq!(sphere.center(2.0), Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_moving_sphere_hit_depends_on_ray_time() {
        let sphere = MovingSphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(4.0, 0.0, -3.0),
            0.0,
            1.0,
            0.5,
            grey(),
        );
        let origin = Vec3::ZERO;
        let direction = Vec3::new(0.0, 0.0, -1.0);

        let early = Ray::new(origin, direction, 0.0);
        let rec = sphere.hit(&early, forward()).expect("sphere starts on the axis");
        assert!((rec.t - 2.5).abs() < EPS);

        let late = Ray::new(origin, direction, 1.0);
        assert!(sphere.hit(&late, forward()).is_none());
    }
}
