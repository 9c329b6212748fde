//! Demonstration scene: a ground sphere, three large feature spheres and a
//! randomized field of small spheres.

use crate::{CameraSettings, Dielectric, Lambertian, Metal, MovingSphere, Scene, Sphere};
use ember_math::random::{gen_f32, gen_range_f32, random_vec3, random_vec3_range};
use ember_math::{Color, Vec3};
use log::debug;
use rand::RngCore;

/// Half-width of the small-sphere grid used by the reference scene.
pub const DEFAULT_GRID_EXTENT: i32 = 2;

const SMALL_RADIUS: f32 = 0.2;

/// Small spheres closer than this to the metal feature sphere are skipped.
const CLEARANCE: f32 = 0.9;

/// Build the demonstration scene.
///
/// Small spheres sit on the integer grid `[-extent, extent)^2` on the
/// ground, jittered within each cell. About 80% are diffuse (and move
/// upward during the shutter), 15% metal and 5% glass.
pub fn random_scene(extent: i32, rng: &mut dyn RngCore) -> Scene {
    let mut world = Scene::new();

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    let reserved = Vec3::new(4.0, SMALL_RADIUS, 0.0);

    for a in -extent..extent {
        for b in -extent..extent {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                SMALL_RADIUS,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - reserved).length() <= CLEARANCE {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng) * random_vec3(rng);
                let center1 = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                world.add(Box::new(MovingSphere::new(
                    center,
                    center1,
                    0.0,
                    1.0,
                    SMALL_RADIUS,
                    Lambertian::new(albedo),
                )));
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.add(Box::new(Sphere::new(center, SMALL_RADIUS, Metal::new(albedo, fuzz))));
            } else {
                // Glass
                world.add(Box::new(Sphere::new(center, SMALL_RADIUS, Dielectric::new(1.5))));
            }
        }
    }

    world.add(Box::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    )));

    debug!("Built scene with {} objects", world.len());
    world
}

/// Camera framing the demonstration scene.
pub fn reference_camera_settings() -> CameraSettings {
    CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(16.0 / 9.0)
        .with_shutter(0.0, 1.0)
}
