//! Ember renderer - CPU path tracing of sphere scenes.
//!
//! A Monte Carlo path tracer: camera rays are traced recursively through
//! a list of spheres, each surface's material deciding whether and where
//! the path continues. Pixels are averaged over many jittered samples.

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
pub mod scenes;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSettings};
pub use error::ConfigError;
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, pixel_ray, ray_color, render, render_pixel, render_with_progress, sky_gradient,
    ImageBuffer, RenderConfig, T_MIN,
};
pub use sphere::{MovingSphere, Sphere};

/// Re-export common math types from ember_math
pub use ember_math::{Color, Interval, Ray, Vec3};
