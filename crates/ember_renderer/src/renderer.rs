//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction when converting to 8-bit

use crate::{Camera, ConfigError, Hittable};
use ember_math::random::gen_f32;
use ember_math::{Color, Interval, Ray};
use rand::RngCore;

/// Smallest accepted hit distance. Keeps scattered rays from
/// re-hitting the surface they start on.
pub const T_MIN: f32 = 0.001;

/// Largest image, in pixels, a render may allocate.
pub const MAX_PIXELS: usize = 1 << 28;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl RenderConfig {
    /// Width and aspect ratio determine the height, rounded down.
    pub fn from_aspect(image_width: u32, aspect_ratio: f64) -> Self {
        Self {
            image_width,
            image_height: (image_width as f64 / aspect_ratio) as u32,
            ..Self::default()
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }
        let pixels = (self.image_width as usize).checked_mul(self.image_height as usize);
        if !pixels.is_some_and(|n| n <= MAX_PIXELS) {
            return Err(ConfigError::ImageTooLarge {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::NoBounces);
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 50,
            max_depth: 5,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Each bounce multiplies in the attenuation of the surface it scattered
/// from. Paths that run out of depth or get absorbed contribute black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene: white at the bottom
/// blending to sky blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
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
///
/// Channels are clamped below 1.0 so a full-intensity value maps to 255
/// rather than wrapping.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Jittered camera ray for buffer pixel (x, y), where y = 0 is the top row.
///
/// The viewport's t coordinate grows upward, so buffer rows are flipped.
pub fn pixel_ray(camera: &Camera, config: &RenderConfig, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
    let j = config.image_height - 1 - y;
    let s = (x as f32 + gen_f32(rng)) / config.image_width.saturating_sub(1).max(1) as f32;
    let t = (j as f32 + gen_f32(rng)) / config.image_height.saturating_sub(1).max(1) as f32;
    camera.get_ray(s, t, rng)
}

/// Render a single pixel with multi-sampling, returning the average.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = pixel_ray(camera, config, x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Linear-light render output, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Tone-mapped, packed RGB bytes, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig, rng: &mut dyn RngCore) -> ImageBuffer {
    render_with_progress(camera, world, config, rng, |_| {})
}

/// Like [`render`], calling `on_row` with the index of each finished row.
pub fn render_with_progress<F>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    mut on_row: F,
) -> ImageBuffer
where
    F: FnMut(u32),
{
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for y in 0..config.image_height {
        for x in 0..config.image_width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
        on_row(y);
    }

    image
}
