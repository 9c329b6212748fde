//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket draws from its own generator
//! seeded by the bucket index, so the image does not depend on how rayon
//! schedules the work.

use crate::renderer::{render_pixel, ImageBuffer, RenderConfig};
use crate::{Camera, Hittable};
use ember_math::Color;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position of this bucket in row-major order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Cover the image with buckets in row-major order. Buckets on the right
/// and bottom edges are cut to fit.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let bucket_size = bucket_size.max(1);

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(bucket.index as u64));
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, &mut rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their place in the full image.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
                }
            }
        }
    }
}

/// Render the scene on the rayon thread pool.
///
/// `on_bucket` runs once per finished bucket, possibly from several
/// threads at once.
pub fn render_parallel<F>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
    on_bucket: F,
) -> ImageBuffer
where
    F: Fn(&Bucket) + Sync,
{
    let buckets = generate_buckets(config.image_width, config.image_height, DEFAULT_BUCKET_SIZE);
    debug!(
        "Rendering {} buckets on {} threads",
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, world, config, seed);
            on_bucket(bucket);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in &results {
        result.write_to(&mut image);
    }
    image
}
