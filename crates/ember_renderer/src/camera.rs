//! Camera for ray generation.
//!
//! A thin-lens camera: rays start on a disk around the eye (depth of
//! field) and carry a time sampled from the shutter interval (motion blur).

use crate::ConfigError;
use ember_math::random::{gen_range_f32, random_in_unit_disk};
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Placement and lens description used to build a [`Camera`].
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,         // Vertical field of view in degrees
    pub aspect_ratio: f32, // Viewport width / height
    pub aperture: f32,     // Lens diameter, 0 for a pinhole
    pub focus_dist: f32,   // Distance from camera to plane of perfect focus

    // Shutter
    pub shutter_open: f32,
    pub shutter_close: f32,
}

impl CameraSettings {
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            shutter_open: 0.0,
            shutter_close: 0.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the interval ray times are drawn from.
    pub fn with_shutter(mut self, open: f32, close: f32) -> Self {
        self.shutter_open = open;
        self.shutter_close = close;
        self
    }

    /// Validate the settings and precompute the camera frame.
    pub fn build(&self) -> Result<Camera, ConfigError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFov(self.vfov));
        }
        if !(self.focus_dist > 0.0) {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.aperture >= 0.0) {
            return Err(ConfigError::InvalidAperture(self.aperture));
        }
        if self.shutter_close < self.shutter_open {
            return Err(ConfigError::ReversedShutter {
                open: self.shutter_open,
                close: self.shutter_close,
            });
        }

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let view = self.look_from - self.look_at;
        let side = self.vup.cross(view);
        if view.length_squared() == 0.0 || side.length_squared() == 0.0 {
            return Err(ConfigError::DegenerateView);
        }
        let w = view.normalize();
        let u = side.normalize();
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Ok(Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            shutter_open: self.shutter_open,
            shutter_close: self.shutter_close,
        })
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    shutter_open: f32,
    shutter_close: f32,
}

impl Camera {
    /// Generate a ray through viewport coordinates (s, t).
    ///
    /// `s` runs left to right and `t` bottom to top, both over [0, 1].
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let time = gen_range_f32(rng, self.shutter_open, self.shutter_close);

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
            time,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Unit vector pointing from the eye toward the scene.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }
}
