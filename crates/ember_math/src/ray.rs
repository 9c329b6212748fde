use crate::Vec3;

/// Half-line traced through the scene, stamped with the shutter instant it
/// was fired at.
///
/// Directions are stored as given and may have any length; hit distances
/// are measured in multiples of it. Scattered rays inherit `time` so a
/// path sees moving spheres frozen at a single moment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Point reached after travelling `t` direction-lengths from the origin.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
