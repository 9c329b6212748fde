// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
pub mod random;
pub mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{near_zero, reflect, refract, unit_vector};

/// RGB color in linear light. Shares the vector representation.
pub type Color = Vec3;
