//! Errors raised while validating render and camera configuration.

use thiserror::Error;

/// Invalid configuration detected before any ray is traced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("image of {width}x{height} pixels is too large to render")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("max depth must be at least 1")]
    NoBounces,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("shutter closes at {close} before it opens at {open}")]
    ReversedShutter { open: f32, close: f32 },

    #[error("look_from, look_at and vup do not span a camera frame")]
    DegenerateView,
}
