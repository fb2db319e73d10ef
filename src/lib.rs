//! Synthetic film-degradation effects for RGBA raster images.
//!
//! The crate exposes a small linear pipeline: a grain stage composites a
//! fresh random noise field over the source image, then a scratch stage
//! composites a scaled, constant-alpha noise layer on top. Every stage
//! consumes its inputs by reference and produces a new buffer, so the
//! pipeline stays composable and side-effect free. Output extent always
//! matches input extent.

pub mod composite;
pub mod noise;
pub mod pipeline;
pub mod resample;

pub use pipeline::{FilmEffectConfig, GrainConfig, ScratchConfig};

use image::RgbaImage;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// An image effect that consumes a source image and produces a new one.
///
/// Intermediate stage failures degrade softly inside `apply`; only a
/// failure to render the final output surfaces as an error, in which case
/// the caller keeps whatever image it was already showing.
pub trait Effect {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage>;
}

/// Effect strength in `[0.0, 1.0]`, clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Intensity(f32);

impl Intensity {
    pub const ZERO: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Convert a 0-100 slider value to an intensity.
    pub fn from_slider(value: u8) -> Self {
        Self::new(value.min(100) as f32 / 100.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}
