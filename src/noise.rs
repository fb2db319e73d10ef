//! Uniform random RGBA noise fields.

use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Noise field generator configuration.
///
/// Every channel of every pixel, alpha included, is an independent uniform
/// random byte. By default each invocation draws fresh entropy; setting a
/// seed makes the field reproducible for deterministic tests.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct NoiseConfig {
    #[derivative(Default(value = "None"))]
    seed: Option<u64>,
}

impl NoiseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a noise field covering exactly `width` x `height`.
    ///
    /// Returns `None` when the field cannot be produced (extent arithmetic
    /// overflows, or the assembled buffer does not match the extent).
    /// Callers treat `None` as a soft failure and keep their input image.
    pub fn generate(&self, width: u32, height: u32) -> Option<RgbaImage> {
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        let mut buf = vec![0u8; len];

        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed).fill(&mut buf[..]),
            None => rand::rng().fill(&mut buf[..]),
        }

        RgbaImage::from_raw(width, height, buf)
    }
}
