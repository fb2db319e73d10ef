//! Affine scale resampling, clamped to the source extent.

use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Affine scale configuration.
///
/// The transform scales about the origin; the output buffer keeps the
/// source extent, so a shrinking scale leaves the remainder of the extent
/// fully transparent and an enlarging scale is cropped. Nearest-neighbor
/// sampling, evaluated eagerly.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ScaleConfig {
    #[derivative(Default(value = "1.0"))]
    sx: f32,
    #[derivative(Default(value = "1.0"))]
    sy: f32,
}

impl ScaleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equal scale on both axes.
    pub fn uniform(scale: f32) -> Self {
        Self::default().with_sx(scale).with_sy(scale)
    }

    /// Resample `image` under the scale transform.
    pub fn resample(&self, image: &RgbaImage) -> RgbaImage {
        if self.sx == 1.0 && self.sy == 1.0 {
            return image.clone();
        }
        if self.sx <= 0.0 || self.sy <= 0.0 {
            return RgbaImage::from_pixel(image.width(), image.height(), TRANSPARENT);
        }

        warp(
            image,
            &Projection::scale(self.sx, self.sy),
            Interpolation::Nearest,
            TRANSPARENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn test_identity_scale_is_noop() {
        let image = solid(4, 4, [200, 10, 30, 255]);
        let out = ScaleConfig::uniform(1.0).resample(&image);
        assert_eq!(out, image);
    }

    #[test]
    fn test_output_keeps_source_extent() {
        let image = solid(6, 3, [1, 2, 3, 255]);
        let out = ScaleConfig::uniform(0.5).resample(&image);
        assert_eq!(out.dimensions(), (6, 3));
    }

    #[test]
    fn test_shrink_leaves_remainder_transparent() {
        let image = solid(4, 4, [255, 0, 0, 255]);
        let out = ScaleConfig::uniform(0.5).resample(&image);

        // The scaled content collapses toward the origin.
        assert_eq!(out.get_pixel(0, 0)[3], 255);
        // Pixels whose preimage falls outside the source are transparent.
        assert_eq!(*out.get_pixel(3, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_degenerate_scale_is_fully_transparent() {
        let image = solid(4, 4, [255, 255, 255, 255]);
        let out = ScaleConfig::uniform(0.0).resample(&image);
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_anisotropic_scale() {
        let image = solid(8, 8, [0, 128, 0, 255]);
        let out = ScaleConfig::new().with_sx(0.25).with_sy(1.0).resample(&image);
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(0, 7)[3], 255);
        assert_eq!(out.get_pixel(7, 0)[3], 0);
    }
}
