//! Constant-alpha masking and source-over compositing.

use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};

/// Constant-alpha mask configuration.
///
/// Re-encodes the alpha channel of every covered pixel as a fixed value.
/// Fully transparent pixels stay transparent, so a mask applied to a
/// partially covered layer never paints its empty regions.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct AlphaMaskConfig {
    #[derivative(Default(value = "1.0"))]
    alpha: f32,
}

impl AlphaMaskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mask(&self, image: &RgbaImage) -> RgbaImage {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut out = image.clone();
        for pixel in out.pixels_mut() {
            if pixel[3] > 0 {
                pixel[3] = alpha;
            }
        }
        out
    }
}

/// Source-over blend of `foreground` onto `background`.
///
/// Straight-alpha blending, per pixel and per channel:
/// `a_out = a_f + a_b * (1 - a_f)` and
/// `c_out = (c_f * a_f + c_b * a_b * (1 - a_f)) / a_out`.
///
/// The output extent equals the background extent. Foreground pixels
/// outside it are dropped; background pixels with no foreground
/// counterpart pass through unchanged.
pub fn source_over(foreground: &RgbaImage, background: &RgbaImage) -> RgbaImage {
    let (width, height) = background.dimensions();
    let mut out = background.clone();

    for y in 0..height.min(foreground.height()) {
        for x in 0..width.min(foreground.width()) {
            let fg = foreground.get_pixel(x, y);
            let bg = background.get_pixel(x, y);
            out.put_pixel(x, y, blend_pixel(fg, bg));
        }
    }

    out
}

fn blend_pixel(fg: &Rgba<u8>, bg: &Rgba<u8>) -> Rgba<u8> {
    let fa = fg[3] as f32 / 255.0;
    let ba = bg[3] as f32 / 255.0;
    let oa = fa + ba * (1.0 - fa);

    if oa == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let f = fg[i] as f32;
        let b = bg[i] as f32;
        let c = (f * fa + b * ba * (1.0 - fa)) / oa;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (oa * 255.0).round() as u8;

    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn test_opaque_foreground_wins() {
        let fg = solid(2, 2, [255, 0, 0, 255]);
        let bg = solid(2, 2, [0, 0, 255, 255]);
        let out = source_over(&fg, &bg);
        assert!(out.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_transparent_foreground_passes_background() {
        let fg = solid(2, 2, [255, 255, 255, 0]);
        let bg = solid(2, 2, [10, 20, 30, 255]);
        let out = source_over(&fg, &bg);
        assert!(out.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_blend_arithmetic() {
        // 0.3 alpha red over opaque mid-gray:
        // c = 255 * (77/255) + 128 * (1 - 77/255) = 166.35 -> 166
        let fg = solid(1, 1, [255, 0, 0, 77]);
        let bg = solid(1, 1, [128, 128, 128, 255]);
        let out = source_over(&fg, &bg);
        assert_eq!(*out.get_pixel(0, 0), Rgba([166, 89, 89, 255]));
    }

    #[test]
    fn test_output_extent_follows_background() {
        let fg = solid(2, 2, [255, 0, 0, 255]);
        let bg = solid(4, 4, [0, 0, 255, 255]);
        let out = source_over(&fg, &bg);

        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        // Outside the foreground the background passes through.
        assert_eq!(*out.get_pixel(3, 3), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_oversized_foreground_is_cropped() {
        let fg = solid(8, 8, [255, 0, 0, 255]);
        let bg = solid(3, 3, [0, 0, 255, 255]);
        let out = source_over(&fg, &bg);
        assert_eq!(out.dimensions(), (3, 3));
    }

    #[test]
    fn test_both_transparent_stays_transparent() {
        let fg = solid(1, 1, [50, 60, 70, 0]);
        let bg = solid(1, 1, [1, 2, 3, 0]);
        let out = source_over(&fg, &bg);
        assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_mask_sets_constant_alpha() {
        let image = solid(2, 2, [100, 150, 200, 255]);
        let out = AlphaMaskConfig::new().with_alpha(0.3).mask(&image);
        assert!(out.pixels().all(|p| p[3] == 77));
        // Color channels are untouched.
        assert!(out.pixels().all(|p| p[0] == 100 && p[1] == 150 && p[2] == 200));
    }

    #[test]
    fn test_mask_preserves_transparent_pixels() {
        let mut image = solid(2, 1, [9, 9, 9, 180]);
        image.put_pixel(1, 0, Rgba([9, 9, 9, 0]));

        let out = AlphaMaskConfig::new().with_alpha(0.5).mask(&image);
        assert_eq!(out.get_pixel(0, 0)[3], 128);
        assert_eq!(out.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn test_mask_alpha_is_clamped() {
        let image = solid(1, 1, [0, 0, 0, 10]);
        let out = AlphaMaskConfig::new().with_alpha(7.5).mask(&image);
        assert_eq!(out.get_pixel(0, 0)[3], 255);
    }
}
