//! The film-degradation pipeline: grain stage, then scratch stage.

use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

use crate::composite::{self, AlphaMaskConfig};
use crate::noise::NoiseConfig;
use crate::resample::ScaleConfig;
use crate::{Effect, Error, Intensity, Result};

/// Alpha of the scratch overlay. Scratch intensity controls density via
/// the resample scale, never the opacity.
const SCRATCH_ALPHA: f32 = 0.3;

/// Base scale factor for the scratch noise field, modulated by intensity.
const SCRATCH_SCALE: f32 = 0.05;

/// Grain stage configuration.
///
/// Composites a fresh full-extent noise field over the image. The noise's
/// own random alpha does the blending; `intensity` is carried for API
/// fidelity with the slider but does not influence the composite, matching
/// the behavior this pipeline reproduces.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_", strip_option)]
#[non_exhaustive]
pub struct GrainConfig {
    /// Carried for slider fidelity; does not influence the composite.
    #[derivative(Default(value = "Intensity::ZERO"))]
    pub intensity: Intensity,
    #[derivative(Default(value = "None"))]
    pub seed: Option<u64>,
}

impl GrainConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for GrainConfig {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage> {
        let (width, height) = image.dimensions();
        let noise = NoiseConfig::new()
            .with_seed(self.seed)
            .generate(width, height);
        Ok(grain_stage(image, noise))
    }
}

fn grain_stage(source: &RgbaImage, noise: Option<RgbaImage>) -> RgbaImage {
    match noise {
        Some(noise) => composite::source_over(&noise, source),
        None => {
            log::warn!("noise generation failed, skipping grain stage");
            source.clone()
        }
    }
}

/// Scratch stage configuration.
///
/// Generates a noise field, shrinks it by `0.05 * intensity`, pins its
/// alpha to a constant 0.3 and composites it over the image. Intensity 0
/// bypasses the stage entirely.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_", strip_option)]
#[non_exhaustive]
pub struct ScratchConfig {
    #[derivative(Default(value = "Intensity::ZERO"))]
    pub intensity: Intensity,
    #[derivative(Default(value = "None"))]
    pub seed: Option<u64>,
}

impl ScratchConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ScratchConfig {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage> {
        if self.intensity.is_zero() {
            return Ok(image.clone());
        }

        let (width, height) = image.dimensions();
        let noise = NoiseConfig::new()
            .with_seed(self.seed)
            .generate(width, height);
        Ok(scratch_stage(image, noise, self.intensity))
    }
}

fn scratch_stage(
    background: &RgbaImage,
    noise: Option<RgbaImage>,
    intensity: Intensity,
) -> RgbaImage {
    let Some(noise) = noise else {
        log::warn!("noise generation failed, skipping scratch stage");
        return background.clone();
    };

    let scale = SCRATCH_SCALE * intensity.value();
    let scaled = ScaleConfig::uniform(scale).resample(&noise);
    let masked = AlphaMaskConfig::new().with_alpha(SCRATCH_ALPHA).mask(&scaled);
    composite::source_over(&masked, background)
}

/// Full pipeline configuration: grain, then scratches.
#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_", strip_option)]
#[non_exhaustive]
pub struct FilmEffectConfig {
    #[derivative(Default(value = "Intensity::ZERO"))]
    pub grain: Intensity,
    #[derivative(Default(value = "Intensity::ZERO"))]
    pub scratches: Intensity,
    /// Fixed seed for deterministic output; fresh entropy when unset.
    #[derivative(Default(value = "None"))]
    pub seed: Option<u64>,
}

impl FilmEffectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from 0-100 slider positions.
    pub fn from_sliders(grain: u8, scratches: u8) -> Self {
        Self::default()
            .with_grain(Intensity::from_slider(grain))
            .with_scratches(Intensity::from_slider(scratches))
    }
}

impl Effect for FilmEffectConfig {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage> {
        log::debug!(
            "applying film effect: grain={}, scratches={}",
            self.grain.value(),
            self.scratches.value()
        );

        let mut grain = GrainConfig::new().with_intensity(self.grain);
        if let Some(seed) = self.seed {
            grain = grain.with_seed(seed);
        }
        let with_grain = grain.apply(image)?;

        let mut scratches = ScratchConfig::new().with_intensity(self.scratches);
        if let Some(seed) = self.seed {
            // Offset so the two stages draw distinct fields.
            scratches = scratches.with_seed(seed.wrapping_add(1));
        }
        let composed = scratches.apply(&with_grain)?;

        render(composed)
    }
}

/// Assemble the final output buffer. The only hard failure of the
/// pipeline: on error the caller keeps its previous image.
fn render(image: RgbaImage) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    RgbaImage::from_raw(width, height, image.into_raw())
        .ok_or_else(|| Error::Render("output buffer does not match its extent".to_string()))
}
