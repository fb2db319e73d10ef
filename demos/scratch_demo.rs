/// Scratch effect example
/// Overlays a scaled, constant-alpha noise layer on a synthetic test image

use film_effect::{Effect, Intensity, ScratchConfig};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = RgbaImage::from_pixel(512, 512, Rgba([180, 170, 150, 255]));

    let effect = ScratchConfig::new().with_intensity(Intensity::new(0.8));
    let out = effect.apply(&img)?;
    out.save(output_dir.join("scratch_effect.png"))?;

    println!("✓ Scratch effect applied successfully!");
    println!("  Effect:   tmp/scratch_effect.png");

    Ok(())
}
