/// Grain effect example
/// Composites a random noise field over a synthetic test image

use film_effect::{Effect, GrainConfig, Intensity};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = RgbaImage::from_pixel(512, 512, Rgba([128, 128, 128, 255]));

    let effect = GrainConfig::new().with_intensity(Intensity::new(0.5));
    let out = effect.apply(&img)?;
    out.save(output_dir.join("grain_effect.png"))?;

    println!("✓ Grain effect applied successfully!");
    println!("  Effect:   tmp/grain_effect.png");

    Ok(())
}
