/// Film effect example
/// Applies grain and scratches to a synthetic test image

use film_effect::{Effect, FilmEffectConfig};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Build a gradient test image so the demo needs no assets
    let img = RgbaImage::from_fn(512, 512, |x, y| {
        Rgba([(x / 2) as u8, (y / 2) as u8, 128, 255])
    });
    img.save(output_dir.join("film_effect_input.png"))?;

    // Slider positions, as a host UI would supply them
    let config = FilmEffectConfig::from_sliders(50, 80);
    let out = config.apply(&img)?;
    out.save(output_dir.join("film_effect_output.png"))?;

    println!("✓ Film effect applied successfully!");
    println!("  Input:    tmp/film_effect_input.png");
    println!("  Output:   tmp/film_effect_output.png");

    Ok(())
}
