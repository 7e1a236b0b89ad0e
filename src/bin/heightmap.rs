#[macro_use]
extern crate log;

use image::ImageBuffer;
use orrery::planet::Heightfield;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let size: usize = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(513);
    let roughness: f32 = args.next().map(|s| s.parse::<f32>()).transpose()?.unwrap_or(1.6);
    let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut heightfield = Heightfield::generate(size, roughness, &mut rng)?;
    heightfield.polarize();

    let (min, max) = heightfield.range();
    let scale = if max > min { 255.0 / (max - min) } else { 0.0 };
    info!("heightfield {}x{} spans [{}, {}]", size, size, min, max);

    let image = ImageBuffer::from_fn(size as u32, size as u32, |x, y| {
        let height = heightfield.get(y as usize, x as usize);
        let color = ((height - min) * scale) as u8;
        image::Luma([color])
    });

    let filename = format!("heightmap_{}_{}.png", size, seed);
    image.save(&filename)?;
    info!("wrote {}", filename);
    Ok(())
}
