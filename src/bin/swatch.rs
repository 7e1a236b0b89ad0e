#[macro_use]
extern crate log;

use image::ImageBuffer;
use orrery::planet::texture::{self, TextureKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const GAMMA_EXP: f32 = 1.0 / 2.2;

trait CanGammaCorrect {
    fn from_linear(self) -> Self;
}

impl CanGammaCorrect for f32 {
    fn from_linear(self) -> Self {
        self.max(0.0).powf(GAMMA_EXP)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let latitudes: usize = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(129);
    let longitudes: usize = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(256);
    let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for &kind in &[TextureKind::Rocky, TextureKind::Gaseous] {
        let (primary, secondary) = kind.base_colors(0.05, &mut rng)?;
        let colors = texture::paint(
            latitudes,
            longitudes,
            primary,
            secondary,
            &kind.pattern(),
            &mut rng,
        );

        let image = ImageBuffer::from_fn(longitudes as u32, latitudes as u32, |x, y| {
            let color = colors[y as usize * longitudes + x as usize];
            image::Rgb([
                (color.x.from_linear() * 255.0) as u8,
                (color.y.from_linear() * 255.0) as u8,
                (color.z.from_linear() * 255.0) as u8,
            ])
        });

        let filename = format!("swatch_{:?}.png", kind).to_lowercase();
        info!("Creating {}..", filename);
        image.save(&filename)?;
    }
    Ok(())
}
