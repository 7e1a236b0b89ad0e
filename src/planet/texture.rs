use super::mesh::Mesh;
use super::palette::{self, Rgb};
use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f32::consts::PI;

/// The two procedural surface styles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureKind {
    /// Mottled turbulence between two dark colors.
    Rocky,
    /// Turbulent stripes between a bright and a dark color.
    Gaseous,
}

/// Parameters of the banded turbulence pattern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub x_period: f32,
    pub y_period: f32,
    pub turbulence_power: f32,
    pub turbulence_size: f32,
}

impl TextureKind {
    pub fn pattern(self) -> Pattern {
        match self {
            TextureKind::Rocky => Pattern {
                x_period: 0.0,
                y_period: 0.0,
                turbulence_power: 100.0,
                turbulence_size: 32.0,
            },
            TextureKind::Gaseous => Pattern {
                x_period: 5.0,
                y_period: 10.0,
                turbulence_power: 10.0,
                turbulence_size: 32.0,
            },
        }
    }

    /// Draws the primary and secondary base colors for this style.
    pub fn base_colors<R: Rng + ?Sized>(self, jitter: f32, rng: &mut R) -> Result<(Rgb, Rgb)> {
        let colors = match self {
            TextureKind::Rocky => (
                sample_color(&*palette::DARK, jitter, rng)?,
                sample_color(&*palette::DARK, jitter, rng)?,
            ),
            TextureKind::Gaseous => (
                sample_color(&*palette::BRIGHT, jitter, rng)?,
                sample_color(&*palette::DARK, jitter, rng)?,
            ),
        };
        Ok(colors)
    }
}

/// Picks one palette entry and perturbs each channel with Gaussian noise. Channels are clamped
/// to `[0, 1]`.
pub fn sample_color<R: Rng + ?Sized>(palette: &[Rgb], jitter: f32, rng: &mut R) -> Result<Rgb> {
    if !(jitter >= 0.0 && jitter.is_finite()) {
        return Err(Error::Distribution {
            what: "color jitter",
            reason: format!("standard deviation must be finite and non-negative, got {}", jitter),
        });
    }
    let noise = Normal::new(0.0, jitter).map_err(|e| Error::Distribution {
        what: "color jitter",
        reason: e.to_string(),
    })?;
    let base = palette[rng.gen_range(0..palette.len())];
    Ok(base.map(|channel| (channel + noise.sample(rng)).max(0.0).min(1.0)))
}

/// A grid of uniform random values in `[0, 1)` that wraps around on both axes.
#[derive(Clone, Debug)]
pub struct NoiseLattice {
    rows: usize,
    columns: usize,
    values: Vec<f32>,
}

impl NoiseLattice {
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> NoiseLattice {
        NoiseLattice {
            rows,
            columns,
            values: (0..rows * columns).map(|_| rng.gen::<f32>()).collect(),
        }
    }

    pub fn from_values(rows: usize, columns: usize, values: Vec<f32>) -> Result<NoiseLattice> {
        if values.len() != rows * columns {
            return Err(Error::BufferLength {
                expected: rows * columns,
                actual: values.len(),
            });
        }
        Ok(NoiseLattice {
            rows,
            columns,
            values,
        })
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> f32 {
        self.values[row * self.columns + column]
    }

    /// Bilinear interpolation between the lattice cell containing `(x, y)` and its neighbours
    /// at lower indices, wrapping at the edges.
    pub fn smooth(&self, x: f32, y: f32) -> f32 {
        let fract_x = x - x.floor();
        let fract_y = y - y.floor();

        let x1 = (x.floor() as i64).rem_euclid(self.rows as i64) as usize;
        let y1 = (y.floor() as i64).rem_euclid(self.columns as i64) as usize;
        let x2 = (x1 + self.rows - 1) % self.rows;
        let y2 = (y1 + self.columns - 1) % self.columns;

        fract_x * fract_y * self.get(x1, y1)
            + (1.0 - fract_x) * fract_y * self.get(x2, y1)
            + fract_x * (1.0 - fract_y) * self.get(x1, y2)
            + (1.0 - fract_x) * (1.0 - fract_y) * self.get(x2, y2)
    }

    /// Sums smoothed noise over halving scales, from `size` down to 1, normalized to roughly
    /// `[0, 256)`.
    pub fn turbulence(&self, x: f32, y: f32, size: f32) -> f32 {
        if !(size >= 1.0) {
            return 0.0;
        }

        let mut value = 0.0;
        let mut scale = size;
        while scale >= 1.0 {
            value += self.smooth(x / scale, y / scale) * scale;
            scale /= 2.0;
        }
        128.0 * value / size
    }
}

/// Colors a `latitudes x longitudes` grid of vertices with a fresh noise lattice.
pub fn paint<R: Rng + ?Sized>(
    latitudes: usize,
    longitudes: usize,
    primary: Rgb,
    secondary: Rgb,
    pattern: &Pattern,
    rng: &mut R,
) -> Vec<Rgb> {
    let lattice = NoiseLattice::random(latitudes, longitudes, rng);
    paint_with(&lattice, primary, secondary, pattern)
}

/// Colors one vertex per lattice cell. Each vertex blends the two colors by
/// `cos²(π · (banding + turbulence))`.
pub fn paint_with(lattice: &NoiseLattice, primary: Rgb, secondary: Rgb, pattern: &Pattern) -> Vec<Rgb> {
    let latitudes = lattice.rows;
    let longitudes = lattice.columns;

    let mut colors = Vec::with_capacity(latitudes * longitudes);
    for latitude in 0..latitudes {
        for longitude in 0..longitudes {
            let (lat, lon) = (latitude as f32, longitude as f32);
            let xy = lat * pattern.x_period / longitudes as f32
                + lon * pattern.y_period / latitudes as f32
                + pattern.turbulence_power * lattice.turbulence(lat, lon, pattern.turbulence_size)
                    / 256.0;
            let blend = (PI * xy).cos().powi(2);
            colors.push(primary * blend + secondary * (1.0 - blend));
        }
    }
    colors
}

/// Paints a mesh in the given style, drawing fresh base colors and a fresh lattice.
pub fn apply<R: Rng + ?Sized>(mesh: &mut Mesh, kind: TextureKind, jitter: f32, rng: &mut R) -> Result<()> {
    let (primary, secondary) = kind.base_colors(jitter, rng)?;
    let colors = paint(
        mesh.latitudes(),
        mesh.longitudes(),
        primary,
        secondary,
        &kind.pattern(),
        rng,
    );
    mesh.set_colors(colors)
}

/// Paints every vertex of a mesh with one color.
pub fn fill(mesh: &mut Mesh, color: Rgb) -> Result<()> {
    let colors = vec![color; mesh.vertex_count()];
    mesh.set_colors(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::sphere;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn red() -> Rgb {
        Rgb::new(1.0, 0.0, 0.0)
    }

    fn blue() -> Rgb {
        Rgb::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn paint_yields_one_color_per_vertex() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for kind in &[TextureKind::Rocky, TextureKind::Gaseous] {
            let colors = paint(9, 16, red(), blue(), &kind.pattern(), &mut rng);
            assert_eq!(colors.len(), 9 * 16);
            for c in &colors {
                assert!(c.iter().all(|v| v.is_finite() && *v >= 0.0 && *v <= 1.0));
            }
        }
    }

    #[test]
    fn no_banding_and_no_turbulence_gives_the_primary_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pattern = Pattern {
            x_period: 0.0,
            y_period: 0.0,
            turbulence_power: 0.0,
            turbulence_size: 32.0,
        };
        let colors = paint(5, 8, red(), blue(), &pattern, &mut rng);
        assert!(colors.iter().all(|c| *c == red()));
    }

    #[test]
    fn without_banding_color_depends_only_on_the_lattice() {
        let pattern = TextureKind::Rocky.pattern();

        let constant = NoiseLattice::from_values(6, 10, vec![0.37; 60]).unwrap();
        let colors = paint_with(&constant, red(), blue(), &pattern);
        for c in &colors {
            assert!((c - colors[0]).norm() < 1.0e-3);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let lattice = NoiseLattice::random(6, 10, &mut rng);
        let colors = paint_with(&lattice, red(), blue(), &pattern);
        for latitude in 0..6 {
            for longitude in 0..10 {
                let turbulence = lattice.turbulence(latitude as f32, longitude as f32, 32.0);
                let xy = 100.0 * turbulence / 256.0;
                let blend = (PI * xy).cos().powi(2);
                let expected = red() * blend + blue() * (1.0 - blend);
                assert!((colors[latitude * 10 + longitude] - expected).norm() < 1.0e-5);
            }
        }
    }

    #[test]
    fn banding_varies_with_position() {
        let constant = NoiseLattice::from_values(8, 16, vec![0.5; 128]).unwrap();
        let colors = paint_with(&constant, red(), blue(), &TextureKind::Gaseous.pattern());
        let first = colors[0];
        assert!(colors.iter().any(|c| (c - first).norm() > 1.0e-2));
    }

    #[test]
    fn smooth_noise_wraps_on_both_axes() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let lattice = NoiseLattice::random(7, 11, &mut rng);
        for &(x, y) in &[(0.25, 0.5), (3.5, 9.75), (6.9, 10.1)] {
            let v = lattice.smooth(x, y);
            assert!(v >= 0.0 && v < 1.0);
            assert!((lattice.smooth(x + 7.0, y) - v).abs() < 1.0e-4);
            assert!((lattice.smooth(x, y - 11.0) - v).abs() < 1.0e-4);
        }
    }

    #[test]
    fn turbulence_of_a_constant_lattice() {
        let lattice = NoiseLattice::from_values(4, 4, vec![0.5; 16]).unwrap();
        // 32 + 16 + 8 + 4 + 2 + 1 octaves.
        let expected = 128.0 * 0.5 * 63.0 / 32.0;
        assert!((lattice.turbulence(1.3, 2.7, 32.0) - expected).abs() < 1.0e-3);
        assert_eq!(lattice.turbulence(1.0, 1.0, 0.5), 0.0);
    }

    #[test]
    fn lattice_rejects_mismatched_values() {
        assert!(NoiseLattice::from_values(3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn sampled_colors_are_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..100 {
            let c = sample_color(&*palette::BRIGHT, 0.5, &mut rng).unwrap();
            assert!(c.iter().all(|v| *v >= 0.0 && *v <= 1.0));
        }
        assert!(sample_color(&*palette::DARK, -1.0, &mut rng).is_err());
        assert!(sample_color(&*palette::DARK, std::f32::INFINITY, &mut rng).is_err());
        assert!(sample_color(&*palette::DARK, 0.0, &mut rng).is_ok());
    }

    #[test]
    fn apply_fills_the_mesh_color_buffer() {
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let mut mesh = sphere::build(1.0, 9, 12, None).unwrap();
        assert!(mesh.colors().is_none());
        apply(&mut mesh, TextureKind::Gaseous, 0.05, &mut rng).unwrap();
        assert_eq!(mesh.colors().unwrap().len(), mesh.vertex_count());

        fill(&mut mesh, *palette::YELLOW).unwrap();
        assert!(mesh.colors().unwrap().iter().all(|c| *c == *palette::YELLOW));
    }
}
