use crate::error::{Error, Result};
use rand::Rng;

/// Largest supported side length, 2^14+1.
pub const MAX_GRID_SIZE: usize = (1 << 14) + 1;

/// Recursion never goes deeper than log2(MAX_GRID_SIZE - 1) levels.
const MAX_DEPTH: u32 = 14;

/// A square grid of terrain displacements. Rows map to lines of latitude and columns to lines
/// of longitude once the grid is wrapped around a sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    size: usize,
    values: Vec<f32>,
}

fn validate_size(size: usize) -> Result<()> {
    if size < 3 || size > MAX_GRID_SIZE || !(size - 1).is_power_of_two() {
        return Err(Error::GridSize(size));
    }
    Ok(())
}

impl Heightfield {
    /// Creates a heightfield with every cell set to zero.
    pub fn flat(size: usize) -> Result<Heightfield> {
        validate_size(size)?;
        Ok(Heightfield {
            size,
            values: vec![0.0; size * size],
        })
    }

    /// Synthesizes a heightfield with recursive midpoint displacement. The corners start at zero
    /// and every recursion level perturbs the new points by at most `0.05 / roughness^level`, so
    /// larger roughness values produce smoother terrain.
    pub fn generate<R: Rng + ?Sized>(
        size: usize,
        roughness: f32,
        rng: &mut R,
    ) -> Result<Heightfield> {
        if !(roughness > 0.0 && roughness.is_finite()) {
            return Err(Error::Distribution {
                what: "roughness",
                reason: format!("must be positive and finite, got {}", roughness),
            });
        }

        let mut heightfield = Heightfield::flat(size)?;
        heightfield.displace(0, 0, (size - 1) / 2, 0, roughness, rng);
        Ok(heightfield)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.values[row * self.size + column]
    }

    #[inline]
    fn set(&mut self, row: usize, column: usize, value: f32) {
        self.values[row * self.size + column] = value;
    }

    /// Returns the lowest and highest value in the grid.
    pub fn range(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((std::f32::MAX, std::f32::MIN), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Forces the first and last row to zero. Both rows collapse onto a single pole vertex once
    /// wrapped around a sphere, so they must agree across every column.
    pub fn polarize(&mut self) {
        let last = self.size - 1;
        for column in 0..self.size {
            self.set(0, column, 0.0);
            self.set(last, column, 0.0);
        }
    }

    fn displace<R: Rng + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        stride: usize,
        depth: u32,
        roughness: f32,
        rng: &mut R,
    ) {
        if stride == 0 || depth > MAX_DEPTH {
            return;
        }

        let last = self.size - 1;
        let span = 2 * stride;

        let top_left = self.get(x, y);
        let top_right = self.get(x + span, y);
        let bottom_left = self.get(x, y + span);
        let bottom_right = self.get(x + span, y + span);

        let mid_x = x + stride;
        let mid_y = y + stride;

        let center = (top_left + top_right + bottom_left + bottom_right) / 4.0;
        self.set(mid_x, mid_y, center + offset(roughness, depth, rng));

        // Edge midpoints on the border of the grid are left alone.
        let edge_roughness = roughness + 1.0;
        if mid_x + stride != last {
            let value = (top_right + bottom_right) / 2.0 + offset(edge_roughness, depth, rng);
            self.set(mid_x + stride, mid_y, value);
        }
        if mid_x - stride != 0 {
            let value = (top_left + bottom_left) / 2.0 + offset(edge_roughness, depth, rng);
            self.set(mid_x - stride, mid_y, value);
        }
        if mid_y + stride != last {
            let value = (bottom_left + bottom_right) / 2.0 + offset(edge_roughness, depth, rng);
            self.set(mid_x, mid_y + stride, value);
        }
        if mid_y - stride != 0 {
            let value = (top_left + top_right) / 2.0 + offset(edge_roughness, depth, rng);
            self.set(mid_x, mid_y - stride, value);
        }

        let half = stride / 2;
        self.displace(x, y, half, depth + 1, roughness, rng);
        self.displace(mid_x, y, half, depth + 1, roughness, rng);
        self.displace(x, mid_y, half, depth + 1, roughness, rng);
        self.displace(mid_x, mid_y, half, depth + 1, roughness, rng);
    }
}

/// Uniform offset in `[-0.05, 0.05) / roughness^depth`.
fn offset<R: Rng + ?Sized>(roughness: f32, depth: u32, rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) / roughness.powi(depth as i32) / 10.0
}
