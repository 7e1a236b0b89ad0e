use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Geometry of a latitude/longitude sphere. Positions, normals, uvs and (once painted) colors
/// hold one entry per vertex; `indices` holds three entries per triangle.
#[derive(Clone, Debug)]
pub struct Mesh {
    latitudes: usize,
    longitudes: usize,
    pub(super) positions: Vec<Point3<f32>>,
    pub(super) normals: Vec<Vector3<f32>>,
    pub(super) uvs: Vec<Point2<f32>>,
    pub(super) indices: Vec<u32>,
    colors: Option<Vec<Vector3<f32>>>,
}

impl Mesh {
    pub(super) fn with_capacity(latitudes: usize, longitudes: usize) -> Mesh {
        let vertices = latitudes * longitudes;
        Mesh {
            latitudes,
            longitudes,
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: vec![Point2::origin(); vertices],
            indices: Vec::with_capacity(6 * (latitudes - 1) * longitudes),
            colors: None,
        }
    }

    pub fn latitudes(&self) -> usize {
        self.latitudes
    }

    pub fn longitudes(&self) -> usize {
        self.longitudes
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Point2<f32>] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn colors(&self) -> Option<&[Vector3<f32>]> {
        self.colors.as_ref().map(|c| c.as_slice())
    }

    /// Iterates over the vertex indices of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Replaces the color buffer. The buffer must hold one color per vertex.
    pub fn set_colors(&mut self, colors: Vec<Vector3<f32>>) -> Result<()> {
        if colors.len() != self.vertex_count() {
            return Err(Error::BufferLength {
                expected: self.vertex_count(),
                actual: colors.len(),
            });
        }
        self.colors = Some(colors);
        Ok(())
    }

    /// Interleaves position, normal, color and uv into a flat vertex buffer of 11 floats per
    /// vertex. Vertices without a color get white.
    pub fn interleaved(&self) -> Vec<f32> {
        let white = *super::palette::WHITE;
        let mut data = Vec::with_capacity(self.vertex_count() * 11);
        for i in 0..self.vertex_count() {
            let p = &self.positions[i];
            let n = &self.normals[i];
            let c = self.colors.as_ref().map(|c| &c[i]).unwrap_or(&white);
            let uv = &self.uvs[i];
            data.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c.x, c.y, c.z, uv.x, uv.y]);
        }
        data
    }
}
