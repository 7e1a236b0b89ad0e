use super::heightfield::Heightfield;
use super::mesh::Mesh;
use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};
use std::f64::consts::PI;

/// Builds a latitude/longitude sphere. Latitude `0..latitudes` spans the polar angle `0..π`
/// inclusive, longitude `0..longitudes` spans the azimuth `0..2π` and wraps around. When a
/// heightfield is given, it is stretched over the whole sphere: latitude `0..latitudes` spans
/// rows `0..=size-1`, so both pole rings read the grid's first and last row, and longitude spans
/// columns `0..size-1`. The sampled cell is added to the radius of that vertex.
///
/// Normals are faceted: every triangle overwrites the normals of its three vertices with its
/// own geometric normal, so a vertex ends up with the normal of the last triangle (in index
/// order) that references it. UVs are unwrapped per triangle in the same fashion.
pub fn build(
    radius: f32,
    latitudes: usize,
    longitudes: usize,
    heightfield: Option<&Heightfield>,
) -> Result<Mesh> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(Error::Radius(radius as f64));
    }
    if latitudes < 3 {
        return Err(Error::Latitudes(latitudes));
    }
    if longitudes < 4 {
        return Err(Error::Longitudes(longitudes));
    }
    if let Some(heightfield) = heightfield {
        if heightfield.size() < latitudes || heightfield.size() < longitudes {
            return Err(Error::HeightfieldTooSmall {
                size: heightfield.size(),
                latitudes,
                longitudes,
            });
        }
    }

    let mut mesh = Mesh::with_capacity(latitudes, longitudes);

    let delta_theta = PI / (latitudes - 1) as f64;
    let delta_phi = 2.0 * PI / longitudes as f64;

    for latitude in 0..latitudes {
        let theta = latitude as f64 * delta_theta;
        for longitude in 0..longitudes {
            let phi = longitude as f64 * delta_phi;
            let normal = Vector3::new(
                (theta.sin() * phi.sin()) as f32,
                theta.cos() as f32,
                (theta.sin() * phi.cos()) as f32,
            );
            let displacement = heightfield.map_or(0.0, |h| {
                let last = h.size() - 1;
                h.get(
                    latitude * last / (latitudes - 1),
                    longitude * last / longitudes,
                )
            });

            mesh.positions
                .push(Point3::from(normal * (radius + displacement)));
            mesh.normals.push(normal);
        }
    }

    // Every quad between two rings is split into two triangles, wound the same way.
    let ring = longitudes as u32;
    for latitude in 0..latitudes as u32 - 1 {
        for longitude in 0..ring {
            let next = (longitude + 1) % ring;
            let a = latitude * ring + longitude;
            let b = latitude * ring + next;
            let c = (latitude + 1) * ring + next;
            let d = (latitude + 1) * ring + longitude;
            mesh.indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
    }

    facet(&mut mesh);

    Ok(mesh)
}

/// Geometric normal of a triangle, wound like the index buffer. Triangles that collapse onto a
/// pole have no area; those fall back to the direction of their centroid.
pub fn triangle_normal(p1: &Point3<f32>, p2: &Point3<f32>, p3: &Point3<f32>) -> Vector3<f32> {
    let cross = (p3 - p1).cross(&(p2 - p1));
    let length = cross.norm();
    if length > std::f32::EPSILON * p1.coords.norm().max(1.0) {
        return cross / length;
    }

    let centroid = (p1.coords + p2.coords + p3.coords) / 3.0;
    centroid
        .try_normalize(std::f32::EPSILON)
        .unwrap_or_else(Vector3::y)
}

/// Lays a triangle flat in uv space. The longest edge is scaled to unit length and becomes the
/// baseline from `(0, 0)` to `(1, 0)`; the remaining vertex is placed by the angle it makes with
/// that edge. When several edges share the longest length, the edge `p2-p3` wins over `p1-p3`,
/// which wins over `p1-p2`.
pub fn unwrap_triangle(p1: &Point3<f32>, p2: &Point3<f32>, p3: &Point3<f32>) -> [Point2<f32>; 3] {
    let e12 = (p2 - p1).norm();
    let e13 = (p3 - p1).norm();
    let e23 = (p3 - p2).norm();
    let longest = e12.max(e13).max(e23);

    let origin = Point2::origin();
    let unit = Point2::new(1.0, 0.0);
    if !(longest > 0.0) {
        return [origin; 3];
    }

    if e23 == longest {
        [place(p2, p3, p1, longest), origin, unit]
    } else if e13 == longest {
        [origin, place(p1, p3, p2, longest), unit]
    } else {
        [origin, unit, place(p1, p2, p3, longest)]
    }
}

/// Position of `other` relative to the baseline `start -> end`, scaled by `1 / longest`.
fn place(start: &Point3<f32>, end: &Point3<f32>, other: &Point3<f32>, longest: f32) -> Point2<f32> {
    let base = (end - start) / longest;
    let arm = (other - start) / longest;

    let arm_length = arm.norm();
    let base_length = base.norm();
    if arm_length == 0.0 || base_length == 0.0 {
        return Point2::origin();
    }

    let cos = (base.dot(&arm) / (base_length * arm_length)).max(-1.0).min(1.0);
    let theta = cos.acos();
    Point2::new(arm_length * theta.cos(), arm_length * theta.sin())
}

fn facet(mesh: &mut Mesh) {
    for t in 0..mesh.indices.len() / 3 {
        let i = [
            mesh.indices[3 * t] as usize,
            mesh.indices[3 * t + 1] as usize,
            mesh.indices[3 * t + 2] as usize,
        ];
        let (p1, p2, p3) = (mesh.positions[i[0]], mesh.positions[i[1]], mesh.positions[i[2]]);

        let normal = triangle_normal(&p1, &p2, &p3);
        let uvs = unwrap_triangle(&p1, &p2, &p3);
        for corner in 0..3 {
            mesh.normals[i[corner]] = normal;
            mesh.uvs[i[corner]] = uvs[corner];
        }
    }
}
