mod body;
mod generator;
mod heightfield;
mod mesh;
pub mod palette;
pub mod sphere;
pub mod texture;

pub use self::body::{BodyId, BodyKind, OrbitalBody, PlanetKind, PrimaryMotion};
pub use self::generator::{orbital_speed, SystemGenerator};
pub use self::heightfield::{Heightfield, MAX_GRID_SIZE};
pub use self::mesh::Mesh;
pub use self::texture::TextureKind;
