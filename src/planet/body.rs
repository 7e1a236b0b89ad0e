use super::mesh::Mesh;
use super::palette::Rgb;
use super::texture::{self, TextureKind};
use crate::collision::Collidable;
use crate::error::Result;
use crate::id_arena::Id;
use crate::transform::{Transform, Transformable};
use nalgebra::{Point3, Vector3};
use rand::Rng;

pub type BodyId = Id;

/// The two families of planets. Each has its own generation profile and surface style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanetKind {
    Rocky,
    Gaseous,
}

impl PlanetKind {
    pub fn texture(self) -> TextureKind {
        match self {
            PlanetKind::Rocky => TextureKind::Rocky,
            PlanetKind::Gaseous => TextureKind::Gaseous,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BodyKind {
    Sun,
    Planet(PlanetKind),
    /// A moon refers to the planet it orbits by handle; it never owns it.
    Moon { primary: BodyId },
}

/// The part of a primary's state its moons follow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrimaryMotion {
    pub position: Point3<f64>,
    pub orbital_angular_velocity: Vector3<f64>,
}

pub struct OrbitalBody {
    kind: BodyKind,
    mesh: Mesh,
    texture: Option<TextureKind>,
    transform: Transform,

    angular_velocity: Vector3<f64>,
    orbital_angular_velocity: Vector3<f64>,
    last_update: f64,
}

impl OrbitalBody {
    pub fn new(kind: BodyKind, mesh: Mesh, now: f64) -> OrbitalBody {
        OrbitalBody {
            kind,
            mesh,
            texture: None,
            transform: Transform::identity(),
            angular_velocity: Vector3::zeros(),
            orbital_angular_velocity: Vector3::zeros(),
            last_update: now,
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn primary(&self) -> Option<BodyId> {
        match self.kind {
            BodyKind::Moon { primary } => Some(primary),
            _ => None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<TextureKind> {
        self.texture
    }

    pub fn angular_velocity(&self) -> &Vector3<f64> {
        &self.angular_velocity
    }

    pub fn orbital_angular_velocity(&self) -> &Vector3<f64> {
        &self.orbital_angular_velocity
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3<f64>) -> &mut Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn set_orbital_angular_velocity(&mut self, orbital_angular_velocity: Vector3<f64>) -> &mut Self {
        self.orbital_angular_velocity = orbital_angular_velocity;
        self
    }

    pub fn scale_by(&mut self, factor: f64) -> &mut Self {
        self.transform.scale_by(factor);
        self
    }

    /// Snapshot handed to this body's moons when they advance.
    pub fn motion(&self) -> PrimaryMotion {
        PrimaryMotion {
            position: self.transform.position(),
            orbital_angular_velocity: self.orbital_angular_velocity,
        }
    }

    /// Steps the body forward to `now`.
    ///
    /// Without a primary the body spins in place and revolves around the origin. With one, the
    /// body is first carried around the origin by the primary's own revolution, then spins, then
    /// revolves around the primary's position.
    pub fn advance(&mut self, now: f64, primary: Option<&PrimaryMotion>) {
        let dt = now - self.last_update;

        let pivot = match primary {
            Some(primary) => {
                revolve(&mut self.transform, &Point3::origin(), &primary.orbital_angular_velocity, dt);
                primary.position
            }
            None => Point3::origin(),
        };

        let spin = self.angular_velocity.norm();
        if spin > 0.0 {
            self.transform.rotate(spin * dt, &self.angular_velocity);
        }

        revolve(&mut self.transform, &pivot, &self.orbital_angular_velocity, dt);

        self.last_update = now;
    }

    /// Repaints the color buffer in a new style. The geometry is left untouched.
    pub fn retexture<R: Rng + ?Sized>(&mut self, kind: TextureKind, jitter: f32, rng: &mut R) -> Result<()> {
        texture::apply(&mut self.mesh, kind, jitter, rng)?;
        self.texture = Some(kind);
        Ok(())
    }

    pub fn fill(&mut self, color: Rgb) -> Result<()> {
        texture::fill(&mut self.mesh, color)?;
        self.texture = None;
        Ok(())
    }
}

fn revolve(transform: &mut Transform, pivot: &Point3<f64>, angular_velocity: &Vector3<f64>, dt: f64) {
    let speed = angular_velocity.norm();
    if speed > 0.0 {
        transform.revolve_around(pivot, speed * dt, angular_velocity);
    }
}

impl Transformable for OrbitalBody {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl Collidable for OrbitalBody {
    fn center(&self) -> Point3<f64> {
        self.transform.position()
    }

    fn radius(&self) -> f64 {
        (Vector3::x() * self.transform.scale).norm()
    }
}
