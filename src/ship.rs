use crate::camera::CameraProbe;
use crate::collision::{Collidable, ProbeSettings};
use crate::planet::{BodyId, OrbitalBody};
use crate::transform::{Transform, Transformable};
use nalgebra::{Point3, Translation3, Vector3};

/// The player's ship. It rides just below and ahead of the camera, at the collision probe,
/// displaced by whatever its own velocity has carried it since launch.
pub struct Spaceship {
    transform: Transform,
    velocity: Vector3<f64>,
    drift: Vector3<f64>,
    last_update: f64,
}

impl Spaceship {
    pub fn new(now: f64) -> Spaceship {
        Spaceship {
            transform: Transform::identity(),
            velocity: Vector3::zeros(),
            drift: Vector3::zeros(),
            last_update: now,
        }
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3<f64>) -> &mut Self {
        self.velocity = velocity;
        self
    }

    /// Offset from the probe point accumulated by the ship's own velocity.
    pub fn drift(&self) -> &Vector3<f64> {
        &self.drift
    }

    pub fn advance(&mut self, now: f64) {
        let step = self.velocity * (now - self.last_update);
        self.drift += step;
        self.transform.translation.vector += step;
        self.last_update = now;
    }

    pub fn follow<P: CameraProbe + ?Sized>(&mut self, probe: &P, settings: &ProbeSettings) {
        self.transform.translation =
            Translation3::from(settings.probe_point(probe).coords + self.drift);
    }
}

impl Transformable for Spaceship {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// A figure standing on the surface of a body, on the side facing the camera.
pub struct Avatar {
    body: BodyId,
    transform: Transform,
}

impl Avatar {
    pub fn new(body: BodyId) -> Avatar {
        Avatar {
            body,
            transform: Transform::identity(),
        }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn follow<P: CameraProbe + ?Sized>(&mut self, probe: &P, body: &OrbitalBody) {
        let center = body.center();
        let direction = (probe.position() - center)
            .try_normalize(std::f64::EPSILON)
            .unwrap_or_else(Vector3::y);
        let surface: Point3<f64> = center + direction * body.radius();
        self.transform.translation = Translation3::from(surface.coords);
    }
}

impl Transformable for Avatar {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::id_arena::Arena;
    use crate::planet::{sphere, BodyKind, PlanetKind};

    #[test]
    fn ship_parks_at_the_probe_point() {
        let camera = Camera::new();
        let settings = ProbeSettings::default();
        let mut ship = Spaceship::new(0.0);
        ship.follow(&camera, &settings);
        assert!((ship.position() - Point3::new(0.0, -1.0, 197.0)).norm() < 1.0e-9);
    }

    #[test]
    fn ship_integrates_velocity() {
        let mut ship = Spaceship::new(1.0);
        ship.set_velocity(Vector3::new(2.0, 0.0, -1.0));
        ship.advance(3.0);
        assert_eq!(ship.position(), Point3::new(4.0, 0.0, -2.0));
    }

    #[test]
    fn following_keeps_the_drift() {
        let camera = Camera::new();
        let settings = ProbeSettings::default();
        let mut ship = Spaceship::new(0.0);
        ship.set_velocity(Vector3::new(1.0, 0.0, 0.0));
        ship.advance(2.0);
        ship.follow(&camera, &settings);
        assert_eq!(ship.drift(), &Vector3::new(2.0, 0.0, 0.0));
        assert!((ship.position() - Point3::new(2.0, -1.0, 197.0)).norm() < 1.0e-9);
    }

    #[test]
    fn avatar_stands_on_the_near_side() {
        let mut arena = Arena::new();
        let mut planet = OrbitalBody::new(
            BodyKind::Planet(PlanetKind::Gaseous),
            sphere::build(1.0, 3, 4, None).unwrap(),
            0.0,
        );
        planet.scale_by(20.0);
        planet.translate_by(&Vector3::new(0.0, 0.0, 100.0));
        let id = arena.insert(planet);

        let mut avatar = Avatar::new(id);
        let body = arena.get(avatar.body()).unwrap();
        avatar.follow(&Camera::new(), body);
        assert!((avatar.position() - Point3::new(0.0, 0.0, 120.0)).norm() < 1.0e-9);
    }
}
