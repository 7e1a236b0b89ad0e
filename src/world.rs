use crate::camera::CameraProbe;
use crate::collision::{Collidable, ProbeSettings};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::frustum::Frustum;
use crate::id_arena::Arena;
use crate::planet::{BodyId, OrbitalBody, PlanetKind, SystemGenerator, TextureKind};
use crate::render::{RenderTarget, ResourceCache};
use crate::ship::{Avatar, Spaceship};
use crate::transform::Transformable;
use nalgebra::{Matrix4, Vector3};
use rand::seq::SliceRandom;

/// The body the probe ran into and the direction the camera should be pushed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision {
    pub body: BodyId,
    pub push: Vector3<f64>,
}

pub struct World {
    bodies: Arena<OrbitalBody>,
    sun: BodyId,
    planets: Vec<BodyId>,
    moons: Vec<BodyId>,

    spaceship: Spaceship,
    avatar: Option<Avatar>,

    probe: ProbeSettings,
    generator: SystemGenerator,
    stale_colors: Vec<BodyId>,
}

impl World {
    /// Generates a sun, the rocky planets, the gaseous planets beyond them and the moons of all
    /// of them.
    pub fn generate(config: &SystemConfig, now: f64) -> Result<World> {
        let mut generator = SystemGenerator::new(config);
        let mut bodies = Arena::new();

        let sun = bodies.insert(generator.generate_sun(now)?);

        let mut planets = Vec::new();
        let mut min_orbit_radius = config.orbit.min_orbit_radius;
        for &kind in &[PlanetKind::Rocky, PlanetKind::Gaseous] {
            for planet in generator.generate_planets(kind, min_orbit_radius, now)? {
                min_orbit_radius = min_orbit_radius.max(planet.position().coords.norm());
                planets.push(bodies.insert(planet));
            }
        }

        let moons = {
            let primaries = planets
                .iter()
                .filter_map(|&id| bodies.get(id).map(|planet| (id, planet)));
            generator.generate_moons(primaries, now)?
        };
        let moons: Vec<BodyId> = moons.into_iter().map(|moon| bodies.insert(moon)).collect();

        let avatar = choose_avatar_body(&bodies, &planets, generator.rng_mut()).unwrap_or(sun);

        info!(
            "generated a system with {} planets and {} moons",
            planets.len(),
            moons.len()
        );

        Ok(World {
            bodies,
            sun,
            planets,
            moons,
            spaceship: Spaceship::new(now),
            avatar: Some(Avatar::new(avatar)),
            probe: config.probe,
            generator,
            stale_colors: Vec::new(),
        })
    }

    pub fn bodies(&self) -> &Arena<OrbitalBody> {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&OrbitalBody> {
        self.bodies.get(id)
    }

    pub fn sun(&self) -> BodyId {
        self.sun
    }

    pub fn planets(&self) -> &[BodyId] {
        &self.planets
    }

    pub fn moons(&self) -> &[BodyId] {
        &self.moons
    }

    pub fn spaceship(&self) -> &Spaceship {
        &self.spaceship
    }

    pub fn spaceship_mut(&mut self) -> &mut Spaceship {
        &mut self.spaceship
    }

    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }

    pub fn probe(&self) -> &ProbeSettings {
        &self.probe
    }

    /// Advances every body to `now`. Bodies without a primary go first so that each moon reads
    /// the state its planet has at `now`.
    pub fn advance(&mut self, now: f64) {
        for &id in std::iter::once(&self.sun).chain(&self.planets) {
            if let Some(body) = self.bodies.get_mut(id) {
                body.advance(now, None);
            }
        }

        for &id in &self.moons {
            let primary = self
                .bodies
                .get(id)
                .and_then(OrbitalBody::primary)
                .and_then(|primary| self.bodies.get(primary))
                .map(OrbitalBody::motion);
            if primary.is_none() {
                debug!("moon {:?} lost its primary, orbiting the origin", id);
            }
            if let Some(moon) = self.bodies.get_mut(id) {
                moon.advance(now, primary.as_ref());
            }
        }
    }

    /// First body, in insertion order, whose enlarged sphere contains the probe point.
    pub fn first_collision<P: CameraProbe + ?Sized>(&self, probe: &P) -> Option<Collision> {
        self.bodies
            .iter()
            .find(|(_, body)| body.collides_with(probe, &self.probe))
            .map(|(id, body)| Collision {
                body: id,
                push: body.push_away(&probe.position()),
            })
    }

    /// One frame of simulation: bodies move, the ship and avatar follow the camera, then the
    /// probe is tested against the moved bodies.
    pub fn tick<P: CameraProbe + ?Sized>(&mut self, now: f64, probe: &P) -> Option<Collision> {
        self.advance(now);

        self.spaceship.advance(now);
        self.spaceship.follow(probe, &self.probe);
        if let Some(avatar) = self.avatar.as_mut() {
            if let Some(body) = self.bodies.get(avatar.body()) {
                avatar.follow(probe, body);
            }
        }

        let collision = self.first_collision(probe);
        if let Some(collision) = collision {
            debug!("probe collided with {:?}", collision.body);
        }
        collision
    }

    /// Repaints a body. Its new colors reach the render target on the next `submit`.
    pub fn retexture(&mut self, id: BodyId, kind: TextureKind) -> Result<bool> {
        let jitter = self.generator.config().texture.color_jitter;
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.retexture(kind, jitter, self.generator.rng_mut())?;
                self.stale_colors.push(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Uploads meshes the target has not seen yet, pushes repainted colors and draws every body.
    pub fn submit<T: RenderTarget>(
        &mut self,
        target: &mut T,
        cache: &mut ResourceCache<BodyId, T::Mesh>,
        frustum: &Frustum,
    ) -> Result<()> {
        for id in self.stale_colors.drain(..) {
            if let (Some(handle), Some(body)) = (cache.get(&id), self.bodies.get(id)) {
                if let Some(colors) = body.mesh().colors() {
                    target.update_colors(&handle, colors)?;
                }
            }
        }

        for (id, body) in self.bodies.iter() {
            let handle = cache.get_or_try_insert_with(id, || target.upload(body.mesh()))?;
            let model = body.model_matrix();
            let model32 = nalgebra::convert::<Matrix4<f64>, Matrix4<f32>>(model);
            target.draw(&handle, &frustum.model_view_projection(&model), &model32);
        }
        Ok(())
    }
}

fn choose_avatar_body<R: rand::Rng + ?Sized>(
    bodies: &Arena<OrbitalBody>,
    planets: &[BodyId],
    rng: &mut R,
) -> Option<BodyId> {
    let gaseous: Vec<BodyId> = planets
        .iter()
        .copied()
        .filter(|&id| {
            bodies
                .get(id)
                .map_or(false, |body| body.texture() == Some(TextureKind::Gaseous))
        })
        .collect();
    gaseous
        .choose(rng)
        .or_else(|| planets.choose(rng))
        .copied()
}
