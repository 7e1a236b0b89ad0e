use super::body::{BodyId, BodyKind, OrbitalBody, PlanetKind};
use super::heightfield::Heightfield;
use super::mesh::Mesh;
use super::palette;
use super::sphere;
use super::texture::TextureKind;
use crate::collision::Collidable;
use crate::config::{PlanetKindProfile, SystemConfig};
use crate::error::{Error, Result};
use crate::transform::Transformable;
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Populates a system with a sun, planets and moons, drawing every random number from one
/// seeded generator.
pub struct SystemGenerator {
    config: SystemConfig,
    rng: ChaCha8Rng,
}

impl SystemGenerator {
    pub fn new(config: &SystemConfig) -> SystemGenerator {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        SystemGenerator::with_rng(config, rng)
    }

    pub fn with_rng(config: &SystemConfig, rng: ChaCha8Rng) -> SystemGenerator {
        info!(
            "system generator using {}",
            config
                .seed
                .map(|seed| format!("seed {}", seed))
                .unwrap_or_else(|| "an entropy seed".to_string())
        );
        SystemGenerator {
            config: config.clone(),
            rng,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Builds a unit sphere at the configured resolution, displaced by a fresh polarized
    /// heightfield when asked to.
    pub fn build_mesh(&mut self, displaced: bool) -> Result<Mesh> {
        let settings = self.config.mesh;
        if displaced {
            let mut heightfield =
                Heightfield::generate(settings.grid_size, settings.roughness, &mut self.rng)?;
            heightfield.polarize();
            sphere::build(1.0, settings.latitudes, settings.longitudes, Some(&heightfield))
        } else {
            sphere::build(1.0, settings.latitudes, settings.longitudes, None)
        }
    }

    pub fn generate_sun(&mut self, now: f64) -> Result<OrbitalBody> {
        let mut sun = OrbitalBody::new(BodyKind::Sun, self.build_mesh(false)?, now);
        sun.fill(*palette::YELLOW)?;
        sun.scale_by(self.config.sun.size);
        debug!("sun of size {}", self.config.sun.size);
        Ok(sun)
    }

    /// Generates the planets of one kind on cumulative orbits beyond `min_orbit_radius`, ordered
    /// from the innermost outwards.
    pub fn generate_planets(
        &mut self,
        kind: PlanetKind,
        min_orbit_radius: f64,
        now: f64,
    ) -> Result<Vec<OrbitalBody>> {
        let profile = *self.config.profile(kind);
        let count_distribution = normal(profile.mean_count, profile.stddev_count, "planet count")?;
        let size_distribution = normal(profile.mean_size, profile.stddev_size, "planet size")?;
        let distance_distribution =
            normal(profile.mean_distance, profile.stddev_distance, "orbit distance")?;
        let spin_distribution = normal(profile.mean_spin, profile.stddev_spin, "planet spin")?;

        // Truncation toward zero; negative samples saturate to no planets.
        let count = count_distribution.sample(&mut self.rng) as usize;
        info!("generating {} {:?} planets beyond {}", count, kind, min_orbit_radius);

        let mut planets = Vec::with_capacity(count);
        let mut orbit_radius = min_orbit_radius;
        for _ in 0..count {
            let size = size_distribution
                .sample(&mut self.rng)
                .max(minimum_size(&profile));
            orbit_radius += distance_distribution
                .sample(&mut self.rng)
                .max(minimum_gap(&profile));
            let angle = self.rng.gen_range(0.0..2.0 * PI);
            let spin = spin_distribution.sample(&mut self.rng);

            let mut planet = OrbitalBody::new(
                BodyKind::Planet(kind),
                self.build_mesh(profile.displaced)?,
                now,
            );
            planet.retexture(kind.texture(), self.config.texture.color_jitter, &mut self.rng)?;
            planet
                .scale_by(size)
                .set_angular_velocity(Vector3::new(0.0, spin, 0.0))
                .set_orbital_angular_velocity(Vector3::new(
                    0.0,
                    orbital_speed(self.config.orbit.speed_constant, orbit_radius),
                    0.0,
                ))
                .translate_by(&Vector3::new(
                    orbit_radius * angle.cos(),
                    0.0,
                    orbit_radius * angle.sin(),
                ));

            debug!(
                "{:?} planet of size {:.1} at orbit {:.1}, angle {:.3}",
                kind, size, orbit_radius, angle
            );
            planets.push(planet);
        }

        Ok(planets)
    }

    /// Generates the moons of every given planet. Each moon refers back to its planet's handle.
    pub fn generate_moons<'a, I>(&mut self, planets: I, now: f64) -> Result<Vec<OrbitalBody>>
    where
        I: IntoIterator<Item = (BodyId, &'a OrbitalBody)>,
    {
        let profile = self.config.moons;
        if !(profile.reference_size > 0.0) {
            return Err(Error::Distribution {
                what: "moon reference size",
                reason: format!("{} is not positive", profile.reference_size),
            });
        }

        let mut moons = Vec::new();
        for (primary, planet) in planets {
            let planet_size = planet.radius();
            let count =
                (profile.per_reference_planet * planet_size / profile.reference_size).floor() as usize;
            trace!("{} moons for planet {:?}", count, primary);

            for _ in 0..count {
                let size = planet_size
                    * uniform(&mut self.rng, profile.min_size_factor, profile.max_size_factor);
                let orbit_radius = planet_size
                    * uniform(
                        &mut self.rng,
                        profile.min_distance_factor,
                        profile.max_distance_factor,
                    );
                let angle = self.rng.gen_range(0.0..2.0 * PI);
                let speed = orbital_speed(self.config.orbit.speed_constant, orbit_radius);
                let spin = self.rng.gen::<f64>() * speed;

                let mut moon =
                    OrbitalBody::new(BodyKind::Moon { primary }, self.build_mesh(true)?, now);
                moon.retexture(TextureKind::Rocky, self.config.texture.color_jitter, &mut self.rng)?;
                let offset = Vector3::new(orbit_radius * angle.cos(), 0.0, orbit_radius * angle.sin());
                moon.scale_by(size)
                    .set_angular_velocity(Vector3::new(0.0, spin, 0.0))
                    .set_orbital_angular_velocity(Vector3::new(0.0, speed, 0.0))
                    .translate_by(&(planet.position().coords + offset));
                moons.push(moon);
            }
        }

        info!("generated {} moons", moons.len());
        Ok(moons)
    }
}

/// Revolution speed falls off with the orbit radius as `k * r^(-2/3)`.
pub fn orbital_speed(speed_constant: f64, orbit_radius: f64) -> f64 {
    if orbit_radius > 0.0 {
        speed_constant * orbit_radius.powf(-2.0 / 3.0)
    } else {
        0.0
    }
}

fn normal(mean: f64, stddev: f64, what: &'static str) -> Result<Normal<f64>> {
    if !(stddev >= 0.0 && stddev.is_finite()) {
        return Err(Error::Distribution {
            what,
            reason: format!("standard deviation must be finite and non-negative, got {}", stddev),
        });
    }
    Normal::new(mean, stddev).map_err(|e| Error::Distribution {
        what,
        reason: e.to_string(),
    })
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.gen::<f64>()
}

fn minimum_size(profile: &PlanetKindProfile) -> f64 {
    (profile.mean_size * 0.1).max(1.0)
}

fn minimum_gap(profile: &PlanetKindProfile) -> f64 {
    profile.mean_size.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshSettings;
    use crate::id_arena::Arena;

    fn small_config(seed: u64) -> SystemConfig {
        SystemConfig {
            seed: Some(seed),
            mesh: MeshSettings {
                latitudes: 9,
                longitudes: 16,
                grid_size: 17,
                roughness: 1.6,
            },
            ..SystemConfig::default()
        }
    }

    #[test]
    fn orbital_speed_slows_with_distance() {
        assert!((orbital_speed(5.0, 1000.0) - 0.05).abs() < 1.0e-12);
        assert!(orbital_speed(5.0, 8000.0) < orbital_speed(5.0, 1000.0));
        assert_eq!(orbital_speed(5.0, 0.0), 0.0);
    }

    #[test]
    fn planets_sit_on_increasing_orbits() {
        let mut generator = SystemGenerator::new(&small_config(11));
        let planets = generator.generate_planets(PlanetKind::Rocky, 1000.0, 0.0).unwrap();

        let radii: Vec<f64> = planets.iter().map(|p| p.position().coords.norm()).collect();
        assert!(radii.iter().all(|r| *r > 1000.0));
        assert!(radii.windows(2).all(|w| w[1] > w[0]));
        for planet in &planets {
            assert!(planet.orbital_angular_velocity().y >= 0.0);
            assert_eq!(planet.position().y, 0.0);
            assert_eq!(planet.texture(), Some(TextureKind::Rocky));
            assert!(planet.radius() > 0.0);
        }
    }

    #[test]
    fn speed_follows_the_orbit_radius() {
        let config = small_config(5);
        let mut generator = SystemGenerator::new(&config);
        let planets = generator.generate_planets(PlanetKind::Gaseous, 2000.0, 0.0).unwrap();
        for planet in &planets {
            let radius = planet.position().coords.norm();
            let expected = orbital_speed(config.orbit.speed_constant, radius);
            assert!((planet.orbital_angular_velocity().y - expected).abs() < 1.0e-9);
            assert_eq!(planet.texture(), Some(TextureKind::Gaseous));
        }
    }

    #[test]
    fn count_is_truncated() {
        let mut config = small_config(1);
        config.rocky.mean_count = 2.9;
        config.rocky.stddev_count = 0.0;
        let mut generator = SystemGenerator::new(&config);
        assert_eq!(generator.generate_planets(PlanetKind::Rocky, 0.0, 0.0).unwrap().len(), 2);

        config.rocky.mean_count = -3.0;
        let mut generator = SystemGenerator::new(&config);
        assert!(generator.generate_planets(PlanetKind::Rocky, 0.0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let mut config = small_config(1);
        config.gaseous.stddev_size = -1.0;
        let mut generator = SystemGenerator::new(&config);
        match generator.generate_planets(PlanetKind::Gaseous, 0.0, 0.0) {
            Err(Error::Distribution { what, .. }) => assert_eq!(what, "planet size"),
            other => panic!("unexpected {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn negative_spreads_are_rejected() {
        let mut config = small_config(1);
        config.rocky.stddev_spin = -0.1;
        let mut generator = SystemGenerator::new(&config);
        match generator.generate_planets(PlanetKind::Rocky, 0.0, 0.0) {
            Err(Error::Distribution { what, .. }) => assert_eq!(what, "planet spin"),
            other => panic!("unexpected {:?}", other.map(|p| p.len())),
        }

        let mut config = small_config(1);
        config.rocky.stddev_count = std::f64::NAN;
        let mut generator = SystemGenerator::new(&config);
        assert!(generator.generate_planets(PlanetKind::Rocky, 0.0, 0.0).is_err());

        let mut config = small_config(1);
        config.rocky.mean_count = 3.0;
        config.rocky.stddev_count = 0.0;
        config.texture.color_jitter = -0.05;
        let mut generator = SystemGenerator::new(&config);
        assert!(generator.generate_planets(PlanetKind::Rocky, 0.0, 0.0).is_err());
    }

    #[test]
    fn displaced_meshes_close_at_both_poles() {
        for &(latitudes, longitudes, grid_size) in &[(9, 16, 17), (17, 8, 33), (5, 8, 9)] {
            let mut config = small_config(13);
            config.mesh = MeshSettings {
                latitudes,
                longitudes,
                grid_size,
                roughness: 1.2,
            };
            let mut generator = SystemGenerator::new(&config);
            let mesh = generator.build_mesh(true).unwrap();

            let south = (latitudes - 1) * longitudes;
            for &ring in &[0, south] {
                let radii: Vec<f32> = mesh.positions()[ring..ring + longitudes]
                    .iter()
                    .map(|p| p.coords.norm())
                    .collect();
                assert!(radii.iter().all(|r| (r - 1.0).abs() < 1.0e-5), "ring {} radii {:?}", ring, radii);
            }
        }
    }

    #[test]
    fn same_seed_same_system() {
        let positions = |seed| {
            let mut generator = SystemGenerator::new(&small_config(seed));
            generator
                .generate_planets(PlanetKind::Rocky, 1000.0, 0.0)
                .unwrap()
                .iter()
                .map(|p| p.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(99), positions(99));
    }

    #[test]
    fn moons_scale_with_their_planet() {
        let mut config = small_config(21);
        config.rocky.mean_count = 3.0;
        config.rocky.stddev_count = 0.0;
        config.rocky.mean_size = 450.0;
        config.rocky.stddev_size = 0.0;
        let mut generator = SystemGenerator::new(&config);

        let mut arena = Arena::new();
        for planet in generator.generate_planets(PlanetKind::Rocky, 1000.0, 0.0).unwrap() {
            arena.insert(planet);
        }
        let moons = generator.generate_moons(arena.iter(), 0.0).unwrap();

        // floor(2 * 450 / 200) moons per planet.
        assert_eq!(moons.len(), 3 * 4);
        for moon in &moons {
            let primary = arena.get(moon.primary().unwrap()).unwrap();
            let distance = (moon.position() - primary.position()).norm();
            assert!(distance >= 2.0 * 450.0 - 1.0e-6 && distance <= 4.0 * 450.0 + 1.0e-6);
            assert!(moon.radius() >= 0.05 * 450.0 - 1.0e-6 && moon.radius() <= 0.2 * 450.0 + 1.0e-6);

            let speed = moon.orbital_angular_velocity().y;
            assert!(moon.angular_velocity().y >= 0.0 && moon.angular_velocity().y <= speed);
            assert!((speed - orbital_speed(5.0, distance)).abs() < 1.0e-9);
        }
    }

    #[test]
    fn sun_is_smooth_and_yellow() {
        let mut generator = SystemGenerator::new(&small_config(2));
        let sun = generator.generate_sun(0.0).unwrap();
        assert_eq!(sun.kind(), BodyKind::Sun);
        assert_eq!(sun.radius(), 100.5);
        assert!(sun
            .mesh()
            .colors()
            .unwrap()
            .iter()
            .all(|c| *c == *palette::YELLOW));
        assert!(sun
            .mesh()
            .positions()
            .iter()
            .all(|p| (p.coords.norm() - 1.0).abs() < 1.0e-5));
    }
}
