use crate::collision::ProbeSettings;
use crate::error::{Error, Result};
use crate::planet::PlanetKind;
use std::path::Path;

/// Everything that shapes a generated system. Every section falls back to its defaults, so a
/// YAML file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemConfig {
    /// Seed of the system's random generator. Entropy is used when absent.
    pub seed: Option<u64>,
    pub sun: SunSettings,
    pub mesh: MeshSettings,
    pub rocky: PlanetKindProfile,
    pub gaseous: PlanetKindProfile,
    pub moons: MoonProfile,
    pub orbit: OrbitSettings,
    pub probe: ProbeSettings,
    pub texture: TextureSettings,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SunSettings {
    pub size: f64,
}

/// Resolution of every body mesh and of the heightfield that displaces it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeshSettings {
    pub latitudes: usize,
    pub longitudes: usize,
    pub grid_size: usize,
    pub roughness: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanetKindProfile {
    pub mean_count: f64,
    pub stddev_count: f64,
    pub mean_size: f64,
    pub stddev_size: f64,
    pub mean_distance: f64,
    pub stddev_distance: f64,
    pub mean_spin: f64,
    pub stddev_spin: f64,
    /// Whether the surface is displaced by a heightfield or left as a smooth sphere.
    pub displaced: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoonProfile {
    /// Moons given to a planet exactly `reference_size` large.
    pub per_reference_planet: f64,
    pub reference_size: f64,
    pub min_size_factor: f64,
    pub max_size_factor: f64,
    pub min_distance_factor: f64,
    pub max_distance_factor: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitSettings {
    /// `k` in `speed = k * radius^(-2/3)`.
    pub speed_constant: f64,
    pub min_orbit_radius: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureSettings {
    /// Standard deviation of the Gaussian perturbation of base colors.
    pub color_jitter: f32,
}

impl SystemConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::InitializationFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        SystemConfig::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<SystemConfig> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn profile(&self, kind: PlanetKind) -> &PlanetKindProfile {
        match kind {
            PlanetKind::Rocky => &self.rocky,
            PlanetKind::Gaseous => &self.gaseous,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            seed: None,
            sun: SunSettings::default(),
            mesh: MeshSettings::default(),
            rocky: PlanetKindProfile::rocky(),
            gaseous: PlanetKindProfile::gaseous(),
            moons: MoonProfile::default(),
            orbit: OrbitSettings::default(),
            probe: ProbeSettings::default(),
            texture: TextureSettings::default(),
        }
    }
}

impl Default for SunSettings {
    fn default() -> Self {
        SunSettings { size: 100.5 }
    }
}

impl Default for MeshSettings {
    fn default() -> Self {
        MeshSettings {
            latitudes: 129,
            longitudes: 256,
            grid_size: 257,
            roughness: 1.6,
        }
    }
}

impl PlanetKindProfile {
    pub fn rocky() -> PlanetKindProfile {
        PlanetKindProfile {
            mean_count: 6.0,
            stddev_count: 2.0,
            mean_size: 200.0,
            stddev_size: 80.0,
            mean_distance: 4000.0,
            stddev_distance: 1000.0,
            mean_spin: 0.2,
            stddev_spin: 0.1,
            displaced: true,
        }
    }

    pub fn gaseous() -> PlanetKindProfile {
        PlanetKindProfile {
            mean_count: 4.0,
            stddev_count: 2.0,
            mean_size: 500.0,
            stddev_size: 100.0,
            displaced: false,
            ..PlanetKindProfile::rocky()
        }
    }
}

impl Default for PlanetKindProfile {
    fn default() -> Self {
        PlanetKindProfile::rocky()
    }
}

impl Default for MoonProfile {
    fn default() -> Self {
        MoonProfile {
            per_reference_planet: 2.0,
            reference_size: 200.0,
            min_size_factor: 0.05,
            max_size_factor: 0.2,
            min_distance_factor: 2.0,
            max_distance_factor: 4.0,
        }
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        OrbitSettings {
            speed_constant: 5.0,
            min_orbit_radius: 1000.0,
        }
    }
}

impl Default for TextureSettings {
    fn default() -> Self {
        TextureSettings { color_jitter: 0.05 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = SystemConfig::from_yaml_str(
            "seed: 42\nsun:\n  size: 50.0\nrocky:\n  meanCount: 3.0\nmesh:\n  latitudes: 9\n",
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.sun.size, 50.0);
        assert_eq!(config.rocky.mean_count, 3.0);
        assert_eq!(config.rocky.mean_size, 200.0);
        assert_eq!(config.mesh.latitudes, 9);
        assert_eq!(config.mesh.longitudes, 256);
        assert_eq!(config.gaseous, PlanetKindProfile::gaseous());
        assert_eq!(config.probe, ProbeSettings::default());
    }

    #[test]
    fn empty_document_is_the_default() {
        let config = SystemConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut config = SystemConfig::default();
        config.seed = Some(7);
        config.moons.per_reference_planet = 3.0;
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(SystemConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        match SystemConfig::from_yaml_str("sun: [1, 2") {
            Err(Error::Config(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        match SystemConfig::load("does/not/exist.yaml") {
            Err(Error::InitializationFailed { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist.yaml"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn profiles_by_kind() {
        let config = SystemConfig::default();
        assert!(config.profile(PlanetKind::Rocky).displaced);
        assert!(!config.profile(PlanetKind::Gaseous).displaced);
    }
}
