use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grid size {0} is not of the form 2^k+1 within the supported range")]
    GridSize(usize),

    #[error("a sphere needs at least 3 lines of latitude, got {0}")]
    Latitudes(usize),

    #[error("a sphere needs at least 4 lines of longitude, got {0}")]
    Longitudes(usize),

    #[error("radius must be positive and finite, got {0}")]
    Radius(f64),

    #[error("heightfield of size {size} cannot cover a {latitudes}x{longitudes} sphere")]
    HeightfieldTooSmall {
        size: usize,
        latitudes: usize,
        longitudes: usize,
    },

    #[error("buffer holds {actual} entries but the mesh has {expected} vertices")]
    BufferLength { expected: usize, actual: usize },

    #[error("invalid distribution parameters for {what}: {reason}")]
    Distribution { what: &'static str, reason: String },

    #[error("initialization failed for {}: {reason}", path.display())]
    InitializationFailed { path: PathBuf, reason: String },

    #[error("could not parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}
