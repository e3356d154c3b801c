use thiserror::Error;

/// Errors raised while building a flock or loading its configuration.
///
/// Ticking a valid simulation never fails; everything here is caught before
/// the first tick.
#[derive(Error, Debug)]
pub enum FlockError {
    #[error("simulation area must have positive finite size, got {width} x {height}")]
    DegenerateArea { width: f32, height: f32 },

    #[error("predator count {predators} exceeds total agent count {total}")]
    TooManyPredators { predators: usize, total: usize },

    #[error("{prey} prey agents requested but no prey flocks")]
    NoPreyFlocks { prey: usize },

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlockError>;
