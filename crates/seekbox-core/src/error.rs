use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Dataset(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("debounce interval must not be negative (got {0} ms)")]
    NegativeDebounceInterval(i64),

    #[error("fuzzy threshold must be within 0.0..=1.0 (got {0})")]
    ThresholdOutOfRange(f64),

    #[error("fuzzy distance must be greater than zero when location is weighted")]
    ZeroDistance,

    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}
