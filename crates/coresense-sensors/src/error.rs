//! Error types for the coresense sensor library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading hardware sensors.
#[derive(Error, Debug)]
pub enum Error {
    /// The named temperature sensor group does not exist on this host.
    #[error("temperature sensor group not found: {0}")]
    SensorUnavailable(String),

    /// A sensor file exists but could not be read.
    #[error("sensor I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sensor file held a value that could not be parsed.
    #[error("malformed sensor value {value:?} in {path}")]
    Malformed { path: String, value: String },
}
