use thiserror::Error;

/// Core error type shared across schemadoc crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (environment variables).
    #[error("configuration error: {0}")]
    Config(String),
    /// Database error surfaced by the driver.
    #[error("database error: {0}")]
    Db(String),
    /// The assembled document violates internal invariants.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    /// A renderer failed to produce its artifact.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias for results returned by schemadoc crates.
pub type Result<T> = std::result::Result<T, Error>;
