use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    /// An assignment invariant would be violated. Callers build snapshots
    /// from a single consistent read, so this should not reach the user.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A share fragment or persisted record could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TierError>;
