//! Error handling module.
//!
//! Only the write path surfaces errors. Reads resolve every anomaly to the
//! accessor's default, so there is no read error type.

/// Backend-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// File I/O error.
    #[error("File I/O error: {0}")]
    FileIO(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// The value cannot be represented by this backend.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        Self::FileIO(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A setting could not be written or flushed.
///
/// Carries the key that was being written and the backend failure. The write
/// is not visible to later reads.
#[derive(Debug, thiserror::Error)]
#[error("Failed to persist setting '{key}': {cause}")]
pub struct PersistenceError {
    /// Storage key of the failed write.
    pub key: String,
    /// Underlying backend failure.
    #[source]
    pub cause: BackendError,
}

impl PersistenceError {
    /// Create a new persistence error.
    pub fn new(key: impl Into<String>, cause: BackendError) -> Self {
        Self {
            key: key.into(),
            cause,
        }
    }
}

/// Result type alias using `BackendError`.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
