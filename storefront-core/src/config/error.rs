use thiserror::Error;

/// Errors raised by a [`KeyValueStorage`](super::KeyValueStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised while retrieving the remote unified config.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote config returned HTTP {code}")]
    HttpStatus { code: u16 },

    #[error("failed to decode remote config: {0}")]
    Decode(String),
}

/// Errors of the configuration core.
///
/// None of these reach the resolver's callers: tier failures fall back to
/// the next tier and persist failures are logged.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse stored config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to persist config: {0}")]
    Persist(StorageError),

    #[error("failed to fetch remote config: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to read stored config: {0}")]
    Storage(StorageError),

    #[error("failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}
