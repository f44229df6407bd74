use thiserror::Error;

/// Errors raised while encoding or decoding a persisted state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to encode persisted state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode persisted state: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Persisted state version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
