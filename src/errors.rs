use thiserror::Error;

/// All errors that can occur in Keyfold.
#[derive(Debug, Error)]
pub enum KeyfoldError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Cannot decrypt store — wrong key or tampered payload")]
    AuthenticationFailed,

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    // --- Key material errors ---
    #[error("Key material error: {0}")]
    KeyMaterial(String),

    // --- Tree errors ---
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No secret stored at '{0}'")]
    NotFound(String),

    // --- Remote errors ---
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Publish failed: {0}")]
    PublishFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for Keyfold results.
pub type Result<T> = std::result::Result<T, KeyfoldError>;
