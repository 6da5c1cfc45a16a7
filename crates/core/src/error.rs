//! Error types for bkt-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Provider errors are decoded into structured variants once, at the SDK
//! boundary in bkt-s3; nothing above that layer inspects error strings.

use thiserror::Error;

/// Result type alias for bkt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bkt-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket creation rejected by the provider.
    ///
    /// Carries the provider's error code and message unchanged, e.g.
    /// `BucketAlreadyExists` or `InvalidLocationConstraint` for a region
    /// outside the provider's accepted set.
    #[error("Bucket creation failed [{code}]: {message}")]
    BucketCreate { message: String, code: String },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid remote reference (bucket or bucket/key)
    #[error("Invalid remote reference: {0}")]
    InvalidRef(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Bucket or object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error (e.g. bucket not empty)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidRef(_) => 2,       // UsageError
            Error::Config(_) => 2,           // UsageError
            Error::Network(_) => 3,          // NetworkError
            Error::Auth(_) => 4,             // AuthError
            Error::NotFound(_) => 5,         // NotFound
            Error::Conflict(_) => 6,         // Conflict
            Error::BucketCreate { .. } => 6, // Conflict
            _ => 1,                          // GeneralError
        }
    }
}
