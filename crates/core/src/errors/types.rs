//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for catrust operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for catrust operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally invalid provisioning input. Raised before any spec exists.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The secret store has no secret with this name
    #[error("secret '{secret}' not found")]
    SecretNotFound { secret: String },

    /// The secret exists but does not contain the key
    #[error("key '{key}' not found in secret '{secret}'")]
    SecretKeyNotFound { secret: String, key: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML serialization/deserialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An apply-time failure with a caller-supplied prefix
    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },

    /// Unsupported operation errors
    #[error("unsupported feature '{feature}': {message}")]
    Unsupported { feature: String, message: String },
}

impl Error {
    /// Whether this failure belongs to the apply stage rather than to
    /// configuration validation.
    ///
    /// Apply-time failures come from the secret store or the filesystem when a
    /// resolved spec is materialized. The previously applied configuration
    /// stays in effect when one of these is returned.
    #[must_use]
    pub fn is_apply_time(&self) -> bool {
        match self {
            Error::SecretNotFound { .. }
            | Error::SecretKeyNotFound { .. }
            | Error::FileSystem { .. } => true,
            Error::Context { source, .. } => source.is_apply_time(),
            _ => false,
        }
    }

    /// Whether this is a configuration error
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}
