//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a secret-not-found error
    #[must_use]
    pub fn secret_not_found(secret: impl Into<String>) -> Self {
        Error::SecretNotFound {
            secret: secret.into(),
        }
    }

    /// Create a missing-key error
    #[must_use]
    pub fn secret_key_not_found(secret: impl Into<String>, key: impl Into<String>) -> Self {
        Error::SecretKeyNotFound {
            secret: secret.into(),
            key: key.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an unsupported feature error
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
            message: message.into(),
        }
    }
}
