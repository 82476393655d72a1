//! Output value types of the resolver

use catrust_core::{constants::TRUST_ENV_VARS, EnvironmentVariables};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binds one secret key to a file path inside the container
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountDirective {
    pub source_key: String,
    pub destination_path: String,
}

impl MountDirective {
    pub fn new(source_key: impl Into<String>, destination_path: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            destination_path: destination_path.into(),
        }
    }

    /// Last path component of the destination
    pub fn file_name(&self) -> &str {
        self.destination_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.destination_path)
    }
}

impl fmt::Display for MountDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_key, self.destination_path)
    }
}

/// Mounts and environment variables for one deployment cycle.
///
/// The default value is the empty spec produced for a disabled configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpec {
    pub mounts: Vec<MountDirective>,
    pub env_vars: EnvironmentVariables,
}

impl ResolvedSpec {
    /// The spec of a disabled configuration
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// No mounts and no environment variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty() && self.env_vars.is_empty()
    }

    /// The certificate file the environment variables point at, if any
    #[must_use]
    pub fn primary_certificate(&self) -> Option<&str> {
        TRUST_ENV_VARS
            .iter()
            .find_map(|name| self.env_vars.get(name))
            .map(String::as_str)
    }

    /// Trust variables this spec leaves unset
    pub fn absent_env_vars(&self) -> impl Iterator<Item = &'static str> + '_ {
        TRUST_ENV_VARS
            .iter()
            .copied()
            .filter(|name| !self.env_vars.contains(name))
    }
}
