//! Newtype wrappers for the validated pieces of a provisioning request

use crate::errors::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;
use std::str::FromStr;

/// Name of the secret object the collaborator must supply
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretName(String);

impl SecretName {
    /// Create a new SecretName with validation
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Validate::not_empty(&name, "secret_name")?;
        Ok(SecretName(name))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single key inside a secret object; also the file name it is mounted
/// under in whole-secret mode, so it must be one path segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretKey(String);

impl SecretKey {
    /// Create a new SecretKey with validation
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        Validate::path_segment(&key, "secret_key")?;
        Ok(SecretKey(key))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// File name used for the mounted artifact in single-key mode.
///
/// One path segment only, so the joined destination stays under the mount path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileName(String);

impl FileName {
    /// Create a new FileName with validation
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Validate::path_segment(&name, "file_name")?;
        Ok(FileName(name))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Directory inside the container under which mounted files appear.
///
/// Trailing slashes are trimmed on construction (the root `/` is kept), so
/// [`MountPath::join`] never produces a doubled separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MountPath(String);

impl MountPath {
    /// Create a new MountPath with validation
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        Validate::not_empty(&path, "mount_path")?;
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(MountPath("/".to_string()));
        }
        Ok(MountPath(trimmed.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destination path of `component` under this directory
    pub fn join(&self, component: &str) -> String {
        if self.0 == "/" {
            format!("/{component}")
        } else {
            format!("{}/{component}", self.0)
        }
    }
}

macro_rules! string_newtype_impls {
    ($($name:ident),+ $(,)?) => {$(
        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    )+};
}

string_newtype_impls!(SecretName, SecretKey, FileName, MountPath);
