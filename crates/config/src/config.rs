//! Certificate provisioning configuration
//!
//! [`CaCertsConfig`] mirrors the `caCerts` section of a values document as the
//! operator wrote it. [`CaCertsConfig::validate`] is the only way to obtain a
//! [`TrustProvisioning`], which is what the resolver works from: an immutable
//! value in which single-key and whole-secret modes are separate variants.

use catrust_core::{
    constants::{DEFAULT_FILE_NAME, DEFAULT_MOUNT_PATH, DEFAULT_SECRET_KEY, DEFAULT_SECRET_NAME},
    FileName, MountPath, Result, SecretKey, SecretName, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MISSING_SECRET_NAME: &str = "missing required secret reference";
pub const MISSING_MOUNT_PATH: &str =
    "mount path required when certificate provisioning is enabled";
pub const MISSING_FILE_NAME: &str = "file name required when a single secret key is selected";

/// The `caCerts` section of a values document, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaCertsConfig {
    /// Master switch
    #[serde(default)]
    pub enabled: bool,

    /// Secret the collaborator must supply
    #[serde(default = "default_secret_name")]
    pub secret_name: String,

    /// Selects single-key mode when set and non-empty
    #[serde(default = "default_secret_key")]
    pub secret_key: Option<String>,

    /// Directory under which mounted files appear
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// File name of the mounted artifact in single-key mode
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_secret_name() -> String {
    DEFAULT_SECRET_NAME.to_string()
}

fn default_secret_key() -> Option<String> {
    Some(DEFAULT_SECRET_KEY.to_string())
}

fn default_mount_path() -> String {
    DEFAULT_MOUNT_PATH.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for CaCertsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret_name: default_secret_name(),
            secret_key: default_secret_key(),
            mount_path: default_mount_path(),
            file_name: default_file_name(),
        }
    }
}

impl CaCertsConfig {
    /// Validate the configuration once, at the boundary.
    ///
    /// A disabled configuration is always valid regardless of its other
    /// fields. When enabled, the secret name is checked first, then the mount
    /// path, then (single-key mode only) the file name.
    pub fn validate(&self) -> Result<TrustProvisioning> {
        if !self.enabled {
            return Ok(TrustProvisioning::Disabled);
        }

        Validate::required(&self.secret_name, MISSING_SECRET_NAME)?;
        Validate::required(&self.mount_path, MISSING_MOUNT_PATH)?;

        let secret_name = SecretName::new(self.secret_name.as_str())?;
        let mount_path = MountPath::new(self.mount_path.as_str())?;

        let mode = match self.selected_key() {
            Some(key) => {
                Validate::required(&self.file_name, MISSING_FILE_NAME)?;
                ProvisioningMode::SingleKey {
                    key: SecretKey::new(key)?,
                    file_name: FileName::new(self.file_name.as_str())?,
                }
            }
            None => ProvisioningMode::WholeSecret,
        };

        Ok(TrustProvisioning::Enabled(EnabledProvisioning {
            secret_name,
            mount_path,
            mode,
        }))
    }

    /// The configured key, treating an empty string the same as no key
    fn selected_key(&self) -> Option<&str> {
        self.secret_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// A validated provisioning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustProvisioning {
    /// Provisioning switched off; resolves to an empty spec
    Disabled,
    /// Provisioning switched on with a complete, validated request
    Enabled(EnabledProvisioning),
}

impl TrustProvisioning {
    /// Whether provisioning is switched on
    pub fn is_enabled(&self) -> bool {
        matches!(self, TrustProvisioning::Enabled(_))
    }

    /// Secret name, when enabled
    pub fn secret_name(&self) -> Option<&SecretName> {
        match self {
            TrustProvisioning::Disabled => None,
            TrustProvisioning::Enabled(enabled) => Some(&enabled.secret_name),
        }
    }

    /// Whether resolving this request needs a key listing from the secret store
    pub fn needs_key_listing(&self) -> bool {
        matches!(
            self,
            TrustProvisioning::Enabled(EnabledProvisioning {
                mode: ProvisioningMode::WholeSecret,
                ..
            })
        )
    }
}

impl fmt::Display for TrustProvisioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustProvisioning::Disabled => write!(f, "disabled"),
            TrustProvisioning::Enabled(enabled) => write!(f, "{enabled}"),
        }
    }
}

/// The fields every enabled request carries, plus its mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledProvisioning {
    pub secret_name: SecretName,
    pub mount_path: MountPath,
    pub mode: ProvisioningMode,
}

impl fmt::Display for EnabledProvisioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            ProvisioningMode::SingleKey { key, file_name } => write!(
                f,
                "single-key: secret '{}' key '{}' -> {}",
                self.secret_name,
                key,
                self.mount_path.join(file_name)
            ),
            ProvisioningMode::WholeSecret => write!(
                f,
                "whole-secret: secret '{}' -> {}",
                self.secret_name,
                self.mount_path.join("*")
            ),
        }
    }
}

/// How much of the secret is exposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningMode {
    /// Exactly one key, mounted as `file_name`
    SingleKey { key: SecretKey, file_name: FileName },
    /// Every key present in the secret, each under its own name
    WholeSecret,
}
