//! Secret stores
//!
//! A [`SecretStore`] answers two questions about a named secret: which keys
//! it holds, and what bytes a key contains. Deployments back it with the
//! orchestrator's secret API; locally a directory tree stands in for it.

use async_trait::async_trait;
use catrust_config::{CaCertsConfig, TrustProvisioning};
use catrust_core::{Error, Result, SecretName};
use catrust_resolver::{resolve_validated, ResolvedSpec};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Source of secret keys and their contents
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the keys held by `secret`
    ///
    /// # Returns
    /// * `Ok(keys)` - The secret exists; `keys` may be empty
    /// * `Err(Error::SecretNotFound)` - No secret with that name
    async fn lookup_keys(&self, secret: &SecretName) -> Result<BTreeSet<String>>;

    /// Read the contents of `key` in `secret`
    async fn read_key(&self, secret: &SecretName, key: &str) -> Result<Vec<u8>>;
}

/// Validate `config` and resolve it against `store`.
///
/// The store is only consulted in whole-secret mode. A disabled or
/// single-key configuration resolves without any lookup, so a missing
/// secret surfaces later when the mount is applied.
pub async fn resolve_from_store(
    config: &CaCertsConfig,
    store: &dyn SecretStore,
) -> Result<ResolvedSpec> {
    let provisioning = config.validate()?;
    let keys = listing_for(&provisioning, store).await?;
    Ok(resolve_validated(&provisioning, keys))
}

/// Key listing the resolver needs for `provisioning`.
///
/// Empty without a lookup unless provisioning is in whole-secret mode.
pub async fn listing_for(
    provisioning: &TrustProvisioning,
    store: &dyn SecretStore,
) -> Result<BTreeSet<String>> {
    match provisioning.secret_name() {
        Some(secret) if provisioning.needs_key_listing() => {
            let keys = store.lookup_keys(secret).await?;
            tracing::debug!(secret = %secret, keys = keys.len(), "listed secret keys");
            Ok(keys)
        }
        _ => Ok(BTreeSet::new()),
    }
}

/// Secrets laid out on disk: one directory per secret, one file per key.
///
/// This is the layout a mounted Kubernetes secret volume has. Entries whose
/// names start with `.` are the volume's bookkeeping (`..data` and the
/// timestamped directories) and are not keys.
#[derive(Debug, Clone)]
pub struct DirectorySecretStore {
    root: PathBuf,
}

impl DirectorySecretStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn secret_dir(&self, secret: &SecretName) -> PathBuf {
        self.root.join(secret.as_str())
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[async_trait]
impl SecretStore for DirectorySecretStore {
    async fn lookup_keys(&self, secret: &SecretName) -> Result<BTreeSet<String>> {
        let dir = self.secret_dir(secret);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::secret_not_found(secret.as_str()));
            }
            Err(e) => return Err(Error::file_system(&dir, "list secret keys", e)),
        };

        let mut keys = BTreeSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::file_system(&dir, "list secret keys", e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(secret = %secret, path = ?entry.path(), "skipping non-UTF-8 key");
                continue;
            };
            if is_hidden(&name) {
                continue;
            }
            // Follows symlinks, which is how secret volumes expose their keys
            let metadata = tokio::fs::metadata(entry.path())
                .await
                .map_err(|e| Error::file_system(entry.path(), "inspect secret key", e))?;
            if metadata.is_file() {
                keys.insert(name);
            }
        }

        Ok(keys)
    }

    async fn read_key(&self, secret: &SecretName, key: &str) -> Result<Vec<u8>> {
        if key.is_empty() || is_hidden(key) || key.contains('/') {
            return Err(Error::secret_key_not_found(secret.as_str(), key));
        }

        let dir = self.secret_dir(secret);
        if !tokio::fs::try_exists(&dir)
            .await
            .map_err(|e| Error::file_system(&dir, "open secret", e))?
        {
            return Err(Error::secret_not_found(secret.as_str()));
        }

        let path = dir.join(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::secret_key_not_found(secret.as_str(), key))
            }
            Err(e) => Err(Error::file_system(&path, "read secret key", e)),
        }
    }
}

/// In-memory secret store
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    secrets: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to `secret`, creating the secret if needed
    #[must_use]
    pub fn with_key(
        mut self,
        secret: impl Into<String>,
        key: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(secret, key, contents);
        self
    }

    /// Add a secret with no keys
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.entry(secret.into()).or_default();
        self
    }

    pub fn insert(
        &mut self,
        secret: impl Into<String>,
        key: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) {
        self.secrets
            .entry(secret.into())
            .or_default()
            .insert(key.into(), contents.into());
    }

    fn secret(&self, secret: &SecretName) -> Result<&BTreeMap<String, Vec<u8>>> {
        self.secrets
            .get(secret.as_str())
            .ok_or_else(|| Error::secret_not_found(secret.as_str()))
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn lookup_keys(&self, secret: &SecretName) -> Result<BTreeSet<String>> {
        Ok(self.secret(secret)?.keys().cloned().collect())
    }

    async fn read_key(&self, secret: &SecretName, key: &str) -> Result<Vec<u8>> {
        self.secret(secret)?
            .get(key)
            .cloned()
            .ok_or_else(|| Error::secret_key_not_found(secret.as_str(), key))
    }
}
