//! The resolver itself

use crate::spec::{MountDirective, ResolvedSpec};
use catrust_config::{CaCertsConfig, EnabledProvisioning, ProvisioningMode, TrustProvisioning};
use catrust_core::{constants::TRUST_ENV_VARS, Result, SecretKey};
use std::collections::BTreeSet;

/// Validate `config` and resolve it.
///
/// `secret_keys` is the collaborator's key listing for the referenced secret.
/// It is only read in whole-secret mode; pass an empty iterator otherwise.
/// Validation errors are returned before any mount is computed.
pub fn resolve<I, K>(config: &CaCertsConfig, secret_keys: I) -> Result<ResolvedSpec>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let provisioning = config.validate()?;
    Ok(resolve_validated(&provisioning, secret_keys))
}

/// Resolve an already validated request. Cannot fail.
pub fn resolve_validated<I, K>(provisioning: &TrustProvisioning, secret_keys: I) -> ResolvedSpec
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let enabled = match provisioning {
        TrustProvisioning::Disabled => {
            tracing::debug!("certificate provisioning disabled");
            return ResolvedSpec::empty();
        }
        TrustProvisioning::Enabled(enabled) => enabled,
    };

    match &enabled.mode {
        ProvisioningMode::SingleKey { key, file_name } => {
            resolve_single_key(enabled, key.as_str(), file_name.as_str())
        }
        ProvisioningMode::WholeSecret => resolve_whole_secret(enabled, secret_keys),
    }
}

fn resolve_single_key(enabled: &EnabledProvisioning, key: &str, file_name: &str) -> ResolvedSpec {
    let destination = enabled.mount_path.join(file_name);
    tracing::debug!(
        secret = %enabled.secret_name,
        key = %key,
        destination = %destination,
        "resolved single-key certificate mount"
    );

    ResolvedSpec {
        mounts: vec![MountDirective::new(key, destination.as_str())],
        env_vars: TRUST_ENV_VARS
            .iter()
            .map(|name| (*name, destination.as_str()))
            .collect(),
    }
}

fn resolve_whole_secret<I, K>(enabled: &EnabledProvisioning, secret_keys: I) -> ResolvedSpec
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    // Sorted and de-duplicated so the output does not depend on listing order
    let keys: BTreeSet<String> = secret_keys
        .into_iter()
        .filter_map(|key| match SecretKey::new(key.as_ref()) {
            Ok(key) => Some(key.into()),
            Err(e) => {
                tracing::warn!(
                    secret = %enabled.secret_name,
                    key = key.as_ref(),
                    error = %e,
                    "skipping secret key that is not a single file name"
                );
                None
            }
        })
        .collect();

    if keys.is_empty() {
        tracing::warn!(
            secret = %enabled.secret_name,
            "secret listing is empty; no certificate files will be mounted"
        );
    }

    let mounts: Vec<MountDirective> = keys
        .into_iter()
        .map(|key| {
            let destination = enabled.mount_path.join(&key);
            MountDirective::new(key, destination)
        })
        .collect();

    tracing::debug!(
        secret = %enabled.secret_name,
        mounts = mounts.len(),
        "resolved whole-secret certificate mounts"
    );

    ResolvedSpec {
        mounts,
        env_vars: Default::default(),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;

    fn key() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,23}"
    }

    fn mount_path() -> impl Strategy<Value = String> {
        "(/[a-z0-9_-]{1,10}){1,4}"
    }

    fn any_config() -> impl Strategy<Value = CaCertsConfig> {
        (
            any::<bool>(),
            ".{0,16}",
            proptest::option::of(".{0,16}"),
            ".{0,24}",
            ".{0,16}",
        )
            .prop_map(
                |(enabled, secret_name, secret_key, mount_path, file_name)| CaCertsConfig {
                    enabled,
                    secret_name,
                    secret_key,
                    mount_path,
                    file_name,
                },
            )
    }

    proptest! {
        #[test]
        fn disabled_always_resolves_to_empty(
            mut config in any_config(),
            keys in vec(key(), 0..8),
        ) {
            config.enabled = false;
            prop_assert_eq!(resolve(&config, &keys).unwrap(), ResolvedSpec::empty());
        }

        #[test]
        fn single_key_yields_one_mount_and_matching_env(
            secret_key in key(),
            file_name in key(),
            mount_path in mount_path(),
        ) {
            let config = CaCertsConfig {
                enabled: true,
                secret_name: "bundle".to_string(),
                secret_key: Some(secret_key.clone()),
                mount_path: mount_path.clone(),
                file_name: file_name.clone(),
            };
            let spec = resolve(&config, ["ignored"]).unwrap();
            let expected = format!("{mount_path}/{file_name}");
            prop_assert_eq!(spec.mounts.len(), 1);
            prop_assert_eq!(&spec.mounts[0].source_key, &secret_key);
            prop_assert_eq!(&spec.mounts[0].destination_path, &expected);
            for name in TRUST_ENV_VARS {
                prop_assert_eq!(spec.env_vars.get(*name), Some(&expected));
            }
        }

        #[test]
        fn whole_secret_yields_one_mount_per_key(
            keys in btree_set(key(), 0..12),
            file_name in key(),
            mount_path in mount_path(),
        ) {
            let config = CaCertsConfig {
                enabled: true,
                secret_name: "bundle".to_string(),
                secret_key: None,
                mount_path: mount_path.clone(),
                file_name,
            };
            // Feed the listing in reverse to show order does not leak through
            let spec = resolve(&config, keys.iter().rev()).unwrap();
            prop_assert_eq!(spec.mounts.len(), keys.len());
            prop_assert!(spec.env_vars.is_empty());
            for (mount, key) in spec.mounts.iter().zip(keys.iter()) {
                prop_assert_eq!(&mount.source_key, key);
                prop_assert_eq!(&mount.destination_path, &format!("{mount_path}/{key}"));
            }
        }

        #[test]
        fn resolution_is_deterministic(
            config in any_config(),
            keys in vec(key(), 0..8),
        ) {
            let first = resolve(&config, &keys);
            let second = resolve(&config, &keys);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
                _ => prop_assert!(false, "resolution outcome changed between calls"),
            }
        }

        #[test]
        fn enabled_without_secret_name_always_fails(
            mut config in any_config(),
            keys in vec(key(), 0..4),
        ) {
            config.enabled = true;
            config.secret_name = String::new();
            let err = resolve(&config, &keys).unwrap_err();
            prop_assert!(err.is_configuration());
        }
    }
}
