//! Kubernetes-shaped pod spec fragment for a resolved spec
//!
//! The orchestrator merges this fragment into the agent's DaemonSet pod
//! template. Each directive becomes a read-only `subPath` mount so the rest
//! of the mount directory (the image's own certificates) stays visible.

use crate::spec::ResolvedSpec;
use catrust_core::{constants::CA_CERTS_VOLUME_NAME, SecretName};
use serde::{Deserialize, Serialize};

/// Pod spec fragment carrying the certificate volume and container changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecPatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<SecretVolume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<ContainerPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolume {
    pub name: String,
    pub secret: SecretVolumeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    pub secret_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<KeyToPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyToPath {
    pub key: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPatch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub sub_path: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl PodSpecPatch {
    /// Render the fragment for `spec`.
    ///
    /// An empty spec renders an empty patch: disabling provisioning adds
    /// nothing and removes nothing.
    pub fn render(spec: &ResolvedSpec, secret_name: &SecretName, container: &str) -> Self {
        if spec.is_empty() {
            return Self::default();
        }

        let items = spec
            .mounts
            .iter()
            .map(|mount| KeyToPath {
                key: mount.source_key.clone(),
                path: mount.file_name().to_string(),
            })
            .collect();

        let volume_mounts = spec
            .mounts
            .iter()
            .map(|mount| VolumeMount {
                name: CA_CERTS_VOLUME_NAME.to_string(),
                mount_path: mount.destination_path.clone(),
                sub_path: mount.file_name().to_string(),
                read_only: true,
            })
            .collect();

        let env = spec
            .env_vars
            .iter()
            .map(|(name, value)| EnvVar {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        let volumes = if spec.mounts.is_empty() {
            Vec::new()
        } else {
            vec![SecretVolume {
                name: CA_CERTS_VOLUME_NAME.to_string(),
                secret: SecretVolumeSource {
                    secret_name: secret_name.to_string(),
                    items,
                },
            }]
        };

        Self {
            volumes,
            containers: vec![ContainerPatch {
                name: container.to_string(),
                volume_mounts,
                env,
            }],
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty() && self.containers.is_empty()
    }
}
