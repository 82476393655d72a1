//! Unit tests for loading configuration from values documents

use crate::{
    config::{ProvisioningMode, TrustProvisioning, MISSING_SECRET_NAME},
    CaCertsConfig, ConfigLoader, ValueOverride, ValuesFormat,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn set(raw: &str) -> ValueOverride {
    raw.parse().expect("valid override")
}

#[test]
fn test_no_document_yields_defaults() {
    let config = ConfigLoader::new().load().unwrap();
    assert_eq!(config, CaCertsConfig::default());
    assert_eq!(config.validate().unwrap(), TrustProvisioning::Disabled);
}

#[test]
fn test_yaml_document() {
    let yaml = r#"
image:
  repository: example/agent
caCerts:
  enabled: true
  secretName: corp-roots
  secretKey: corp.pem
  mountPath: /etc/pki/ca-trust
  fileName: corp-bundle.pem
"#;
    let config = ConfigLoader::new().load_str(yaml, ValuesFormat::Yaml).unwrap();
    assert!(config.enabled);
    assert_eq!(config.secret_name, "corp-roots");
    assert_eq!(config.secret_key.as_deref(), Some("corp.pem"));
    assert_eq!(config.mount_path, "/etc/pki/ca-trust");
    assert_eq!(config.file_name, "corp-bundle.pem");
}

#[test]
fn test_partial_section_uses_defaults() {
    let config = ConfigLoader::new()
        .load_str("caCerts:\n  enabled: true\n", ValuesFormat::Yaml)
        .unwrap();
    assert_eq!(
        config,
        CaCertsConfig {
            enabled: true,
            ..CaCertsConfig::default()
        }
    );
}

#[test]
fn test_null_secret_key_selects_whole_secret() {
    let config = ConfigLoader::new()
        .load_str(
            "caCerts:\n  enabled: true\n  secretKey: null\n",
            ValuesFormat::Yaml,
        )
        .unwrap();
    assert_eq!(config.secret_key, None);
    let TrustProvisioning::Enabled(enabled) = config.validate().unwrap() else {
        panic!("expected enabled provisioning");
    };
    assert_eq!(enabled.mode, ProvisioningMode::WholeSecret);
}

#[test]
fn test_json_document_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.json");
    fs::write(
        &path,
        r#"{"caCerts": {"enabled": true, "secretName": "from-json"}}"#,
    )
    .unwrap();

    assert_eq!(ValuesFormat::from_path(&path), ValuesFormat::Json);
    let config = crate::loader::load_config_from(&path).unwrap();
    assert!(config.enabled);
    assert_eq!(config.secret_name, "from-json");
}

#[test]
fn test_yaml_is_the_fallback_format() {
    assert_eq!(
        ValuesFormat::from_path(Path::new("values.yaml")),
        ValuesFormat::Yaml
    );
    assert_eq!(
        ValuesFormat::from_path(Path::new("values")),
        ValuesFormat::Yaml
    );
    assert_eq!(
        ValuesFormat::from_path(Path::new("values.JSON")),
        ValuesFormat::Json
    );
}

#[test]
fn test_overrides_apply_in_order() {
    let config = ConfigLoader::new()
        .set(set("caCerts.enabled=true"))
        .set(set("caCerts.secretName=first"))
        .set(set("caCerts.secretName=second"))
        .load()
        .unwrap();
    assert!(config.enabled);
    assert_eq!(config.secret_name, "second");
}

#[test]
fn test_overrides_win_over_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "caCerts:\n  enabled: false\n  secretKey: a.crt\n").unwrap();

    let config = ConfigLoader::new()
        .values_file(&path)
        .overrides([set("caCerts.enabled=true"), set("caCerts.secretKey=")])
        .load()
        .unwrap();
    assert!(config.enabled);
    assert_eq!(config.secret_key.as_deref(), Some(""));
    assert!(config.validate().unwrap().needs_key_listing());
}

#[test]
fn test_empty_secret_name_override_fails_validation() {
    let config = ConfigLoader::new()
        .overrides([set("caCerts.enabled=true"), set("caCerts.secretName=")])
        .load()
        .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains(MISSING_SECRET_NAME));
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = ConfigLoader::new()
        .load_str("caCerts:\n  secretname: typo\n", ValuesFormat::Yaml)
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("secretname"));
}

#[test]
fn test_non_mapping_document_is_rejected() {
    let err = ConfigLoader::new()
        .load_str("- just\n- a list\n", ValuesFormat::Yaml)
        .unwrap_err();
    assert!(err.to_string().contains("must be a mapping"));
}

#[test]
fn test_missing_file_is_file_system_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .values_file(temp_dir.path().join("missing.yaml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, catrust_core::Error::FileSystem { .. }));
}

#[test]
fn test_malformed_document_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "caCerts: [unterminated\n").unwrap();
    let err = ConfigLoader::new().values_file(&path).load().unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}
