use super::KeySource;
use catrust_config::CaCertsConfig;
use catrust_core::Result;
use catrust_resolver::{resolve_validated, OutputFormat, ResolvedSpec};

pub async fn execute(config: &CaCertsConfig, keys: &KeySource, format: OutputFormat) -> Result<()> {
    let spec = resolve_spec(config, keys).await?;
    println!("{}", format.render(&spec)?.trim_end());
    Ok(())
}

/// Validate first so a bad configuration never touches the secret directory
pub(crate) async fn resolve_spec(config: &CaCertsConfig, keys: &KeySource) -> Result<ResolvedSpec> {
    let provisioning = config.validate()?;
    let listing = keys.listing(&provisioning).await?;
    Ok(resolve_validated(&provisioning, listing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whole_secret() -> CaCertsConfig {
        CaCertsConfig {
            enabled: true,
            secret_key: None,
            ..CaCertsConfig::default()
        }
    }

    #[tokio::test]
    async fn test_keys_from_command_line() {
        let spec = resolve_spec(&whole_secret(), &KeySource::from_keys(["b.crt", "a.crt"]))
            .await
            .unwrap();
        let destinations: Vec<_> = spec
            .mounts
            .iter()
            .map(|m| m.destination_path.as_str())
            .collect();
        assert_eq!(destinations, ["/etc/ssl/certs/a.crt", "/etc/ssl/certs/b.crt"]);
    }

    #[tokio::test]
    async fn test_keys_from_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("ca-cert-bundle")).unwrap();
        std::fs::write(dir.path().join("ca-cert-bundle/root.crt"), "pem").unwrap();

        let spec = resolve_spec(&whole_secret(), &KeySource::from_dir(dir.path()))
            .await
            .unwrap();
        assert_eq!(spec.mounts.len(), 1);
        assert_eq!(spec.mounts[0].source_key, "root.crt");
    }

    #[tokio::test]
    async fn test_single_key_ignores_listing() {
        let config = CaCertsConfig {
            enabled: true,
            ..CaCertsConfig::default()
        };
        let spec = resolve_spec(&config, &KeySource::from_keys(["other.crt"]))
            .await
            .unwrap();
        assert_eq!(spec.mounts.len(), 1);
        assert_eq!(spec.mounts[0].source_key, "ca-bundle.crt");
    }
}
