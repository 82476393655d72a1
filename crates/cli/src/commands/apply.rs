use catrust_config::CaCertsConfig;
use catrust_core::Result;
use catrust_resolver::resolve_validated;
use catrust_secrets::{listing_for, DirectorySecretStore, Materializer};
use std::path::PathBuf;

pub async fn execute(config: &CaCertsConfig, secret_dir: PathBuf, target_root: PathBuf) -> Result<()> {
    let provisioning = config.validate()?;
    let Some(secret_name) = provisioning.secret_name() else {
        tracing::info!("certificate provisioning disabled; nothing to apply");
        return Ok(());
    };

    let store = DirectorySecretStore::new(secret_dir);
    let keys = listing_for(&provisioning, &store).await?;
    let spec = resolve_validated(&provisioning, keys);

    let report = Materializer::new(target_root)
        .apply(&spec, secret_name, &store)
        .await?;
    for path in &report.written {
        println!("{}", path.display());
    }
    for (name, value) in spec.env_vars.iter() {
        println!("{name}={value}");
    }
    Ok(())
}
