use super::KeySource;
use catrust_config::CaCertsConfig;
use catrust_core::Result;
use catrust_resolver::{resolve_validated, OutputFormat, PodSpecPatch};

pub async fn execute(
    config: &CaCertsConfig,
    keys: &KeySource,
    container: &str,
    format: OutputFormat,
) -> Result<()> {
    let patch = build(config, keys, container).await?;
    println!("{}", format.render(&patch)?.trim_end());
    Ok(())
}

async fn build(config: &CaCertsConfig, keys: &KeySource, container: &str) -> Result<PodSpecPatch> {
    let provisioning = config.validate()?;
    let Some(secret_name) = provisioning.secret_name() else {
        return Ok(PodSpecPatch::default());
    };
    let listing = keys.listing(&provisioning).await?;
    let spec = resolve_validated(&provisioning, listing);
    Ok(PodSpecPatch::render(&spec, secret_name, container))
}
