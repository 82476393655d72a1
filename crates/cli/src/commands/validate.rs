use catrust_config::CaCertsConfig;
use catrust_core::Result;

pub fn execute(config: &CaCertsConfig) -> Result<()> {
    let provisioning = config.validate()?;
    println!("{provisioning}");
    Ok(())
}
