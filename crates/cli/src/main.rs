use catrust_config::{ConfigLoader, ValueOverride};
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod completion;

use commands::Commands;

#[derive(Parser)]
#[command(name = "catrust")]
#[command(about = "Resolve CA bundle provisioning for the network flow monitor agent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Values document (YAML, or JSON when the file ends in .json)
    #[arg(short = 'f', long, global = true, value_name = "FILE")]
    values: Option<PathBuf>,

    /// Override a value, e.g. caCerts.enabled=true (repeatable)
    #[arg(long = "set", global = true, value_name = "PATH=VALUE")]
    set: Vec<ValueOverride>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_loader(&self) -> ConfigLoader {
        let loader = match &self.values {
            Some(path) => ConfigLoader::new().values_file(path),
            None => ConfigLoader::new(),
        };
        loader.overrides(self.set.iter().cloned())
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Rendering commands write to stdout; keep stderr quiet unless asked
    catrust_utils::tracing::init_with_default(cli.command.default_log_level())
        .map_err(|e| eyre::eyre!(e))?;

    let loader = cli.config_loader();
    cli.command.execute(loader).await
}
