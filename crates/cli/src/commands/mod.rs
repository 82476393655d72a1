use catrust_config::TrustProvisioning;
use catrust_core::{constants::DEFAULT_CONTAINER_NAME, Result};
use catrust_resolver::OutputFormat;
use catrust_secrets::{listing_for, DirectorySecretStore};
use catrust_shell::ShellType;
use clap::{Args, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub mod apply;
pub mod env;
pub mod manifest;
pub mod resolve;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration and print the selected mode
    Validate,

    /// Print the resolved mounts and environment variables
    Resolve {
        #[command(flatten)]
        keys: KeySource,

        /// Output format (json or yaml)
        #[arg(long, value_name = "FORMAT", default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print shell statements that set the trust environment variables
    Env {
        /// Shell format (defaults to $SHELL)
        #[arg(short, long)]
        shell: Option<ShellType>,

        /// Also unset trust variables the configuration does not set
        #[arg(long)]
        unset_absent: bool,
    },

    /// Print the pod spec patch for the agent DaemonSet
    Manifest {
        #[command(flatten)]
        keys: KeySource,

        /// Container that receives the mounts and variables
        #[arg(long, default_value = DEFAULT_CONTAINER_NAME)]
        container: String,

        /// Output format (json or yaml)
        #[arg(long, value_name = "FORMAT", default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Write the mounted certificates under a target root
    Apply {
        /// Directory holding one sub-directory per secret
        #[arg(long, value_name = "DIR")]
        secret_dir: PathBuf,

        /// Directory standing in for the container filesystem root
        #[arg(long, value_name = "DIR")]
        target_root: PathBuf,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        shell: clap_complete::Shell,
    },
}

/// Where whole-secret mode gets the secret's key listing from
#[derive(Args, Debug, Default)]
pub struct KeySource {
    /// Read the key listing from a directory holding one sub-directory per secret
    #[arg(long, value_name = "DIR", conflicts_with = "keys")]
    secret_dir: Option<PathBuf>,

    /// Key present in the secret (repeatable)
    #[arg(long = "key", value_name = "KEY")]
    keys: Vec<String>,
}

impl KeySource {
    /// Key listing for `provisioning`; empty unless in whole-secret mode
    pub async fn listing(&self, provisioning: &TrustProvisioning) -> Result<BTreeSet<String>> {
        match &self.secret_dir {
            Some(dir) => listing_for(provisioning, &DirectorySecretStore::new(dir)).await,
            None if provisioning.needs_key_listing() => {
                if self.keys.is_empty() {
                    tracing::warn!("whole-secret mode without --secret-dir or --key");
                }
                Ok(self.keys.iter().cloned().collect())
            }
            None => Ok(BTreeSet::new()),
        }
    }
}

impl Commands {
    /// Log level used when neither CATRUST_LOG nor RUST_LOG is set
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Commands::Apply { .. } => "info",
            _ => "warn",
        }
    }

    pub async fn execute(self, loader: catrust_config::ConfigLoader) -> eyre::Result<()> {
        if let Commands::Completion { shell } = self {
            crate::completion::generate_completion(shell);
            return Ok(());
        }

        let config = loader.load()?;
        match self {
            Commands::Validate => validate::execute(&config)?,
            Commands::Resolve { keys, format } => resolve::execute(&config, &keys, format).await?,
            Commands::Env {
                shell,
                unset_absent,
            } => env::execute(&config, shell.unwrap_or_else(ShellType::detect), unset_absent)?,
            Commands::Manifest {
                keys,
                container,
                format,
            } => manifest::execute(&config, &keys, &container, format).await?,
            Commands::Apply {
                secret_dir,
                target_root,
            } => apply::execute(&config, secret_dir, target_root).await?,
            Commands::Completion { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
impl KeySource {
    pub fn from_keys<I: IntoIterator<Item = &'static str>>(keys: I) -> Self {
        Self {
            secret_dir: None,
            keys: keys.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            secret_dir: Some(dir.into()),
            keys: Vec::new(),
        }
    }
}
