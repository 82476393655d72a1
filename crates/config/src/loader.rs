//! Values document loader for catrust
//!
//! Reads the operator's values document (YAML or JSON), applies `--set`
//! overrides in order and extracts the `caCerts` section.

use crate::{config::CaCertsConfig, overrides::ValueOverride};
use catrust_core::{constants::VALUES_ROOT_KEY, Error, Result, ResultExt};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Encoding of a values document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuesFormat {
    Yaml,
    Json,
}

impl ValuesFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ValuesFormat::Json,
            _ => ValuesFormat::Yaml,
        }
    }

    /// Parse a document in this format
    pub fn parse(self, content: &str) -> Result<Value> {
        match self {
            ValuesFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ValuesFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Configuration loader that assembles a [`CaCertsConfig`]
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Optional values document
    values_file: Option<PathBuf>,
    /// Overrides applied after the document is read
    overrides: Vec<ValueOverride>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values document to read
    pub fn values_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.values_file = Some(path.into());
        self
    }

    /// Add one override
    pub fn set(mut self, value_override: ValueOverride) -> Self {
        self.overrides.push(value_override);
        self
    }

    /// Add several overrides, kept in order
    pub fn overrides(mut self, overrides: impl IntoIterator<Item = ValueOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<CaCertsConfig> {
        let document = match &self.values_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading values document");
                let content = std::fs::read_to_string(path)
                    .map_err(|e| Error::file_system(path, "read values document", e))?;
                ValuesFormat::from_path(path)
                    .parse(&content)
                    .with_context(|| {
                        format!("failed to parse values document '{}'", path.display())
                    })?
            }
            None => Value::Null,
        };

        self.load_document(document)
    }

    /// Load from already parsed document content
    pub fn load_str(self, content: &str, format: ValuesFormat) -> Result<CaCertsConfig> {
        let document = format.parse(content)?;
        self.load_document(document)
    }

    fn load_document(self, mut document: Value) -> Result<CaCertsConfig> {
        for value_override in &self.overrides {
            tracing::debug!(%value_override, "applying override");
            value_override.apply(&mut document)?;
        }
        extract_ca_certs(document)
    }
}

/// Pull the `caCerts` section out of a document, defaulting when absent
fn extract_ca_certs(document: Value) -> Result<CaCertsConfig> {
    let section = match document {
        Value::Null => None,
        Value::Mapping(mut root) => root.remove(VALUES_ROOT_KEY),
        other => {
            return Err(Error::configuration(format!(
                "values document must be a mapping, found {}",
                kind_of(&other)
            )))
        }
    };

    match section {
        None | Some(Value::Null) => Ok(CaCertsConfig::default()),
        Some(section) => serde_yaml::from_value(section)
            .with_context(|| format!("invalid '{VALUES_ROOT_KEY}' section")),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Quick helper function to load configuration from a values document
pub fn load_config_from(path: impl Into<PathBuf>) -> Result<CaCertsConfig> {
    ConfigLoader::new().values_file(path).load()
}
