//! `--set path=value` overrides applied to a values document

use catrust_core::{Error, Result};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;

/// A single `path=value` override.
///
/// The path is dot separated (`caCerts.secretKey`). The value is parsed as a
/// YAML scalar so `true`, `null` and numbers keep their types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueOverride {
    path: Vec<String>,
    value: Value,
}

impl ValueOverride {
    /// Create an override from an already split path
    pub fn new(path: Vec<String>, value: Value) -> Result<Self> {
        if path.is_empty() || path.iter().any(|segment| segment.is_empty()) {
            return Err(Error::configuration(format!(
                "invalid override path '{}'",
                path.join(".")
            )));
        }
        Ok(Self { path, value })
    }

    /// Key path segments
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Parsed value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Apply this override to `root`, creating intermediate mappings.
    pub fn apply(&self, root: &mut Value) -> Result<()> {
        if root.is_null() {
            *root = Value::Mapping(Mapping::new());
        }

        let (last, parents) = self
            .path
            .split_last()
            .ok_or_else(|| Error::configuration("empty override path"))?;

        let mut current = root;
        for (depth, segment) in parents.iter().enumerate() {
            let mapping = current.as_mapping_mut().ok_or_else(|| {
                Error::configuration(format!(
                    "cannot set '{}': '{}' is not a mapping",
                    self.path.join("."),
                    self.path[..depth].join(".")
                ))
            })?;
            let key = Value::String(segment.clone());
            if !mapping.contains_key(&key) {
                mapping.insert(key.clone(), Value::Mapping(Mapping::new()));
            }
            current = mapping
                .get_mut(&key)
                .ok_or_else(|| Error::configuration("override path vanished"))?;
            if current.is_null() {
                *current = Value::Mapping(Mapping::new());
            }
        }

        let mapping = current.as_mapping_mut().ok_or_else(|| {
            Error::configuration(format!(
                "cannot set '{}': '{}' is not a mapping",
                self.path.join("."),
                parents.join(".")
            ))
        })?;
        mapping.insert(Value::String(last.clone()), self.value.clone());
        Ok(())
    }
}

impl FromStr for ValueOverride {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (path, raw) = s.split_once('=').ok_or_else(|| {
            Error::configuration(format!("override '{s}' must have the form path=value"))
        })?;

        let path: Vec<String> = path.trim().split('.').map(str::to_string).collect();
        let value = parse_scalar(raw);
        Self::new(path, value)
    }
}

impl fmt::Display for ValueOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        };
        write!(f, "{}={value}", self.path.join("."))
    }
}

/// Parse an override value the way a YAML scalar would be read.
///
/// An empty right-hand side is the empty string, not null; collections are
/// not accepted and fall back to the literal text.
fn parse_scalar(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Null | Value::Number(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_typed_values() {
        let enabled: ValueOverride = "caCerts.enabled=true".parse().unwrap();
        assert_eq!(enabled.path(), ["caCerts", "enabled"]);
        assert_eq!(enabled.value(), &Value::Bool(true));

        let key: ValueOverride = "caCerts.secretKey=null".parse().unwrap();
        assert_eq!(key.value(), &Value::Null);

        let empty: ValueOverride = "caCerts.secretKey=".parse().unwrap();
        assert_eq!(empty.value(), &Value::String(String::new()));

        let path: ValueOverride = "caCerts.mountPath=/etc/pki/tls".parse().unwrap();
        assert_eq!(path.value(), &Value::String("/etc/pki/tls".to_string()));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let ov: ValueOverride = "caCerts.secretName=a=b".parse().unwrap();
        assert_eq!(ov.value(), &Value::String("a=b".to_string()));
    }

    #[test]
    fn test_collections_are_kept_literal() {
        let ov: ValueOverride = "caCerts.fileName=[a, b]".parse().unwrap();
        assert_eq!(ov.value(), &Value::String("[a, b]".to_string()));
    }

    #[test]
    fn test_malformed_overrides() {
        assert!("caCerts.enabled".parse::<ValueOverride>().is_err());
        assert!("=true".parse::<ValueOverride>().is_err());
        assert!("caCerts..enabled=true".parse::<ValueOverride>().is_err());
    }

    #[test]
    fn test_apply_creates_intermediate_mappings() {
        let mut root = Value::Null;
        let ov: ValueOverride = "caCerts.enabled=true".parse().unwrap();
        ov.apply(&mut root).unwrap();
        assert_eq!(root, doc("caCerts:\n  enabled: true\n"));
    }

    #[test]
    fn test_apply_replaces_existing_value() {
        let mut root = doc("caCerts:\n  secretName: old\n  mountPath: /certs\n");
        let ov: ValueOverride = "caCerts.secretName=new".parse().unwrap();
        ov.apply(&mut root).unwrap();
        assert_eq!(root, doc("caCerts:\n  secretName: new\n  mountPath: /certs\n"));
    }

    #[test]
    fn test_apply_through_scalar_fails() {
        let mut root = doc("caCerts: false\n");
        let ov: ValueOverride = "caCerts.enabled=true".parse().unwrap();
        let err = ov.apply(&mut root).unwrap_err();
        assert!(err.to_string().contains("is not a mapping"));
    }

    #[test]
    fn test_display_round_trips_text() {
        let ov: ValueOverride = "caCerts.enabled=true".parse().unwrap();
        assert_eq!(ov.to_string(), "caCerts.enabled=true");
    }
}
