//! Validation helpers shared by validating constructors

use super::types::{Error, Result};

/// Functional validation utilities
pub struct Validate;

impl Validate {
    /// Validate that a string is not empty
    pub fn not_empty(value: &str, field_name: &str) -> Result<()> {
        if value.is_empty() {
            Err(Error::Configuration {
                message: format!("Field '{field_name}' cannot be empty"),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value names exactly one file: non-empty, no `/`, and
    /// neither `.` nor `..`. Kubernetes applies the same rule to secret keys
    /// and to volume item paths.
    pub fn path_segment(value: &str, field_name: &str) -> Result<()> {
        Self::not_empty(value, field_name)?;
        if value.contains('/') || value == "." || value == ".." {
            return Err(Error::Configuration {
                message: format!("Field '{field_name}' must be a single file name, got '{value}'"),
            });
        }
        Ok(())
    }

    /// Validate that a required string is present, with a caller supplied message
    pub fn required(value: &str, message: &str) -> Result<()> {
        if value.trim().is_empty() {
            Err(Error::configuration(message))
        } else {
            Ok(())
        }
    }
}
