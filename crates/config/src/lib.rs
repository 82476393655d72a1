//! Configuration loading and validation for catrust
//!
//! This crate turns a declarative values document into a validated
//! [`TrustProvisioning`] value that the resolver consumes.

pub mod config;
pub mod loader;
pub mod overrides;

#[cfg(test)]
mod config_tests;

pub use config::{CaCertsConfig, EnabledProvisioning, ProvisioningMode, TrustProvisioning};
pub use loader::{ConfigLoader, ValuesFormat};
pub use overrides::ValueOverride;
