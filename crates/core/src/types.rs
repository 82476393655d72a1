//! Domain types shared across the catrust crates

pub mod environment;
pub mod newtypes;

pub use environment::EnvironmentVariables;
pub use newtypes::{FileName, MountPath, SecretKey, SecretName};
