//! Core domain types, errors, and constants for `catrust`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias, plus the
//!   `Validate` helpers used by every validating constructor.
//! - **`types`**: newtype wrappers (`SecretName`, `SecretKey`, `MountPath`,
//!   `FileName`) and `EnvironmentVariables`, which enforce invariants at the
//!   type level.
//! - **`constants`**: environment variable names and configuration defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt, Validate},
    types::*,
};
