//! Error types and result extensions for catrust operations

mod builders;
mod conversions;
mod extensions;
mod transformations;
mod types;

pub use extensions::*;
pub use transformations::Validate;
pub use types::{Error, Result};
