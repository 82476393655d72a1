//! Shared utilities for catrust
//!
//! Atomic file writes used when materializing certificate files, and the
//! tracing setup shared by the binaries.

pub mod atomic_file;
pub mod tracing;

pub use atomic_file::*;
