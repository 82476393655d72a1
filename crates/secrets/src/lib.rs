//! Secret stores and materialization of resolved certificate mounts
//!
//! The resolver never reads secret material itself. This crate supplies the
//! collaborator that lists a secret's keys for whole-secret mode and the
//! [`Materializer`] that writes mounted keys to disk.

mod materialize;
mod store;


pub use materialize::{MaterializeReport, Materializer, CERTIFICATE_FILE_MODE};
pub use store::{listing_for, resolve_from_store, DirectorySecretStore, SecretStore, StaticSecretStore};
