//! Certificate-trust provisioning resolver
//!
//! Turns a validated [`TrustProvisioning`](catrust_config::TrustProvisioning)
//! into a [`ResolvedSpec`]: the secret keys to mount, where they land inside
//! the container, and the environment variables that point the agent at the
//! bundle. Resolution is pure and synchronous; everything that touches a
//! secret store or a filesystem lives in `catrust-secrets`.

pub mod lifecycle;
pub mod manifest;
pub mod output;
pub mod resolve;
pub mod spec;

pub use lifecycle::{Deployment, DeploymentState, ReconcileOutcome};
pub use manifest::PodSpecPatch;
pub use output::OutputFormat;
pub use resolve::{resolve, resolve_validated};
pub use spec::{MountDirective, ResolvedSpec};
