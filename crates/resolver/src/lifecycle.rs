//! Deployment lifecycle of certificate provisioning
//!
//! `Disabled -> Resolving -> Applied -> Resolving -> Applied -> Disabled`.
//! `Resolving` only exists for the duration of [`Deployment::reconcile`].
//! There is no error state: a failed resolution or apply leaves whatever was
//! applied before in effect until the operator fixes the input and
//! reconciles again.

use crate::{resolve::resolve_validated, spec::ResolvedSpec};
use catrust_config::CaCertsConfig;
use catrust_core::Result;
use std::fmt;

/// Steady states of a deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeploymentState {
    #[default]
    Disabled,
    Applied(ResolvedSpec),
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentState::Disabled => write!(f, "disabled"),
            DeploymentState::Applied(spec) => write!(f, "applied ({} mounts)", spec.mounts.len()),
        }
    }
}

/// What a successful reconcile did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new spec was applied
    Applied,
    /// The spec matched the one already applied; it was re-applied
    Unchanged,
    /// Provisioning is switched off
    Disabled,
}

/// Tracks the spec currently in effect for one deployment
#[derive(Debug, Default)]
pub struct Deployment {
    state: DeploymentState,
    generation: u64,
}

impl Deployment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeploymentState {
        &self.state
    }

    /// Number of successful applies so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The spec currently in effect, if any
    pub fn applied_spec(&self) -> Option<&ResolvedSpec> {
        match &self.state {
            DeploymentState::Disabled => None,
            DeploymentState::Applied(spec) => Some(spec),
        }
    }

    /// Resolve `config` and hand the spec to `apply`.
    ///
    /// A disabled configuration moves the deployment to `Disabled` without
    /// calling `apply`. Otherwise `apply` runs on every call, including when
    /// the spec is unchanged, so re-applying is always safe. If validation or
    /// `apply` fails the previous state is kept and the error is returned.
    pub fn reconcile<I, K, F>(
        &mut self,
        config: &CaCertsConfig,
        secret_keys: I,
        apply: F,
    ) -> Result<ReconcileOutcome>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        F: FnOnce(&ResolvedSpec) -> Result<()>,
    {
        let provisioning = match config.validate() {
            Ok(provisioning) => provisioning,
            Err(e) => {
                tracing::warn!(state = %self.state, error = %e, "keeping previous provisioning");
                return Err(e);
            }
        };

        if !provisioning.is_enabled() {
            tracing::info!("certificate provisioning disabled");
            self.state = DeploymentState::Disabled;
            return Ok(ReconcileOutcome::Disabled);
        }

        tracing::debug!(phase = "resolving", "reconciling certificate provisioning");
        let spec = resolve_validated(&provisioning, secret_keys);

        if let Err(e) = apply(&spec) {
            tracing::warn!(state = %self.state, error = %e, "apply failed; keeping previous provisioning");
            return Err(e);
        }

        self.generation += 1;
        let outcome = if self.applied_spec() == Some(&spec) {
            ReconcileOutcome::Unchanged
        } else {
            ReconcileOutcome::Applied
        };
        tracing::info!(
            generation = self.generation,
            mounts = spec.mounts.len(),
            ?outcome,
            "certificate provisioning applied"
        );
        self.state = DeploymentState::Applied(spec);
        Ok(outcome)
    }
}
