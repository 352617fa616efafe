//! The access gate: who may run which operation.
//!
//! The gate enforces the request model:
//!
//!   Credentials → Identity → Evaluate → Record → [ResourceStore]
//!
//! `evaluate` is a pure function over already-resolved inputs and cannot
//! fail. `AccessGate` wraps it with identity resolution and the activity
//! log. A handler reaches the resource store only after `authorize`
//! returns `Ok`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use clubhouse_contracts::{
    access::AccessRecord,
    error::ClubResult,
    identity::{CallerIdentity, SessionCredentials},
    operation::{Operation, OperationCatalog, ProtectedOperation},
    policy::{AccessDecision, AuthorizationPolicy},
};

use crate::traits::{AccessAuditor, IdentityProvider};

/// Decide whether `identity` may perform `operation` under `policy`.
///
/// Rules, first match wins:
///
/// 1. public operation → `Allow`
/// 2. anonymous caller → `DenyUnauthenticated`
/// 3. allow-listed operation and the caller's verified email is missing or
///    not in the policy → `DenyForbidden`
/// 4. otherwise → `Allow`
pub fn evaluate(
    identity: &CallerIdentity,
    operation: &ProtectedOperation,
    policy: &AuthorizationPolicy,
) -> AccessDecision {
    if !operation.requires_auth() {
        return AccessDecision::Allow;
    }

    if identity.is_anonymous() {
        return AccessDecision::DenyUnauthenticated;
    }

    if operation.requires_allow_list() {
        let listed = identity.email().is_some_and(|email| policy.allows(email));
        if !listed {
            return AccessDecision::DenyForbidden;
        }
    }

    AccessDecision::Allow
}

/// Request-scoped wrapper around `evaluate`.
///
/// Construct one gate at startup and share it across requests. The policy
/// and catalog are immutable after construction, so concurrent calls need
/// no synchronization.
pub struct AccessGate {
    policy: Arc<AuthorizationPolicy>,
    catalog: Arc<OperationCatalog>,
    identity: Arc<dyn IdentityProvider>,
    audit: Arc<dyn AccessAuditor>,
}

impl AccessGate {
    pub fn new(
        policy: Arc<AuthorizationPolicy>,
        catalog: Arc<OperationCatalog>,
        identity: Arc<dyn IdentityProvider>,
        audit: Arc<dyn AccessAuditor>,
    ) -> Self {
        Self {
            policy,
            catalog,
            identity,
            audit,
        }
    }

    /// Resolve the caller, failing closed.
    ///
    /// A provider error is logged and the caller is treated as anonymous.
    pub async fn resolve_identity(&self, credentials: &SessionCredentials) -> CallerIdentity {
        match self.identity.resolve(credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "identity provider failed; treating caller as anonymous");
                CallerIdentity::Anonymous
            }
        }
    }

    /// Evaluate `operation` for the caller and record the decision.
    ///
    /// Returns the decision rather than an error so browser-facing handlers
    /// can redirect instead of failing. `Err` only when the activity log
    /// cannot be written.
    pub async fn check(
        &self,
        credentials: &SessionCredentials,
        operation: Operation,
    ) -> ClubResult<(CallerIdentity, AccessDecision)> {
        let protected = self.catalog.protect(operation);

        // Public operations never touch the identity provider or the log.
        if !protected.requires_auth() {
            return Ok((CallerIdentity::Anonymous, AccessDecision::Allow));
        }

        let identity = self.resolve_identity(credentials).await;
        let decision = evaluate(&identity, &protected, &self.policy);

        match decision {
            AccessDecision::Allow => debug!(
                operation = %operation,
                principal = %identity.principal(),
                "access allowed"
            ),
            AccessDecision::DenyUnauthenticated => debug!(
                operation = %operation,
                "access denied: no session"
            ),
            AccessDecision::DenyForbidden => info!(
                operation = %operation,
                principal = %identity.principal(),
                "access denied: principal not allow-listed"
            ),
        }

        self.audit
            .record(&AccessRecord::new(operation, &identity, decision))?;

        Ok((identity, decision))
    }

    /// Evaluate `operation` and turn a deny into an error.
    ///
    /// On `Ok` the caller may proceed to the resource store.
    pub async fn authorize(
        &self,
        credentials: &SessionCredentials,
        operation: Operation,
    ) -> ClubResult<CallerIdentity> {
        let (identity, decision) = self.check(credentials, operation).await?;
        decision.into_result(identity.principal(), operation.name())?;
        Ok(identity)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
