//! Access records written to the admin activity log.
//!
//! One `AccessRecord` is produced for every evaluation of a protected
//! operation, whatever the decision. Public reads are not recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{identity::CallerIdentity, operation::Operation, policy::AccessDecision};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub operation: Operation,
    /// Principal id, or `"anonymous"`.
    pub principal: String,
    pub email: Option<String>,
    pub decision: AccessDecision,
    pub timestamp: DateTime<Utc>,
}

impl AccessRecord {
    pub fn new(operation: Operation, identity: &CallerIdentity, decision: AccessDecision) -> Self {
        Self {
            operation,
            principal: identity.principal().to_string(),
            email: identity.email().map(str::to_string),
            decision,
            timestamp: Utc::now(),
        }
    }
}
