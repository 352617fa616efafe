//! Shared application state.

use std::sync::Arc;

use clubhouse_audit::InMemoryActivityLog;
use clubhouse_core::{
    traits::{IdentityProvider, ResourceStore},
    AccessGate,
};
use clubhouse_policy::PolicyBundle;

use crate::config::ServerConfig;

pub struct AppState {
    pub gate: AccessGate,
    pub store: Arc<dyn ResourceStore>,
    /// The gate's auditor, kept here so admins can read it back.
    pub activity: Arc<InMemoryActivityLog>,
    pub session_cookie: String,
}

impl AppState {
    /// Wire the gate from its parts. The activity log is created here and
    /// shared between the gate and the activity endpoint.
    pub fn new(
        config: &ServerConfig,
        bundle: PolicyBundle,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ResourceStore>,
    ) -> Self {
        let activity = Arc::new(InMemoryActivityLog::with_capacity(
            config.activity_log_id.clone(),
            config.activity_log_capacity,
        ));
        let gate = AccessGate::new(
            Arc::new(bundle.policy),
            Arc::new(bundle.catalog),
            identity,
            activity.clone(),
        );
        Self {
            gate,
            store,
            activity,
            session_cookie: config.session_cookie.clone(),
        }
    }
}
