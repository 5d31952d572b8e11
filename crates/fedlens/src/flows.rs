//! In-memory store for pending OIDC authorization flows.
//!
//! Between `/oidc/login` and `/oidc/callback` the PKCE verifier is kept here,
//! keyed by the CSRF `state` parameter. Entries are single-use and expire.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use tokio::sync::RwLock;

/// How long a started login may take before its callback is refused.
pub const FLOW_TTL_MINUTES: i64 = 10;

/// PKCE data stored while the user is at the IdP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFlow {
    pub pkce_verifier: String,
    pub created_at: DateTime<Utc>,
}

/// Generate a random state parameter for CSRF protection.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Check if a pending flow is too old to complete.
pub fn is_flow_expired(flow: &PendingFlow, now: DateTime<Utc>) -> bool {
    flow.created_at + Duration::minutes(FLOW_TTL_MINUTES) <= now
}

#[derive(Debug, Clone, Default)]
pub struct FlowStore {
    flows: Arc<RwLock<HashMap<String, PendingFlow>>>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a flow under `state`, dropping any flows that have expired.
    pub async fn store(&self, state: &str, flow: PendingFlow) {
        let now = flow.created_at;
        let mut flows = self.flows.write().await;
        flows.retain(|_, f| !is_flow_expired(f, now));
        flows.insert(state.to_string(), flow);
    }

    /// Remove and return the flow for `state` if it has not expired.
    pub async fn take(&self, state: &str, now: DateTime<Utc>) -> Option<PendingFlow> {
        let mut flows = self.flows.write().await;
        flows
            .remove(state)
            .filter(|flow| !is_flow_expired(flow, now))
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.flows.read().await.len()
    }
}
