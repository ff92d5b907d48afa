use rbac_gate_core::RoleSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::engine::PolicyEngine;
use super::error::EngineQueryError;

/// Result of asking the policy engine about a single role.
#[derive(Debug)]
pub enum RoleOutcome {
    Allowed,
    Denied,
    EngineError(EngineQueryError),
}

impl RoleOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RoleOutcome::Allowed)
    }
}

/// Decides whether any role of a caller may access a path with a method.
pub struct PermissionGate {
    engine: Arc<dyn PolicyEngine>,
    query_timeout: Option<Duration>,
}

impl PermissionGate {
    pub fn new(engine: Arc<dyn PolicyEngine>) -> Self {
        Self {
            engine,
            query_timeout: None,
        }
    }

    /// Bound every single-role query; an elapsed query counts as an engine error.
    pub fn with_query_timeout(mut self, query_timeout: Option<Duration>) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn engine(&self) -> &Arc<dyn PolicyEngine> {
        &self.engine
    }

    /// Ask the engine about one `(role, path, method)` triple.
    pub async fn check_role(&self, role: &str, path: &str, method: &str) -> RoleOutcome {
        let query = self.engine.enforce(role, path, method);

        let result = match self.query_timeout {
            Some(limit) => tokio::time::timeout(limit, query)
                .await
                .unwrap_or(Err(EngineQueryError::Timeout(limit))),
            None => query.await,
        };

        match result {
            Ok(true) => RoleOutcome::Allowed,
            Ok(false) => RoleOutcome::Denied,
            Err(e) => RoleOutcome::EngineError(e),
        }
    }

    /// Returns `true` as soon as one role is allowed, in role order.
    ///
    /// Engine errors fail closed for the affected role only: the error is
    /// logged and evaluation continues with the next role. An empty role set
    /// is never authorized.
    pub async fn is_authorized(&self, roles: &RoleSet, path: &str, method: &str) -> bool {
        for role in roles {
            match self.check_role(role, path, method).await {
                RoleOutcome::Allowed => {
                    debug!("Permission granted: role {} can {} {}", role, method, path);
                    return true;
                }
                RoleOutcome::Denied => {}
                RoleOutcome::EngineError(e) => {
                    warn!(
                        "Policy engine failed for role {} on {} {}, treating as denied: {}",
                        role, method, path, e
                    );
                }
            }
        }

        info!(
            "Permission denied: none of roles {} can {} {}",
            roles, method, path
        );
        false
    }
}
