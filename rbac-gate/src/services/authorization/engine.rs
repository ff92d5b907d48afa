use async_trait::async_trait;

use super::error::EngineQueryError;

/// Access-control policy engine consulted by the permission gate.
///
/// Implementations are shared between all in-flight requests, so queries and
/// policy updates must be safe to interleave.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Decide whether `subject` may perform `action` on `object`.
    async fn enforce(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError>;

    /// Add an allow rule. Returns `false` if the rule already existed.
    async fn add_policy(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError>;

    /// Remove an allow rule. Returns `false` if no such rule existed.
    async fn remove_policy(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError>;

    /// All currently loaded policy rules.
    async fn policies(&self) -> Vec<Vec<String>>;
}
