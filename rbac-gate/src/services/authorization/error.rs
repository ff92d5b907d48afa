use std::time::Duration;
use thiserror::Error;

/// The policy engine could not be built from its model and policy sources.
#[derive(Debug, Error)]
#[error("failed to create RBAC enforcer: {0}")]
pub struct InitializationError(#[from] casbin::Error);

/// A single policy query or policy update failed.
#[derive(Debug, Error)]
pub enum EngineQueryError {
    #[error("casbin error: {0}")]
    Casbin(#[from] casbin::Error),

    #[error("policy query timed out after {0:?}")]
    Timeout(Duration),

    #[error("policy backend error: {0}")]
    Backend(String),
}
