use async_trait::async_trait;
use casbin::{CoreApi, DefaultModel, Enforcer, FileAdapter, MemoryAdapter, MgmtApi};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::engine::PolicyEngine;
use super::error::{EngineQueryError, InitializationError};

/// Casbin-backed [`PolicyEngine`].
///
/// The enforcer sits behind a read/write lock: authorization queries take the
/// read side, policy updates the write side.
#[derive(Clone)]
pub struct CasbinPolicyEngine {
    enforcer: Arc<RwLock<Enforcer>>,
}

impl CasbinPolicyEngine {
    /// Create an engine from a casbin model file and a CSV policy file.
    pub async fn new(
        model_path: impl AsRef<Path>,
        policy_path: impl AsRef<Path>,
    ) -> Result<Self, InitializationError> {
        let model_path = model_path.as_ref();
        let policy_path = policy_path.as_ref();

        let m = DefaultModel::from_file(model_path).await?;
        let a = FileAdapter::new(policy_path.to_path_buf());
        let enforcer = Enforcer::new(m, a).await?;

        info!(
            "RBAC enforcer created from model {} and policy {} with {} rules",
            model_path.display(),
            policy_path.display(),
            enforcer.get_policy().len()
        );

        Ok(Self::from_enforcer(enforcer))
    }

    /// Create an engine from model text with an empty in-memory policy.
    pub async fn from_model_text(model_text: &str) -> Result<Self, InitializationError> {
        let m = DefaultModel::from_str(model_text).await?;
        let a = MemoryAdapter::default();
        let enforcer = Enforcer::new(m, a).await?;

        Ok(Self::from_enforcer(enforcer))
    }

    pub fn from_enforcer(enforcer: Enforcer) -> Self {
        Self {
            enforcer: Arc::new(RwLock::new(enforcer)),
        }
    }
}

fn rule(subject: &str, object: &str, action: &str) -> Vec<String> {
    vec![subject.to_string(), object.to_string(), action.to_string()]
}

#[async_trait]
impl PolicyEngine for CasbinPolicyEngine {
    async fn enforce(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError> {
        let enforcer = self.enforcer.read().await;
        Ok(enforcer.enforce(vec![subject, object, action])?)
    }

    async fn add_policy(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError> {
        info!("Adding p: {} {} {}", subject, object, action);
        let mut enforcer = self.enforcer.write().await;
        Ok(enforcer.add_policy(rule(subject, object, action)).await?)
    }

    async fn remove_policy(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError> {
        info!("Removing p: {} {} {}", subject, object, action);
        let mut enforcer = self.enforcer.write().await;
        Ok(enforcer.remove_policy(rule(subject, object, action)).await?)
    }

    async fn policies(&self) -> Vec<Vec<String>> {
        self.enforcer.read().await.get_policy()
    }
}
