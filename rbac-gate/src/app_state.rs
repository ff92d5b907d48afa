use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::api::middleware::RbacMiddleware;
use crate::settings::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub rbac: RbacMiddleware,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    /// Build the state; a policy engine that cannot be loaded is fatal.
    pub async fn from_settings(settings: Settings) -> anyhow::Result<SharedAppState> {
        let rbac = RbacMiddleware::new(&settings.rbac.options())
            .await
            .with_context(|| {
                format!(
                    "Failed to load RBAC model '{}' and policy '{}'",
                    settings.rbac.model_path, settings.rbac.policy_path
                )
            })?;

        info!(
            "RBAC middleware ready with {} policy rules",
            rbac.engine().policies().await.len()
        );

        Ok(Arc::new(AppState { settings, rbac }))
    }
}
