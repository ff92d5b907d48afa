use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::middleware::RbacOptions;

#[derive(Debug, Deserialize, Clone)]
#[readonly::make]
pub struct RbacSettings {
    pub model_path: String,
    pub policy_path: String,
    #[serde(default)]
    pub query_timeout_ms: Option<u64>,
}

impl Default for RbacSettings {
    fn default() -> Self {
        RbacSettings {
            model_path: "config/casbin/model.conf".to_string(),
            policy_path: "config/casbin/policy.csv".to_string(),
            query_timeout_ms: None,
        }
    }
}

impl RbacSettings {
    pub fn options(&self) -> RbacOptions {
        RbacOptions {
            model_path: PathBuf::from(&self.model_path),
            policy_path: PathBuf::from(&self.policy_path),
            query_timeout: self.query_timeout_ms.map(Duration::from_millis),
        }
    }
}
