use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use super::api_server::ApiServer;
use super::rbac::RbacSettings;

#[derive(Debug, Deserialize, Clone, Default)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,
    pub api: ApiServer,
    pub rbac: RbacSettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("RBAC_GATE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Builder preloaded with the built-in defaults.
    pub fn default_builder() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("debug", defaults.debug)?
            .set_default("api.bind_address", defaults.api.bind_address.clone())?
            .set_default("rbac.model_path", defaults.rbac.model_path.clone())?
            .set_default("rbac.policy_path", defaults.rbac.policy_path.clone())
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RBAC_GATE_RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::default_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment())
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_without_sources() {
        let settings: Settings = Settings::default_builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!settings.debug);
        assert_eq!(settings.api.bind_address, "0.0.0.0:8080");
        assert_eq!(settings.rbac.model_path, "config/casbin/model.conf");
        assert_eq!(settings.rbac.policy_path, "config/casbin/policy.csv");
        assert_eq!(settings.rbac.query_timeout_ms, None);
    }

    #[test]
    fn test_settings_from_file() {
        let settings: Settings = Settings::default_builder()
            .unwrap()
            .add_source(File::with_name("tests/test_settings.yaml"))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.debug);
        assert_eq!(settings.api.bind_address, "127.0.0.1:9999");
        assert_eq!(settings.rbac.model_path, "tests/fixtures/model.conf");
        // Not overridden by the file, keeps the default.
        assert_eq!(settings.rbac.policy_path, "config/casbin/policy.csv");
    }

    #[test]
    fn test_query_timeout_from_env() {
        env::set_var("RBAC_GATE__RBAC__QUERY_TIMEOUT_MS", "250");

        let settings: Settings = Settings::default_builder()
            .unwrap()
            .add_source(File::with_name("tests/test_settings.yaml"))
            .add_source(Settings::get_environment())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        env::remove_var("RBAC_GATE__RBAC__QUERY_TIMEOUT_MS");

        assert_eq!(settings.rbac.query_timeout_ms, Some(250));
        assert_eq!(
            settings.rbac.options().query_timeout,
            Some(Duration::from_millis(250))
        );
    }
}
