use super::{CasbinPolicyEngine, EngineQueryError, PermissionGate, PolicyEngine, RoleOutcome};
use async_trait::async_trait;
use rbac_gate_core::RoleSet;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

const MODEL: &str = r#"[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && r.obj == p.obj && r.act == p.act
"#;

async fn create_file_engine(policy: &str) -> (CasbinPolicyEngine, tempfile::TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.conf");
    let policy_path = temp_dir.path().join("policy.csv");

    tokio::fs::write(&model_path, MODEL).await.unwrap();
    tokio::fs::write(&policy_path, policy).await.unwrap();

    let engine = CasbinPolicyEngine::new(&model_path, &policy_path)
        .await
        .unwrap();
    (engine, temp_dir)
}

/// Engine with a fixed rule set that fails for selected roles and counts queries.
#[derive(Default)]
struct ScriptedEngine {
    allowed: HashSet<(String, String, String)>,
    failing_roles: HashSet<String>,
    slow_roles: HashSet<String>,
    queries: AtomicUsize,
}

impl ScriptedEngine {
    fn allow(mut self, subject: &str, object: &str, action: &str) -> Self {
        self.allowed
            .insert((subject.into(), object.into(), action.into()));
        self
    }

    fn failing(mut self, role: &str) -> Self {
        self.failing_roles.insert(role.into());
        self
    }

    fn slow(mut self, role: &str) -> Self {
        self.slow_roles.insert(role.into());
        self
    }
}

#[async_trait]
impl PolicyEngine for ScriptedEngine {
    async fn enforce(
        &self,
        subject: &str,
        object: &str,
        action: &str,
    ) -> Result<bool, EngineQueryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.slow_roles.contains(subject) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if self.failing_roles.contains(subject) {
            return Err(EngineQueryError::Backend("backend unavailable".into()));
        }
        Ok(self
            .allowed
            .contains(&(subject.into(), object.into(), action.into())))
    }

    async fn add_policy(&self, _: &str, _: &str, _: &str) -> Result<bool, EngineQueryError> {
        Err(EngineQueryError::Backend("read only".into()))
    }

    async fn remove_policy(&self, _: &str, _: &str, _: &str) -> Result<bool, EngineQueryError> {
        Err(EngineQueryError::Backend("read only".into()))
    }

    async fn policies(&self) -> Vec<Vec<String>> {
        self.allowed
            .iter()
            .map(|(s, o, a)| vec![s.clone(), o.clone(), a.clone()])
            .collect()
    }
}

fn roles(names: &[&str]) -> RoleSet {
    RoleSet::from(names)
}

#[tokio::test]
async fn test_engine_loads_policy_file() {
    let (engine, _temp_dir) = create_file_engine("p, admin, /api/users, GET\n").await;

    assert!(engine.enforce("admin", "/api/users", "GET").await.unwrap());
    assert!(!engine.enforce("admin", "/api/users", "POST").await.unwrap());
    assert!(!engine.enforce("user", "/api/users", "GET").await.unwrap());
    assert_eq!(
        engine.policies().await,
        vec![vec![
            "admin".to_string(),
            "/api/users".to_string(),
            "GET".to_string()
        ]]
    );
}

#[tokio::test]
async fn test_engine_with_empty_policy_file() {
    let (engine, _temp_dir) = create_file_engine("").await;

    assert!(engine.policies().await.is_empty());
    assert!(!engine.enforce("admin", "/api/users", "GET").await.unwrap());
}

#[tokio::test]
async fn test_engine_fails_for_missing_model() {
    let temp_dir = tempdir().unwrap();
    let policy_path = temp_dir.path().join("policy.csv");
    tokio::fs::write(&policy_path, "").await.unwrap();

    let result = CasbinPolicyEngine::new(temp_dir.path().join("missing.conf"), &policy_path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_add_and_remove_policy() {
    let engine = CasbinPolicyEngine::from_model_text(MODEL).await.unwrap();

    assert!(!engine.enforce("admin", "/api/admin", "POST").await.unwrap());

    assert!(engine.add_policy("admin", "/api/admin", "POST").await.unwrap());
    assert!(!engine.add_policy("admin", "/api/admin", "POST").await.unwrap());
    assert!(engine.enforce("admin", "/api/admin", "POST").await.unwrap());

    assert!(engine.remove_policy("admin", "/api/admin", "POST").await.unwrap());
    assert!(!engine.remove_policy("admin", "/api/admin", "POST").await.unwrap());
    assert!(!engine.enforce("admin", "/api/admin", "POST").await.unwrap());
}

#[tokio::test]
async fn test_gate_any_role_wins() {
    let (engine, _temp_dir) = create_file_engine("p, admin, /api/admin, GET\n").await;
    let gate = PermissionGate::new(Arc::new(engine));

    assert!(gate.is_authorized(&roles(&["user", "admin"]), "/api/admin", "GET").await);
    assert!(gate.is_authorized(&roles(&["admin", "user"]), "/api/admin", "GET").await);
    assert!(!gate.is_authorized(&roles(&["user"]), "/api/admin", "GET").await);
    assert!(!gate.is_authorized(&roles(&["user", "admin"]), "/api/admin", "DELETE").await);
}

#[tokio::test]
async fn test_gate_denies_empty_role_set() {
    let (engine, _temp_dir) = create_file_engine("p, admin, /api/users, GET\n").await;
    let gate = PermissionGate::new(Arc::new(engine));

    assert!(!gate.is_authorized(&RoleSet::default(), "/api/users", "GET").await);
}

#[tokio::test]
async fn test_gate_is_idempotent() {
    let (engine, _temp_dir) = create_file_engine("p, admin, /api/users, GET\n").await;
    let gate = PermissionGate::new(Arc::new(engine));
    let admin = roles(&["admin"]);

    for _ in 0..5 {
        assert!(gate.is_authorized(&admin, "/api/users", "GET").await);
        assert!(!gate.is_authorized(&admin, "/api/users", "POST").await);
    }
}

#[tokio::test]
async fn test_gate_short_circuits_on_first_match() {
    let engine = Arc::new(ScriptedEngine::default().allow("admin", "/api", "GET"));
    let gate = PermissionGate::new(engine.clone());

    assert!(gate.is_authorized(&roles(&["admin", "user", "guest"]), "/api", "GET").await);
    assert_eq!(engine.queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_gate_continues_after_engine_error() {
    let engine = Arc::new(
        ScriptedEngine::default()
            .failing("broken")
            .allow("admin", "/api", "GET"),
    );
    let gate = PermissionGate::new(engine.clone());

    assert!(matches!(
        gate.check_role("broken", "/api", "GET").await,
        RoleOutcome::EngineError(EngineQueryError::Backend(_))
    ));
    assert!(gate.is_authorized(&roles(&["broken", "admin"]), "/api", "GET").await);
    assert!(!gate.is_authorized(&roles(&["broken"]), "/api", "GET").await);
}

#[tokio::test]
async fn test_gate_times_out_slow_queries() {
    let engine = Arc::new(
        ScriptedEngine::default()
            .slow("sleepy")
            .allow("sleepy", "/api", "GET")
            .allow("admin", "/api", "GET"),
    );
    let gate = PermissionGate::new(engine).with_query_timeout(Some(Duration::from_millis(20)));

    assert!(matches!(
        gate.check_role("sleepy", "/api", "GET").await,
        RoleOutcome::EngineError(EngineQueryError::Timeout(_))
    ));
    assert!(gate.is_authorized(&roles(&["sleepy", "admin"]), "/api", "GET").await);
    assert!(!gate.is_authorized(&roles(&["sleepy"]), "/api", "GET").await);
}

#[tokio::test]
async fn test_role_outcome_is_allowed() {
    let engine = Arc::new(ScriptedEngine::default().allow("admin", "/api", "GET"));
    let gate = PermissionGate::new(engine);

    assert!(gate.check_role("admin", "/api", "GET").await.is_allowed());
    assert!(!gate.check_role("admin", "/api", "PUT").await.is_allowed());
}
