pub mod authorization;

pub use authorization::{CasbinPolicyEngine, PermissionGate, PolicyEngine};
