//! Authorization module for rbac-gate
//!
//! This module asks a policy engine whether any of a caller's roles may
//! perform an action (HTTP method) on an object (request path). Casbin is the
//! bundled engine; other engines plug in through [`PolicyEngine`].

pub mod casbin;
pub mod engine;
pub mod error;
pub mod gate;

#[cfg(test)]
mod tests;

pub use self::casbin::CasbinPolicyEngine;
pub use engine::PolicyEngine;
pub use error::{EngineQueryError, InitializationError};
pub use gate::{PermissionGate, RoleOutcome};
