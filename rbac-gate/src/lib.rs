//! rbac-gate library
//!
//! Role-based access control middleware for axum. The roles of a caller are
//! read from the `roles` claim of a bearer JWT (without verifying its
//! signature) and checked against a casbin policy, using the request path as
//! object and the request method as action.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod services;
pub mod settings;

pub use api::middleware::{rbac_middleware, Dispatch, RbacMiddleware, RbacOptions};
pub use app_state::AppState;
pub use services::authorization::{
    CasbinPolicyEngine, EngineQueryError, InitializationError, PermissionGate, PolicyEngine,
    RoleOutcome,
};
