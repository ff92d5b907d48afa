pub mod rbac;

pub use rbac::{rbac_middleware, Dispatch, RbacMiddleware, RbacOptions};
