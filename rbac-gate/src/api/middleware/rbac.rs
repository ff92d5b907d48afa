use axum::{
    extract::{OriginalUri, Request, State},
    http::{self, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    Router,
};
use rbac_gate_core::{extract_roles, RoleSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::authorization::{
    CasbinPolicyEngine, InitializationError, PermissionGate, PolicyEngine,
};

/// Where the casbin model and policy are loaded from.
#[derive(Clone, Debug)]
pub struct RbacOptions {
    /// Path to the casbin model file (request, policy, effect and matcher definitions).
    pub model_path: PathBuf,
    /// Path to the CSV policy file with the actual rules.
    pub policy_path: PathBuf,
    /// Upper bound for a single role query; `None` waits for the engine.
    pub query_timeout: Option<Duration>,
}

/// Outcome of running a request through the RBAC checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Let the request through; carries the roles read from the token.
    Forward(RoleSet),
    Unauthorized,
    Forbidden,
}

impl Dispatch {
    /// Status to reject the request with, if any.
    pub fn rejection(&self) -> Option<StatusCode> {
        match self {
            Dispatch::Forward(_) => None,
            Dispatch::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Dispatch::Forbidden => Some(StatusCode::FORBIDDEN),
        }
    }
}

/// Role-based access control for HTTP routes.
///
/// Reads the roles claim from the `Authorization: Bearer <jwt>` header and
/// lets the request through if any role is allowed to use the request method
/// on the request path. The token signature is **not** verified.
#[derive(Clone)]
pub struct RbacMiddleware {
    gate: Arc<PermissionGate>,
}

impl RbacMiddleware {
    /// Create the middleware with a casbin engine loaded from `options`.
    pub async fn new(options: &RbacOptions) -> Result<Self, InitializationError> {
        let engine = CasbinPolicyEngine::new(&options.model_path, &options.policy_path).await?;
        Ok(Self::with_engine(Arc::new(engine), options.query_timeout))
    }

    pub fn with_engine(engine: Arc<dyn PolicyEngine>, query_timeout: Option<Duration>) -> Self {
        Self {
            gate: Arc::new(PermissionGate::new(engine).with_query_timeout(query_timeout)),
        }
    }

    /// Shared policy engine, for administrative policy updates.
    pub fn engine(&self) -> &Arc<dyn PolicyEngine> {
        self.gate.engine()
    }

    /// Wrap every route of `router` with the RBAC checks.
    ///
    /// Rejections are bare status codes with an empty body:
    /// - `401` if the token is missing or cannot be decoded into roles
    /// - `403` if no role may access the path with the method
    pub fn inject<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self.clone(), rbac_middleware))
    }

    /// Decide what to do with a request given its headers, method and path.
    pub async fn dispatch(&self, headers: &HeaderMap, method: &Method, path: &str) -> Dispatch {
        let token = match headers
            .get(http::header::AUTHORIZATION)
            .map(|value| value.to_str())
        {
            None => {
                warn!("Missing Authorization header | {} {}", method, path);
                return Dispatch::Unauthorized;
            }
            Some(Err(_)) => {
                warn!("Unreadable Authorization header | {} {}", method, path);
                return Dispatch::Unauthorized;
            }
            Some(Ok("")) => {
                warn!("Empty Authorization header | {} {}", method, path);
                return Dispatch::Unauthorized;
            }
            Some(Ok(token)) => token,
        };

        let roles = match extract_roles(token) {
            Ok(roles) => roles,
            Err(e) => {
                warn!("failed to extract claims: {} | {} {}", e, method, path);
                return Dispatch::Unauthorized;
            }
        };
        debug!("Token carries roles {}", roles);

        if self.gate.is_authorized(&roles, path, method.as_str()).await {
            Dispatch::Forward(roles)
        } else {
            Dispatch::Forbidden
        }
    }
}

/// Axum middleware running [`RbacMiddleware::dispatch`] before `next`.
pub async fn rbac_middleware(
    State(rbac): State<RbacMiddleware>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = req.into_parts();
    // Nested routers see a stripped uri; policies are written for the full path.
    let path = match parts.extensions.get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri.path(),
        None => parts.uri.path(),
    };
    let dispatch = rbac.dispatch(&parts.headers, &parts.method, path).await;

    match dispatch.rejection() {
        Some(status) => Err(status),
        None => Ok(next.run(Request::from_parts(parts, body)).await),
    }
}
