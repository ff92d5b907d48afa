use axum::routing::{any, get};
use axum::Router;

use crate::app_state::SharedAppState;

use super::handlers::{echo_handler, health_checker_handler};

pub struct ApiRoutes;

impl ApiRoutes {
    /// `/health` is public, everything under `/api` goes through RBAC.
    pub fn create(state: SharedAppState) -> Router {
        let protected = Router::new().route("/api/{*path}", any(echo_handler));

        state
            .rbac
            .inject(protected)
            .route("/health", get(health_checker_handler))
    }
}
