use axum::{Router, middleware, routing::get};

use super::handlers::get_pageant_results;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/pageant/:id/results", get(get_pageant_results))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
