use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    delete_participant, get_participant, register_participant, update_participant, update_scores,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_participant))
        .route("/:id", get(get_participant))
        .route("/:id", put(update_participant))
        .route("/:id", delete(delete_participant))
        .route("/:id/scores", put(update_scores))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
