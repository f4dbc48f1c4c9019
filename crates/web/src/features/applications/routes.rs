use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    add_communication, approve_application, bulk_approve, get_stats, list_pageant_applications,
    list_pageants, reject_application, update_notes,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/pageants", get(list_pageants))
        .route("/stats", get(get_stats))
        .route("/pageant/:id", get(list_pageant_applications))
        .route("/bulk-approve", put(bulk_approve))
        .route("/:id/approve", put(approve_application))
        .route("/:id/reject", put(reject_application))
        .route("/:id/update-notes", put(update_notes))
        .route("/:id/add-communication", post(add_communication))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
