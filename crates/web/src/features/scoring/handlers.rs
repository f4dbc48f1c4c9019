use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::scoring::PageantResultsResponse;
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/scoring/pageant/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Pageant id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rankings per age group, computed on demand", body = PageantResultsResponse),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Pageant not found")
    ),
    tag = "scoring"
)]
pub async fn get_pageant_results(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let results = services::pageant_results(state.db.pool(), current.user_id, id).await?;

    Ok(Json(results).into_response())
}
