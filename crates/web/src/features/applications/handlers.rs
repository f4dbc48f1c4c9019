use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::application::{
    AddCommunicationRequest, ApplicationResponse, ApplicationStats, ApproveApplicationRequest,
    BulkApproveRequest, BulkApproveResponse, PageantApplicationSummary, RejectApplicationRequest,
    RejectApplicationResponse, UpdateNotesRequest,
};
use storage::models::CommunicationNote;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    put,
    path = "/api/applications/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = ApproveApplicationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application approved", body = ApplicationResponse),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application is not in 'registered' status")
    ),
    tag = "applications"
)]
pub async fn approve_application(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveApplicationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let application = services::approve(&state, current.user_id, id, &req).await?;

    Ok(Json(application).into_response())
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = RejectApplicationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application rejected, refund receipt included when one ran", body = RejectApplicationResponse),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application was already rejected")
    ),
    tag = "applications"
)]
pub async fn reject_application(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectApplicationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::reject(&state, current.user_id, id, &req).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    put,
    path = "/api/applications/bulk-approve",
    request_body = BulkApproveRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Per-item outcome of the batch", body = BulkApproveResponse),
        (status = 400, description = "Empty id list")
    ),
    tag = "applications"
)]
pub async fn bulk_approve(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<BulkApproveRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::bulk_approve(&state, current.user_id, &req).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/update-notes",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = UpdateNotesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Notes updated", body = ApplicationResponse),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
pub async fn update_notes(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNotesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let application = services::update_notes(&state, current.user_id, id, &req).await?;

    Ok(Json(application).into_response())
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/add-communication",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = AddCommunicationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Note appended", body = CommunicationNote),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
pub async fn add_communication(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddCommunicationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let note = services::add_communication(&state, current.user_id, id, &req).await?;

    Ok((axum::http::StatusCode::CREATED, Json(note)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/applications/pageants",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's pageants with application counts", body = Vec<PageantApplicationSummary>)
    ),
    tag = "applications"
)]
pub async fn list_pageants(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let summaries = services::list_pageants(state.db.pool(), current.user_id).await?;

    Ok(Json(summaries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/applications/stats",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application status totals across caller's pageants", body = ApplicationStats)
    ),
    tag = "applications"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let stats = services::stats(state.db.pool(), current.user_id).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    get,
    path = "/api/applications/pageant/{id}",
    params(
        ("id" = Uuid, Path, description = "Pageant id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Applications for one owned pageant", body = Vec<ApplicationResponse>),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Pageant not found")
    ),
    tag = "applications"
)]
pub async fn list_pageant_applications(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let applications =
        services::list_for_pageant(state.db.pool(), current.user_id, id).await?;

    Ok(Json(applications).into_response())
}
