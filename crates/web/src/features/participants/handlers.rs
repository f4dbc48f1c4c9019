use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::participant::{
    ParticipantDetailResponse, ParticipantResponse, RegisterParticipantRequest, ScoreUpdateRequest,
    UpdateParticipantRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/participants/register",
    request_body = RegisterParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant registered", body = ParticipantResponse),
        (status = 400, description = "Registration closed, unknown category or ineligible age"),
        (status = 404, description = "Pageant not found"),
        (status = 409, description = "Already registered for this pageant")
    ),
    tag = "participants"
)]
pub async fn register_participant(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<RegisterParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::register(state.db.pool(), current.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(participant)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration with payment ledger", body = ParticipantDetailResponse),
        (status = 403, description = "Not the registering user"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_own_participant(state.db.pool(), current.user_id, id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 400, description = "Pageant already started or invalid update"),
        (status = 403, description = "Not the registering user"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::update_own(state.db.pool(), current.user_id, id, &req).await?;

    Ok(Json(participant).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Registration removed"),
        (status = 400, description = "Pageant already started"),
        (status = 403, description = "Not the registering user"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_own(state.db.pool(), current.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/scores",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    request_body = ScoreUpdateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scores recorded", body = ParticipantResponse),
        (status = 400, description = "Score out of range or unknown category"),
        (status = 403, description = "Caller does not organize this pageant"),
        (status = 404, description = "Participant not found"),
        (status = 409, description = "Pageant is not accepting scores")
    ),
    tag = "participants"
)]
pub async fn update_scores(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScoreUpdateRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::record_scores(state.db.pool(), current.user_id, id, &req).await?;

    Ok(Json(participant).into_response())
}
