use sqlx::PgPool;
use storage::{
    dto::application::{
        AddCommunicationRequest, ApplicationResponse, ApplicationStats, ApproveApplicationRequest,
        BulkApproveError, BulkApproveRequest, BulkApproveResponse, PageantApplicationSummary,
        RefundReceipt, RejectApplicationRequest, RejectApplicationResponse, UpdateNotesRequest,
    },
    error::StorageError,
    models::{CommunicationNote, ParticipantStatus},
    repository::{
        authz::OwnershipPolicy, pageant::PageantRepository, participant::ParticipantRepository,
        user::UserRepository,
    },
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

/// Approve one application. Valid only from `registered`; the contestant is
/// notified after the transition commits, and a failed notification never
/// rolls the approval back.
pub async fn approve(
    state: &AppState,
    actor: Uuid,
    application_id: Uuid,
    req: &ApproveApplicationRequest,
) -> WebResult<ApplicationResponse> {
    let pool = state.db.pool();

    let (participant, pageant) = OwnershipPolicy::new(pool)
        .ensure_participant_owner(application_id, actor)
        .await?;

    let status = parse_status(&participant.status)?;
    if !status.can_approve() {
        return Err(StorageError::InvalidState(
            "Only applications in 'registered' status can be approved".to_string(),
        )
        .into());
    }

    let updated = ParticipantRepository::new(pool)
        .approve(application_id, actor, req.notes.as_deref())
        .await?;

    let contestant = UserRepository::new(pool).find_by_id(updated.user_id).await?;

    tracing::info!(
        application_id = %application_id,
        pageant_id = %pageant.pageant_id,
        "application approved"
    );

    let subject = format!("Your application to {} has been approved", pageant.name);
    let body = format!(
        "Congratulations {}, your application to {} has been approved.",
        contestant.display_name, pageant.name
    );
    if let Err(e) = state.notifier.send(&contestant.email, &subject, &body).await {
        tracing::warn!(error = %e, application_id = %application_id, "approval notification failed");
    }

    Ok(ApplicationResponse::from_parts(updated, &contestant))
}

/// Reject one application, optionally refunding a completed payment. The
/// status change and refund bookkeeping commit atomically in the
/// repository; the rejection email is best-effort afterwards.
pub async fn reject(
    state: &AppState,
    actor: Uuid,
    application_id: Uuid,
    req: &RejectApplicationRequest,
) -> WebResult<RejectApplicationResponse> {
    let pool = state.db.pool();

    let (participant, pageant) = OwnershipPolicy::new(pool)
        .ensure_participant_owner(application_id, actor)
        .await?;

    let status = parse_status(&participant.status)?;
    if !status.can_reject() {
        return Err(StorageError::InvalidState(
            "Application has already been rejected".to_string(),
        )
        .into());
    }

    let (updated, refund_payment) = ParticipantRepository::new(pool)
        .reject(
            application_id,
            actor,
            req.rejection_reason.as_deref(),
            req.notes.as_deref(),
            req.refund_payment,
        )
        .await?;

    let contestant = UserRepository::new(pool).find_by_id(updated.user_id).await?;

    let refund = refund_payment.map(|p| RefundReceipt {
        payment_id: p.payment_id,
        amount: p.amount,
        transaction_id: p.transaction_id,
    });

    tracing::info!(
        application_id = %application_id,
        pageant_id = %pageant.pageant_id,
        refunded = refund.is_some(),
        "application rejected"
    );

    let subject = format!("Your application to {} was not accepted", pageant.name);
    let body = match &refund {
        Some(r) => format!(
            "Your application to {} was not accepted. A refund of {} has been issued.",
            pageant.name,
            -r.amount
        ),
        None => format!("Your application to {} was not accepted.", pageant.name),
    };
    if let Err(e) = state.notifier.send(&contestant.email, &subject, &body).await {
        tracing::warn!(error = %e, application_id = %application_id, "rejection notification failed");
    }

    Ok(RejectApplicationResponse {
        application: ApplicationResponse::from_parts(updated, &contestant),
        refund,
    })
}

/// Best-effort batch approval: each id is processed independently and a
/// failure never rolls back earlier successes. One aggregate notification
/// goes to the organizer when anything succeeded.
pub async fn bulk_approve(
    state: &AppState,
    actor: Uuid,
    req: &BulkApproveRequest,
) -> WebResult<BulkApproveResponse> {
    let shared = ApproveApplicationRequest {
        notes: req.notes.clone(),
    };

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for &application_id in &req.application_ids {
        match approve(state, actor, application_id, &shared).await {
            Ok(application) => results.push(application),
            Err(e) => errors.push(BulkApproveError {
                application_id,
                reason: failure_reason(&e),
            }),
        }
    }

    tracing::info!(
        approved = results.len(),
        failed = errors.len(),
        "bulk approval finished"
    );

    if !results.is_empty()
        && let Ok(organizer) = UserRepository::new(state.db.pool()).find_by_id(actor).await
    {
        let subject = "Bulk approval complete".to_string();
        let body = format!(
            "{} of {} applications were approved.",
            results.len(),
            req.application_ids.len()
        );
        if let Err(e) = state.notifier.send(&organizer.email, &subject, &body).await {
            tracing::warn!(error = %e, "bulk approval summary notification failed");
        }
    }

    Ok(BulkApproveResponse { results, errors })
}

pub async fn update_notes(
    state: &AppState,
    actor: Uuid,
    application_id: Uuid,
    req: &UpdateNotesRequest,
) -> WebResult<ApplicationResponse> {
    let pool = state.db.pool();

    OwnershipPolicy::new(pool)
        .ensure_participant_owner(application_id, actor)
        .await?;

    let updated = ParticipantRepository::new(pool)
        .update_notes(application_id, req.notes.as_deref())
        .await?;
    let contestant = UserRepository::new(pool).find_by_id(updated.user_id).await?;

    Ok(ApplicationResponse::from_parts(updated, &contestant))
}

pub async fn add_communication(
    state: &AppState,
    actor: Uuid,
    application_id: Uuid,
    req: &AddCommunicationRequest,
) -> WebResult<CommunicationNote> {
    let pool = state.db.pool();

    OwnershipPolicy::new(pool)
        .ensure_participant_owner(application_id, actor)
        .await?;

    let note = ParticipantRepository::new(pool)
        .add_communication(application_id, &req.note_type, &req.content, actor)
        .await?;

    Ok(note)
}

pub async fn list_pageants(pool: &PgPool, actor: Uuid) -> WebResult<Vec<PageantApplicationSummary>> {
    let summaries = PageantRepository::new(pool).list_owned_summaries(actor).await?;
    Ok(summaries)
}

pub async fn stats(pool: &PgPool, actor: Uuid) -> WebResult<ApplicationStats> {
    let stats = PageantRepository::new(pool).stats_for_owner(actor).await?;
    Ok(stats)
}

pub async fn list_for_pageant(
    pool: &PgPool,
    actor: Uuid,
    pageant_id: Uuid,
) -> WebResult<Vec<ApplicationResponse>> {
    OwnershipPolicy::new(pool)
        .ensure_pageant_owner(pageant_id, actor)
        .await?;

    let applications = ParticipantRepository::new(pool)
        .list_applications_for_pageant(pageant_id)
        .await?;

    Ok(applications)
}

fn parse_status(status: &str) -> WebResult<ParticipantStatus> {
    ParticipantStatus::parse(status).ok_or_else(|| {
        StorageError::InvalidState(format!("Unknown participant status '{}'", status)).into()
    })
}

/// Compact per-item reason for the bulk outcome list.
fn failure_reason(error: &WebError) -> String {
    match error {
        WebError::Storage(StorageError::NotFound) => "Application not found".to_string(),
        WebError::Storage(StorageError::Unauthorized) => {
            "Not authorized to manage this application".to_string()
        }
        WebError::Storage(StorageError::InvalidState(msg)) => msg.clone(),
        WebError::Storage(StorageError::ConstraintViolation(msg)) => msg.clone(),
        WebError::BadRequest(msg) => msg.clone(),
        _ => "An internal error occurred".to_string(),
    }
}
