use sqlx::PgPool;
use storage::{
    dto::{
        common::validate_score,
        participant::{
            CategoryScoreUpdate, ParticipantDetailResponse, ParticipantResponse,
            RegisterParticipantRequest, ScoreUpdateRequest, UpdateParticipantRequest,
        },
    },
    error::StorageError,
    models::{Pageant, PageantStatus, Participant},
    repository::{
        authz::OwnershipPolicy, pageant::PageantRepository, participant::ParticipantRepository,
        payment::PaymentRepository, user::UserRepository,
    },
    services::{age_group, pricing},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Register the calling user as a contestant. The precondition chain fails
/// fast with a distinct error per clause: pageant exists, registration is
/// open, capacity remains, no duplicate registration, categories valid,
/// age band derivable and offered.
pub async fn register(
    pool: &PgPool,
    user_id: Uuid,
    req: &RegisterParticipantRequest,
) -> WebResult<ParticipantResponse> {
    let users = UserRepository::new(pool);
    let pageants = PageantRepository::new(pool);
    let participants = ParticipantRepository::new(pool);

    let user = users.find_by_id(user_id).await?;
    let pageant = pageants.find_by_id(req.pageant_id).await?;

    if pageant.status != PageantStatus::Published.as_str() {
        return Err(WebError::BadRequest(
            "Pageant is not accepting registrations".to_string(),
        ));
    }
    if chrono::Utc::now().naive_utc() >= pageant.registration_deadline {
        return Err(WebError::BadRequest(
            "Registration deadline has passed".to_string(),
        ));
    }

    if pageant.max_participants > 0 {
        let count = pageants.participant_count(pageant.pageant_id).await?;
        if count >= pageant.max_participants as i64 {
            return Err(WebError::BadRequest(
                "Pageant has reached its participant limit".to_string(),
            ));
        }
    }

    if participants.exists_for(user_id, pageant.pageant_id).await? {
        return Err(StorageError::ConstraintViolation(
            "User is already registered for this pageant".to_string(),
        )
        .into());
    }

    validate_categories(&req.categories, &pageants, pageant.pageant_id).await?;

    let group = age_group::derive_age_group(user.date_of_birth, pageant.competition_year)
        .ok_or_else(|| {
            WebError::BadRequest("Contestant age does not fall in any age group".to_string())
        })?;
    if !age_group::group_allowed(group.label(), &pageant.age_groups) {
        return Err(WebError::BadRequest(format!(
            "Age group '{}' is not offered by this pageant",
            group.label()
        )));
    }

    let fee = pricing::fee_for_categories(req.categories.len());
    let participant = participants
        .create(user_id, pageant.pageant_id, group.label(), fee, &req.categories)
        .await?;

    tracing::info!(
        participant_id = %participant.participant_id,
        pageant_id = %pageant.pageant_id,
        age_group = %participant.age_group,
        "contestant registered"
    );

    respond_with_categories(&participants, participant).await
}

/// Contestant's own registration, including the payment ledger.
pub async fn get_own_participant(
    pool: &PgPool,
    user_id: Uuid,
    participant_id: Uuid,
) -> WebResult<ParticipantDetailResponse> {
    let participants = ParticipantRepository::new(pool);
    let participant = participants.find_by_id(participant_id).await?;
    ensure_registering_user(&participant, user_id)?;

    let payment_history = PaymentRepository::new(pool)
        .list_for_participant(participant_id)
        .await?;
    let participant = respond_with_categories(&participants, participant).await?;

    Ok(ParticipantDetailResponse {
        participant,
        payment_history,
    })
}

/// Self-service update: withdraw and/or replace the category list. Only
/// the registering user, only before the pageant starts.
pub async fn update_own(
    pool: &PgPool,
    user_id: Uuid,
    participant_id: Uuid,
    req: &UpdateParticipantRequest,
) -> WebResult<ParticipantResponse> {
    let participants = ParticipantRepository::new(pool);
    let pageants = PageantRepository::new(pool);

    let participant = participants.find_by_id(participant_id).await?;
    ensure_registering_user(&participant, user_id)?;

    let pageant = pageants.find_by_id(participant.pageant_id).await?;
    ensure_before_start(&pageant)?;

    let mut updated = participant;

    if let Some(categories) = &req.categories {
        validate_categories(categories, &pageants, pageant.pageant_id).await?;
        let fee = pricing::fee_for_categories(categories.len());
        updated = participants
            .replace_categories(participant_id, categories, fee)
            .await?;
    }

    // The only status a contestant may set directly is 'withdrawn'; the
    // request validator has already rejected everything else.
    if req.status.is_some() {
        updated = participants.set_withdrawn(participant_id).await?;
        tracing::info!(participant_id = %participant_id, "contestant withdrew");
    }

    respond_with_categories(&participants, updated).await
}

/// Full removal of the registration, distinct from withdrawal by status.
pub async fn delete_own(pool: &PgPool, user_id: Uuid, participant_id: Uuid) -> WebResult<()> {
    let participants = ParticipantRepository::new(pool);
    let participant = participants.find_by_id(participant_id).await?;
    ensure_registering_user(&participant, user_id)?;

    let pageant = PageantRepository::new(pool)
        .find_by_id(participant.pageant_id)
        .await?;
    ensure_before_start(&pageant)?;

    participants.delete(participant_id).await?;
    tracing::info!(participant_id = %participant_id, "registration removed");

    Ok(())
}

/// Organizer score capture for one participant. Pageant must be in
/// progress or completed; every entry must match a registered category.
/// The whole batch is validated up front and written in one transaction,
/// so a bad entry anywhere in the list leaves every score untouched.
pub async fn record_scores(
    pool: &PgPool,
    actor: Uuid,
    participant_id: Uuid,
    req: &ScoreUpdateRequest,
) -> WebResult<ParticipantResponse> {
    let (participant, pageant) = OwnershipPolicy::new(pool)
        .ensure_participant_owner(participant_id, actor)
        .await?;

    let accepts = PageantStatus::parse(&pageant.status)
        .map(|s| s.accepts_scores())
        .unwrap_or(false);
    if !accepts {
        return Err(StorageError::InvalidState(
            "Scores can only be recorded while the pageant is in progress or completed".to_string(),
        )
        .into());
    }

    let participants = ParticipantRepository::new(pool);
    let registered: Vec<String> = participants
        .categories_for(participant_id)
        .await?
        .into_iter()
        .map(|c| c.category)
        .collect();
    validate_score_batch(&req.category_scores, &registered).map_err(WebError::BadRequest)?;

    participants
        .update_scores(participant_id, &req.category_scores)
        .await?;

    respond_with_categories(&participants, participant).await
}

/// Check every entry of a score batch before anything is written: range
/// and precision of each score, and membership of each category in the
/// participant's registered list.
fn validate_score_batch(
    entries: &[CategoryScoreUpdate],
    registered: &[String],
) -> Result<(), String> {
    for entry in entries {
        validate_score(entry.score)?;

        if !registered.iter().any(|c| c == &entry.category) {
            return Err(format!(
                "Participant is not registered for category '{}'",
                entry.category
            ));
        }
    }

    Ok(())
}

async fn validate_categories(
    requested: &[String],
    pageants: &PageantRepository<'_>,
    pageant_id: Uuid,
) -> WebResult<()> {
    let catalog = pageants.categories(pageant_id).await?;
    let unknown: Vec<&str> = requested
        .iter()
        .filter(|c| !catalog.iter().any(|name| name == *c))
        .map(String::as_str)
        .collect();

    if !unknown.is_empty() {
        return Err(WebError::BadRequest(format!(
            "Unknown categories: {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

fn ensure_registering_user(participant: &Participant, user_id: Uuid) -> WebResult<()> {
    if participant.user_id != user_id {
        return Err(StorageError::Unauthorized.into());
    }
    Ok(())
}

fn ensure_before_start(pageant: &Pageant) -> WebResult<()> {
    if pageant.has_started(chrono::Utc::now().date_naive()) {
        return Err(WebError::BadRequest(
            "Pageant has already started".to_string(),
        ));
    }
    Ok(())
}

async fn respond_with_categories(
    participants: &ParticipantRepository<'_>,
    participant: Participant,
) -> WebResult<ParticipantResponse> {
    let categories = participants
        .categories_for(participant.participant_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ParticipantResponse::from_parts(participant, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn entry(category: &str, score: &str) -> CategoryScoreUpdate {
        CategoryScoreUpdate {
            category: category.to_string(),
            score: Decimal::from_str(score).unwrap(),
            notes: None,
        }
    }

    fn registered() -> Vec<String> {
        vec!["Talent".to_string(), "Interview".to_string()]
    }

    #[test]
    fn accepts_a_fully_valid_batch() {
        let batch = [entry("Talent", "9.0"), entry("Interview", "7.5")];
        assert!(validate_score_batch(&batch, &registered()).is_ok());
    }

    #[test]
    fn bad_score_anywhere_rejects_the_whole_batch() {
        // A later out-of-range entry must fail the batch before any
        // write, not after earlier entries have landed.
        let batch = [entry("Talent", "9.0"), entry("Interview", "10.1")];
        let err = validate_score_batch(&batch, &registered()).unwrap_err();
        assert!(err.contains("10.1"));
    }

    #[test]
    fn excess_precision_rejects_the_whole_batch() {
        let batch = [entry("Talent", "9.0"), entry("Interview", "7.55")];
        assert!(validate_score_batch(&batch, &registered()).is_err());
    }

    #[test]
    fn unknown_category_rejects_the_whole_batch() {
        let batch = [entry("Talent", "9.0"), entry("Evening Wear", "8.0")];
        let err = validate_score_batch(&batch, &registered()).unwrap_err();
        assert!(err.contains("Evening Wear"));
    }
}
