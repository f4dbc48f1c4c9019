use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Participant, ParticipantStatus, Payment};

use super::common::{CategoryEntry, PaymentSummary};

/// Request payload for registering as a contestant in a pageant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipantRequest {
    pub pageant_id: Uuid,

    #[validate(length(min = 1, message = "At least one category is required"))]
    pub categories: Vec<String>,
}

/// Self-service update: a contestant may withdraw or swap their category
/// list, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
    #[validate(custom(function = "validate_self_service_status"))]
    pub status: Option<String>,

    #[validate(length(min = 1, message = "Category list cannot be empty"))]
    pub categories: Option<Vec<String>>,
}

fn validate_self_service_status(status: &str) -> Result<(), validator::ValidationError> {
    if status == ParticipantStatus::Withdrawn.as_str() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("status");
        error.message = Some("Contestants may only set their status to 'withdrawn'".into());
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScoreUpdate {
    pub category: String,
    pub score: Decimal,
    pub notes: Option<String>,
}

/// Batch score capture for one participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateRequest {
    #[validate(length(min = 1, message = "At least one category score is required"))]
    pub category_scores: Vec<CategoryScoreUpdate>,
}

/// Response containing a participant with its category entries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub pageant_id: Uuid,
    pub status: String,
    pub age_group: String,
    pub categories: Vec<CategoryEntry>,
    pub payment: PaymentSummary,
    pub notes: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Contestant's own view of a registration, with the full payment ledger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailResponse {
    #[serde(flatten)]
    pub participant: ParticipantResponse,
    pub payment_history: Vec<Payment>,
}

impl ParticipantResponse {
    pub fn from_parts(participant: Participant, categories: Vec<CategoryEntry>) -> Self {
        Self {
            participant_id: participant.participant_id,
            user_id: participant.user_id,
            pageant_id: participant.pageant_id,
            status: participant.status,
            age_group: participant.age_group,
            categories,
            payment: PaymentSummary {
                payment_status: participant.payment_status,
                payment_amount: participant.payment_amount,
                total_paid: participant.total_paid,
                total_refunded: participant.total_refunded,
                balance_due: participant.balance_due,
            },
            notes: participant.notes,
            created_at: participant.created_at,
        }
    }
}
