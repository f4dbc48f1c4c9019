use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One contestant's registration for one pageant. (user_id, pageant_id) is
/// unique; `age_group` is fixed at registration and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub pageant_id: Uuid,
    pub status: String,
    pub age_group: String,
    pub payment_status: String,
    pub payment_amount: Decimal,
    pub total_paid: Decimal,
    pub total_refunded: Decimal,
    pub balance_due: Decimal,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub application_reviewed_at: Option<chrono::NaiveDateTime>,
    pub application_reviewed_by: Option<Uuid>,
    pub approval_date: Option<chrono::NaiveDateTime>,
    pub last_contact_date: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

/// Category entry, keyed by (participant, category name). The name is
/// validated against the pageant's catalog at every write. Score 0 means
/// "not yet scored" and is excluded from ranking averages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ParticipantCategory {
    pub participant_id: Uuid,
    pub category: String,
    pub score: Decimal,
    pub notes: Option<String>,
    pub position: i32,
}

/// Append-only contact log entry; author and timestamp are stamped
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CommunicationNote {
    pub note_id: Uuid,
    pub participant_id: Uuid,
    pub note_type: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}
