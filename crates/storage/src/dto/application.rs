use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Participant, User};

use super::common::PaymentSummary;

/// Request payload for approving a single application
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveApplicationRequest {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request payload for rejecting an application, optionally refunding a
/// completed payment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectApplicationRequest {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[validate(length(max = 2000))]
    pub rejection_reason: Option<String>,

    #[serde(default)]
    pub refund_payment: bool,
}

/// Request payload for best-effort batch approval
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveRequest {
    #[validate(length(min = 1, message = "At least one application id is required"))]
    pub application_ids: Vec<Uuid>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotesRequest {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommunicationRequest {
    #[validate(length(min = 1, max = 64))]
    pub note_type: String,

    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Application as seen by the reviewing organizer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: Uuid,
    pub pageant_id: Uuid,
    pub contestant_name: String,
    pub contestant_email: String,
    pub status: String,
    pub age_group: String,
    pub payment: PaymentSummary,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub application_reviewed_at: Option<chrono::NaiveDateTime>,
    pub application_reviewed_by: Option<Uuid>,
    pub approval_date: Option<chrono::NaiveDateTime>,
    pub last_contact_date: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

impl ApplicationResponse {
    pub fn from_parts(participant: Participant, contestant: &User) -> Self {
        Self {
            application_id: participant.participant_id,
            pageant_id: participant.pageant_id,
            contestant_name: contestant.display_name.clone(),
            contestant_email: contestant.email.clone(),
            status: participant.status,
            age_group: participant.age_group,
            payment: PaymentSummary {
                payment_status: participant.payment_status,
                payment_amount: participant.payment_amount,
                total_paid: participant.total_paid,
                total_refunded: participant.total_refunded,
                balance_due: participant.balance_due,
            },
            notes: participant.notes,
            rejection_reason: participant.rejection_reason,
            application_reviewed_at: participant.application_reviewed_at,
            application_reviewed_by: participant.application_reviewed_by,
            approval_date: participant.approval_date,
            last_contact_date: participant.last_contact_date,
            created_at: participant.created_at,
        }
    }
}

/// One failed item in a bulk approval
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveError {
    pub application_id: Uuid,
    pub reason: String,
}

/// Outcome of a bulk approval: per-item results, never all-or-nothing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveResponse {
    pub results: Vec<ApplicationResponse>,
    pub errors: Vec<BulkApproveError>,
}

/// Refund receipt attached to a rejection response when a refund ran
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefundReceipt {
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectApplicationResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub refund: Option<RefundReceipt>,
}

/// Per-pageant application rollup for the organizer dashboard
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageantApplicationSummary {
    pub pageant_id: Uuid,
    pub name: String,
    pub status: String,
    pub start_date: chrono::NaiveDate,
    pub total_applications: i64,
    pub pending_applications: i64,
}

/// Status totals across every pageant the caller organizes
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: i64,
    pub registered: i64,
    pub confirmed: i64,
    pub disqualified: i64,
    pub withdrawn: i64,
}
