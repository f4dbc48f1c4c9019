use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ledger entry. Rows are append-only: refunds are new rows with a negative
/// amount, never mutations of prior rows. `transaction_id` is unique and is
/// the idempotency key for "was this payment already recorded".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub payment_id: Uuid,
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub pageant_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub transaction_id: String,
    pub created_at: chrono::NaiveDateTime,
}
