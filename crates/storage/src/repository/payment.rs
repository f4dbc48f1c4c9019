use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Participant, Payment};

/// Repository for the append-only payment ledger.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Full ledger history for one participant, oldest first.
    pub async fn list_for_participant(&self, participant_id: Uuid) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT payment_id, participant_id, user_id, pageant_id, amount,
                   status, transaction_id, created_at
            FROM payments
            WHERE participant_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(payments)
    }

    /// Insert a refund row inside the caller's transaction. The refund is a
    /// new negative-amount ledger entry; prior rows are never touched. The
    /// transaction id is derived from the participant and the current
    /// timestamp so an accidental replay trips the unique constraint
    /// instead of double-refunding.
    pub async fn insert_refund(
        tx: &mut Transaction<'_, Postgres>,
        participant: &Participant,
        amount: Decimal,
    ) -> Result<Payment> {
        let transaction_id = format!(
            "REFUND-{}-{}",
            participant.participant_id,
            chrono::Utc::now().timestamp()
        );

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (participant_id, user_id, pageant_id, amount, status, transaction_id)
            VALUES ($1, $2, $3, $4, 'completed', $5)
            RETURNING payment_id, participant_id, user_id, pageant_id, amount,
                      status, transaction_id, created_at
            "#,
        )
        .bind(participant.participant_id)
        .bind(participant.user_id)
        .bind(participant.pageant_id)
        .bind(-amount)
        .bind(&transaction_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.code().as_deref() == Some("23505")
            {
                return StorageError::ConstraintViolation(
                    "Refund transaction already recorded".to_string(),
                );
            }
            StorageError::from(e)
        })?;

        Ok(payment)
    }
}
