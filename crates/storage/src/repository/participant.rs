use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::application::ApplicationResponse;
use crate::dto::common::{CategoryEntry, PaymentSummary};
use crate::dto::participant::CategoryScoreUpdate;
use crate::error::{Result, StorageError};
use crate::models::{
    CommunicationNote, Participant, ParticipantCategory, ParticipantStatus, Payment, PaymentStatus,
};
use crate::repository::payment::PaymentRepository;
use crate::services::ranking::ContestantScores;

const PARTICIPANT_COLUMNS: &str = r#"
    participant_id, user_id, pageant_id, status, age_group, payment_status,
    payment_amount, total_paid, total_refunded, balance_due, notes,
    rejection_reason, application_reviewed_at, application_reviewed_by,
    approval_date, last_contact_date, created_at
"#;

/// Repository for Participant database operations, covering registration,
/// the application-review transitions and score capture.
pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    participant_id: Uuid,
    pageant_id: Uuid,
    contestant_name: String,
    contestant_email: String,
    status: String,
    age_group: String,
    payment_status: String,
    payment_amount: Decimal,
    total_paid: Decimal,
    total_refunded: Decimal,
    balance_due: Decimal,
    notes: Option<String>,
    rejection_reason: Option<String>,
    application_reviewed_at: Option<chrono::NaiveDateTime>,
    application_reviewed_by: Option<Uuid>,
    approval_date: Option<chrono::NaiveDateTime>,
    last_contact_date: Option<chrono::NaiveDateTime>,
    created_at: chrono::NaiveDateTime,
}

impl From<ApplicationRow> for ApplicationResponse {
    fn from(row: ApplicationRow) -> Self {
        Self {
            application_id: row.participant_id,
            pageant_id: row.pageant_id,
            contestant_name: row.contestant_name,
            contestant_email: row.contestant_email,
            status: row.status,
            age_group: row.age_group,
            payment: PaymentSummary {
                payment_status: row.payment_status,
                payment_amount: row.payment_amount,
                total_paid: row.total_paid,
                total_refunded: row.total_refunded,
                balance_due: row.balance_due,
            },
            notes: row.notes,
            rejection_reason: row.rejection_reason,
            application_reviewed_at: row.application_reviewed_at,
            application_reviewed_by: row.application_reviewed_by,
            approval_date: row.approval_date,
            last_contact_date: row.last_contact_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ScoreRow {
    participant_id: Uuid,
    contestant_name: String,
    age_group: String,
    registered_at: chrono::NaiveDateTime,
    category: String,
    score: Decimal,
    notes: Option<String>,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        let query = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1"
        );

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    pub async fn exists_for(&self, user_id: Uuid, pageant_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM participants WHERE user_id = $1 AND pageant_id = $2)",
        )
        .bind(user_id)
        .bind(pageant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a participant with its category rows in one transaction. The
    /// (user, pageant) unique constraint is the last line of defense under
    /// concurrent registration; a violation maps to a distinct error.
    pub async fn create(
        &self,
        user_id: Uuid,
        pageant_id: Uuid,
        age_group: &str,
        payment_amount: Decimal,
        categories: &[String],
    ) -> Result<Participant> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO participants (user_id, pageant_id, age_group, payment_amount, balance_due)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(user_id)
            .bind(pageant_id)
            .bind(age_group)
            .bind(payment_amount)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.code().as_deref() == Some("23505")
                {
                    return StorageError::ConstraintViolation(
                        "User is already registered for this pageant".to_string(),
                    );
                }
                StorageError::from(e)
            })?;

        for (position, category) in categories.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO participant_categories (participant_id, category, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(participant.participant_id)
            .bind(category)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(participant)
    }

    pub async fn categories_for(&self, participant_id: Uuid) -> Result<Vec<ParticipantCategory>> {
        let entries = sqlx::query_as::<_, ParticipantCategory>(
            r#"
            SELECT participant_id, category, score, notes, position
            FROM participant_categories
            WHERE participant_id = $1
            ORDER BY position
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_applications_for_pageant(
        &self,
        pageant_id: Uuid,
    ) -> Result<Vec<ApplicationResponse>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT p.participant_id, p.pageant_id,
                   u.display_name AS contestant_name, u.email AS contestant_email,
                   p.status, p.age_group, p.payment_status, p.payment_amount,
                   p.total_paid, p.total_refunded, p.balance_due, p.notes,
                   p.rejection_reason, p.application_reviewed_at,
                   p.application_reviewed_by, p.approval_date,
                   p.last_contact_date, p.created_at
            FROM participants p
            JOIN users u ON u.user_id = p.user_id
            WHERE p.pageant_id = $1
            ORDER BY p.created_at ASC
            "#,
        )
        .bind(pageant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ApplicationResponse::from).collect())
    }

    /// Confirm an application. The status predicate in the WHERE clause
    /// makes the transition safe against a concurrent reviewer: zero rows
    /// updated means the application left `registered` in the meantime.
    pub async fn approve(
        &self,
        id: Uuid,
        reviewer: Uuid,
        notes: Option<&str>,
    ) -> Result<Participant> {
        let query = format!(
            r#"
            UPDATE participants
            SET status = 'confirmed',
                application_reviewed_at = now(),
                application_reviewed_by = $2,
                approval_date = now(),
                notes = COALESCE($3, notes)
            WHERE participant_id = $1 AND status = 'registered'
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(reviewer)
            .bind(notes)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| {
                StorageError::InvalidState(
                    "Only applications in 'registered' status can be approved".to_string(),
                )
            })?;

        Ok(participant)
    }

    /// Disqualify an application, optionally refunding a completed payment.
    /// Status change, ledger insert and payment-field update commit as one
    /// transaction so a crash cannot leave a disqualified participant with
    /// an unrefunded completed payment.
    pub async fn reject(
        &self,
        id: Uuid,
        reviewer: Uuid,
        rejection_reason: Option<&str>,
        notes: Option<&str>,
        refund_payment: bool,
    ) -> Result<(Participant, Option<Payment>)> {
        let mut tx = self.pool.begin().await?;

        let lock_query = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1 FOR UPDATE"
        );
        let current = sqlx::query_as::<_, Participant>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        let status = ParticipantStatus::parse(&current.status).ok_or_else(|| {
            StorageError::InvalidState(format!("Unknown participant status '{}'", current.status))
        })?;
        if !status.can_reject() {
            return Err(StorageError::InvalidState(
                "Application has already been rejected".to_string(),
            ));
        }

        let update_query = format!(
            r#"
            UPDATE participants
            SET status = 'disqualified',
                application_reviewed_at = now(),
                application_reviewed_by = $2,
                rejection_reason = $3,
                notes = COALESCE($4, notes)
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );
        let mut participant = sqlx::query_as::<_, Participant>(&update_query)
            .bind(id)
            .bind(reviewer)
            .bind(rejection_reason)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await?;

        let refund = if refund_payment
            && PaymentStatus::parse(&current.payment_status) == Some(PaymentStatus::Completed)
            && current.total_paid > Decimal::ZERO
        {
            let payment = PaymentRepository::insert_refund(&mut tx, &current, current.total_paid).await?;

            let refund_query = format!(
                r#"
                UPDATE participants
                SET payment_status = 'refunded',
                    total_refunded = total_paid,
                    balance_due = 0
                WHERE participant_id = $1
                RETURNING {PARTICIPANT_COLUMNS}
                "#
            );
            participant = sqlx::query_as::<_, Participant>(&refund_query)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

            Some(payment)
        } else {
            None
        };

        tx.commit().await?;

        Ok((participant, refund))
    }

    pub async fn set_withdrawn(&self, id: Uuid) -> Result<Participant> {
        let query = format!(
            r#"
            UPDATE participants
            SET status = 'withdrawn'
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Wholesale replacement of the category list with a recomputed fee.
    /// Existing scores are dropped with the old rows; balance keeps the
    /// ledger reconciled: balance = amount - (paid - refunded).
    pub async fn replace_categories(
        &self,
        id: Uuid,
        categories: &[String],
        payment_amount: Decimal,
    ) -> Result<Participant> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM participant_categories WHERE participant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, category) in categories.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO participant_categories (participant_id, category, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id)
            .bind(category)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            r#"
            UPDATE participants
            SET payment_amount = $2,
                balance_due = $2 - (total_paid - total_refunded)
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );
        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(payment_amount)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        Ok(participant)
    }

    /// Full removal, as opposed to the history-preserving withdrawal.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn update_notes(&self, id: Uuid, notes: Option<&str>) -> Result<Participant> {
        let query = format!(
            r#"
            UPDATE participants
            SET notes = $2
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Append a communication note and bump the last-contact marker. Notes
    /// are append-only; author and timestamp come from the server.
    pub async fn add_communication(
        &self,
        id: Uuid,
        note_type: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<CommunicationNote> {
        let mut tx = self.pool.begin().await?;

        let note = sqlx::query_as::<_, CommunicationNote>(
            r#"
            INSERT INTO communication_notes (participant_id, note_type, content, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING note_id, participant_id, note_type, content, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(note_type)
        .bind(content)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE participants SET last_contact_date = $2 WHERE participant_id = $1",
        )
        .bind(id)
        .bind(note.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(note)
    }

    /// Overwrite score and notes of the matching category entries in
    /// place. The whole batch commits as one transaction: either every
    /// entry lands or none does, so a failing entry cannot leave the
    /// participant half-scored.
    pub async fn update_scores(&self, id: Uuid, entries: &[CategoryScoreUpdate]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            let result = sqlx::query(
                r#"
                UPDATE participant_categories
                SET score = $3,
                    notes = COALESCE($4, notes)
                WHERE participant_id = $1 AND category = $2
                "#,
            )
            .bind(id)
            .bind(&entry.category)
            .bind(entry.score)
            .bind(entry.notes.as_deref())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StorageError::InvalidState(format!(
                    "Participant is not registered for category '{}'",
                    entry.category
                )));
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// All participants of a pageant with their category scores, folded for
    /// the ranking computation.
    pub async fn list_scored_for_pageant(&self, pageant_id: Uuid) -> Result<Vec<ContestantScores>> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT p.participant_id,
                   u.display_name AS contestant_name,
                   p.age_group,
                   p.created_at AS registered_at,
                   c.category,
                   c.score,
                   c.notes
            FROM participants p
            JOIN users u ON u.user_id = p.user_id
            JOIN participant_categories c ON c.participant_id = p.participant_id
            WHERE p.pageant_id = $1
            ORDER BY p.participant_id, c.position
            "#,
        )
        .bind(pageant_id)
        .fetch_all(self.pool)
        .await?;

        let mut contestants: Vec<ContestantScores> = Vec::new();
        for row in rows {
            let entry = CategoryEntry {
                category: row.category,
                score: row.score,
                notes: row.notes,
            };
            match contestants.last_mut() {
                Some(last) if last.participant_id == row.participant_id => {
                    last.categories.push(entry);
                }
                _ => contestants.push(ContestantScores {
                    participant_id: row.participant_id,
                    contestant_name: row.contestant_name,
                    age_group: row.age_group,
                    registered_at: row.registered_at,
                    categories: vec![entry],
                }),
            }
        }

        Ok(contestants)
    }
}
