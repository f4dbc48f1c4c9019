use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application::{ApplicationStats, PageantApplicationSummary};
use crate::error::{Result, StorageError};
use crate::models::Pageant;

/// Repository for Pageant reads. The participant lifecycle consults
/// pageants for their catalogs and gates but never mutates them.
pub struct PageantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PageantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Pageant> {
        let pageant = sqlx::query_as::<_, Pageant>(
            r#"
            SELECT pageant_id, organization_id, name, status, competition_year,
                   start_date, registration_deadline, max_participants, age_groups,
                   created_at
            FROM pageants
            WHERE pageant_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(pageant)
    }

    /// Category catalog for a pageant, sorted by name.
    pub async fn categories(&self, pageant_id: Uuid) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM pageant_categories
            WHERE pageant_id = $1
            ORDER BY name
            "#,
        )
        .bind(pageant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    pub async fn participant_count(&self, pageant_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participants WHERE pageant_id = $1",
        )
        .bind(pageant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Pageants of every organization owned by `owner_id`, with application
    /// counts for the review dashboard.
    pub async fn list_owned_summaries(&self, owner_id: Uuid) -> Result<Vec<PageantApplicationSummary>> {
        let summaries = sqlx::query_as::<_, PageantApplicationSummary>(
            r#"
            SELECT pg.pageant_id,
                   pg.name,
                   pg.status,
                   pg.start_date,
                   COUNT(p.participant_id) AS total_applications,
                   COUNT(p.participant_id) FILTER (WHERE p.status = 'registered') AS pending_applications
            FROM pageants pg
            JOIN organizations o ON o.organization_id = pg.organization_id
            LEFT JOIN participants p ON p.pageant_id = pg.pageant_id
            WHERE o.owner_id = $1
            GROUP BY pg.pageant_id, pg.name, pg.status, pg.start_date
            ORDER BY pg.start_date DESC, pg.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(summaries)
    }

    /// Application status totals across every pageant the owner organizes.
    pub async fn stats_for_owner(&self, owner_id: Uuid) -> Result<ApplicationStats> {
        let stats = sqlx::query_as::<_, ApplicationStats>(
            r#"
            SELECT COUNT(p.participant_id) AS total,
                   COUNT(p.participant_id) FILTER (WHERE p.status = 'registered') AS registered,
                   COUNT(p.participant_id) FILTER (WHERE p.status = 'confirmed') AS confirmed,
                   COUNT(p.participant_id) FILTER (WHERE p.status = 'disqualified') AS disqualified,
                   COUNT(p.participant_id) FILTER (WHERE p.status = 'withdrawn') AS withdrawn
            FROM participants p
            JOIN pageants pg ON pg.pageant_id = p.pageant_id
            JOIN organizations o ON o.organization_id = pg.organization_id
            WHERE o.owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }
}
