use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Pageant row. The lifecycle core consults pageants read-only: category
/// catalog, age-group catalog, registration deadline and status gate the
/// participant operations, but nothing here is ever mutated by them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pageant {
    pub pageant_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub status: String,
    pub competition_year: i32,
    pub start_date: chrono::NaiveDate,
    pub registration_deadline: chrono::NaiveDateTime,
    /// 0 means unlimited.
    pub max_participants: i32,
    pub age_groups: Vec<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl Pageant {
    pub fn has_started(&self, today: chrono::NaiveDate) -> bool {
        today >= self.start_date
    }
}
