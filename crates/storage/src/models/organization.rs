use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Organization {
    pub organization_id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}
