use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub date_of_birth: chrono::NaiveDate,
    #[serde(skip_serializing)]
    pub api_token: String,
    pub created_at: chrono::NaiveDateTime,
}
