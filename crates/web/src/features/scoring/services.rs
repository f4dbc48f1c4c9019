use sqlx::PgPool;
use storage::{
    dto::scoring::PageantResultsResponse, repository::authz::OwnershipPolicy, services::ranking,
};
use uuid::Uuid;

use crate::error::WebResult;

/// Computed rankings for one owned pageant. Results are derived from the
/// current score state on every call and never persisted.
pub async fn pageant_results(
    pool: &PgPool,
    actor: Uuid,
    pageant_id: Uuid,
) -> WebResult<PageantResultsResponse> {
    OwnershipPolicy::new(pool)
        .ensure_pageant_owner(pageant_id, actor)
        .await?;

    let results = ranking::pageant_results(pool, pageant_id).await?;

    Ok(results)
}
