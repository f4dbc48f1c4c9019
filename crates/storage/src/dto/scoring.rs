use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::CategoryEntry;

/// One ranked contestant within an age group
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: u32,
    pub participant_id: Uuid,
    pub contestant_name: String,
    /// Average over categories with a score above zero, two decimal places.
    pub average_score: Decimal,
    pub scored_categories: u32,
    pub category_scores: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupResults {
    pub age_group: String,
    pub rankings: Vec<RankingEntry>,
}

/// Computed pageant results; derived on read, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageantResultsResponse {
    pub pageant_id: Uuid,
    pub age_groups: Vec<AgeGroupResults>,
}
