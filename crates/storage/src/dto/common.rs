use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Financial summary carried on every participant response. The ledger in
/// the payments table is the source of truth; these fields are the running
/// totals kept on the participant row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentSummary {
    pub payment_status: String,
    pub payment_amount: Decimal,
    pub total_paid: Decimal,
    pub total_refunded: Decimal,
    pub balance_due: Decimal,
}

/// Category entry as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryEntry {
    pub category: String,
    pub score: Decimal,
    pub notes: Option<String>,
}

impl From<crate::models::ParticipantCategory> for CategoryEntry {
    fn from(entry: crate::models::ParticipantCategory) -> Self {
        Self {
            category: entry.category,
            score: entry.score,
            notes: entry.notes,
        }
    }
}

/// Score must sit in [0.0, 10.0] with at most one decimal place.
pub fn validate_score(score: Decimal) -> Result<(), String> {
    if score < Decimal::ZERO || score > Decimal::from(10) {
        return Err(format!("score {} is outside the 0.0-10.0 range", score));
    }
    if score.round_dp(1) != score {
        return Err(format!("score {} has more than one decimal place", score));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn accepts_one_decimal_place() {
        assert!(validate_score(dec("0")).is_ok());
        assert!(validate_score(dec("7.5")).is_ok());
        assert!(validate_score(dec("10.0")).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(validate_score(dec("-0.1")).is_err());
        assert!(validate_score(dec("10.1")).is_err());
    }

    #[test]
    fn rejects_excess_precision() {
        assert!(validate_score(dec("7.55")).is_err());
        assert!(validate_score(dec("9.999")).is_err());
    }
}
