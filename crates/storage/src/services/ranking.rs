use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::CategoryEntry;
use crate::dto::scoring::{AgeGroupResults, PageantResultsResponse, RankingEntry};
use crate::error::Result;
use crate::repository::participant::ParticipantRepository;
use crate::services::age_group::AgeGroup;

/// One contestant's scores as input to the ranking computation.
#[derive(Debug, Clone)]
pub struct ContestantScores {
    pub participant_id: Uuid,
    pub contestant_name: String,
    pub age_group: String,
    pub registered_at: NaiveDateTime,
    pub categories: Vec<CategoryEntry>,
}

/// Average across categories with a score above zero, rounded to two
/// decimal places. A zero score counts as "not yet scored" and is excluded
/// from the denominator, so an all-zero contestant averages 0.
pub fn average_score(categories: &[CategoryEntry]) -> (Decimal, u32) {
    let scored: Vec<Decimal> = categories
        .iter()
        .map(|c| c.score)
        .filter(|s| *s > Decimal::ZERO)
        .collect();

    if scored.is_empty() {
        return (Decimal::ZERO, 0);
    }

    let sum: Decimal = scored.iter().copied().sum();
    let avg = (sum / Decimal::from(scored.len() as u64)).round_dp(2);
    (avg, scored.len() as u32)
}

/// Partition contestants by age group and rank each group by average score
/// descending. Ties break by registration time ascending, then ranks are
/// assigned sequentially 1..N.
pub fn compute_rankings(contestants: Vec<ContestantScores>) -> Vec<AgeGroupResults> {
    let mut by_group: HashMap<String, Vec<ContestantScores>> = HashMap::new();
    for contestant in contestants {
        by_group
            .entry(contestant.age_group.clone())
            .or_default()
            .push(contestant);
    }

    let band_order = [
        AgeGroup::FiveToEight,
        AgeGroup::NineToTwelve,
        AgeGroup::ThirteenToEighteen,
        AgeGroup::NineteenToThirtyNine,
        AgeGroup::FortyPlus,
    ];

    let mut results = Vec::new();
    for band in band_order {
        let Some(group) = by_group.remove(band.label()) else {
            continue;
        };
        results.push(rank_group(band.label().to_string(), group));
    }

    // Age groups outside the fixed bands should not exist; rank them anyway
    // in name order so nothing silently disappears from the results.
    let mut leftovers: Vec<(String, Vec<ContestantScores>)> = by_group.into_iter().collect();
    leftovers.sort_by(|a, b| a.0.cmp(&b.0));
    for (label, group) in leftovers {
        results.push(rank_group(label, group));
    }

    results
}

fn rank_group(age_group: String, contestants: Vec<ContestantScores>) -> AgeGroupResults {
    let mut scored: Vec<(Decimal, u32, ContestantScores)> = contestants
        .into_iter()
        .map(|c| {
            let (avg, count) = average_score(&c.categories);
            (avg, count, c)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.2.registered_at.cmp(&b.2.registered_at))
    });

    let rankings = scored
        .into_iter()
        .enumerate()
        .map(|(i, (avg, count, c))| RankingEntry {
            rank: (i + 1) as u32,
            participant_id: c.participant_id,
            contestant_name: c.contestant_name,
            average_score: avg,
            scored_categories: count,
            category_scores: c.categories,
        })
        .collect();

    AgeGroupResults {
        age_group,
        rankings,
    }
}

/// Compute the full results for a pageant from the current score state.
pub async fn pageant_results(pool: &PgPool, pageant_id: Uuid) -> Result<PageantResultsResponse> {
    let repo = ParticipantRepository::new(pool);
    let contestants = repo.list_scored_for_pageant(pageant_id).await?;

    Ok(PageantResultsResponse {
        pageant_id,
        age_groups: compute_rankings(contestants),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(category: &str, score: &str) -> CategoryEntry {
        CategoryEntry {
            category: category.to_string(),
            score: dec(score),
            notes: None,
        }
    }

    fn contestant(
        name: &str,
        age_group: &str,
        registered_secs: i64,
        categories: Vec<CategoryEntry>,
    ) -> ContestantScores {
        ContestantScores {
            participant_id: Uuid::new_v4(),
            contestant_name: name.to_string(),
            age_group: age_group.to_string(),
            registered_at: chrono::DateTime::from_timestamp(registered_secs, 0)
                .unwrap()
                .naive_utc(),
            categories,
        }
    }

    #[test]
    fn average_skips_unscored_categories() {
        let (avg, count) = average_score(&[
            entry("Talent", "8.0"),
            entry("Interview", "0"),
            entry("Evening Wear", "9.0"),
        ]);
        assert_eq!(avg, dec("8.5"));
        assert_eq!(count, 2);
    }

    #[test]
    fn all_zero_scores_average_zero() {
        let (avg, count) = average_score(&[entry("Talent", "0"), entry("Interview", "0")]);
        assert_eq!(avg, Decimal::ZERO);
        assert_eq!(count, 0);
    }

    #[test]
    fn average_rounds_to_two_places() {
        let (avg, _) = average_score(&[
            entry("A", "7.0"),
            entry("B", "8.0"),
            entry("C", "8.0"),
        ]);
        assert_eq!(avg, dec("7.67"));
    }

    #[test]
    fn groups_are_partitioned_and_ranked() {
        let results = compute_rankings(vec![
            contestant("teen-low", "13 - 18 Years", 0, vec![entry("Talent", "6.0")]),
            contestant("teen-high", "13 - 18 Years", 10, vec![entry("Talent", "9.0")]),
            contestant("adult", "19 - 39 Years", 0, vec![entry("Talent", "5.0")]),
        ]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].age_group, "13 - 18 Years");
        assert_eq!(results[0].rankings[0].contestant_name, "teen-high");
        assert_eq!(results[0].rankings[0].rank, 1);
        assert_eq!(results[0].rankings[1].contestant_name, "teen-low");
        assert_eq!(results[0].rankings[1].rank, 2);
        assert_eq!(results[1].age_group, "19 - 39 Years");
        assert_eq!(results[1].rankings[0].rank, 1);
    }

    #[test]
    fn ties_break_by_registration_order() {
        let results = compute_rankings(vec![
            contestant("later", "13 - 18 Years", 200, vec![entry("Talent", "8.0")]),
            contestant("earlier", "13 - 18 Years", 100, vec![entry("Talent", "8.0")]),
        ]);

        let rankings = &results[0].rankings;
        assert_eq!(rankings[0].contestant_name, "earlier");
        assert_eq!(rankings[1].contestant_name, "later");
    }

    #[test]
    fn unscored_contestant_ranks_last() {
        let results = compute_rankings(vec![
            contestant("unscored", "13 - 18 Years", 0, vec![entry("Talent", "0")]),
            contestant("scored", "13 - 18 Years", 10, vec![entry("Talent", "1.0")]),
        ]);

        let rankings = &results[0].rankings;
        assert_eq!(rankings[0].contestant_name, "scored");
        assert_eq!(rankings[1].contestant_name, "unscored");
        assert_eq!(rankings[1].average_score, Decimal::ZERO);
    }
}
