use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed contestant age bands. The band is derived once at registration,
/// relative to January 1st of the pageant's competition year, and stays
/// fixed on the participant afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AgeGroup {
    FiveToEight,
    NineToTwelve,
    ThirteenToEighteen,
    NineteenToThirtyNine,
    FortyPlus,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FiveToEight => "5 - 8 Years",
            Self::NineToTwelve => "9 - 12 Years",
            Self::ThirteenToEighteen => "13 - 18 Years",
            Self::NineteenToThirtyNine => "19 - 39 Years",
            Self::FortyPlus => "40+ Years",
        }
    }

    pub fn from_age(age: u32) -> Option<Self> {
        match age {
            5..=8 => Some(Self::FiveToEight),
            9..=12 => Some(Self::NineToTwelve),
            13..=18 => Some(Self::ThirteenToEighteen),
            19..=39 => Some(Self::NineteenToThirtyNine),
            40.. => Some(Self::FortyPlus),
            _ => None,
        }
    }
}

/// Whole years of age as of January 1st of the competition year. A
/// contestant born after January 1st has not had their birthday yet on the
/// reference date, so the naive year subtraction is one too high for them.
pub fn age_on_jan_first(date_of_birth: NaiveDate, competition_year: i32) -> Option<u32> {
    let reference = NaiveDate::from_ymd_opt(competition_year, 1, 1)?;
    reference.years_since(date_of_birth)
}

/// Derive the age band for a contestant, or None when the age falls below
/// every band (or the date of birth is in the future).
pub fn derive_age_group(date_of_birth: NaiveDate, competition_year: i32) -> Option<AgeGroup> {
    age_on_jan_first(date_of_birth, competition_year).and_then(AgeGroup::from_age)
}

/// True when `label` is one of the pageant's configured age groups.
pub fn group_allowed(label: &str, configured: &[String]) -> bool {
    configured.iter().any(|g| g == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_from_jan_first_not_registration_date() {
        // Born exactly on Jan 1: birthday already reached on the reference
        // date, full year subtraction applies.
        assert_eq!(age_on_jan_first(dob(2010, 1, 1), 2025), Some(15));
        // Born one day later: one year less as of Jan 1.
        assert_eq!(age_on_jan_first(dob(2010, 1, 2), 2025), Some(14));
        assert_eq!(age_on_jan_first(dob(2010, 12, 31), 2025), Some(14));
    }

    #[test]
    fn future_birth_date_yields_none() {
        assert_eq!(age_on_jan_first(dob(2030, 6, 1), 2025), None);
    }

    #[test]
    fn bands_cover_five_and_up() {
        assert_eq!(AgeGroup::from_age(4), None);
        assert_eq!(AgeGroup::from_age(5), Some(AgeGroup::FiveToEight));
        assert_eq!(AgeGroup::from_age(8), Some(AgeGroup::FiveToEight));
        assert_eq!(AgeGroup::from_age(9), Some(AgeGroup::NineToTwelve));
        assert_eq!(AgeGroup::from_age(13), Some(AgeGroup::ThirteenToEighteen));
        assert_eq!(AgeGroup::from_age(18), Some(AgeGroup::ThirteenToEighteen));
        assert_eq!(AgeGroup::from_age(19), Some(AgeGroup::NineteenToThirtyNine));
        assert_eq!(AgeGroup::from_age(39), Some(AgeGroup::NineteenToThirtyNine));
        assert_eq!(AgeGroup::from_age(40), Some(AgeGroup::FortyPlus));
        assert_eq!(AgeGroup::from_age(95), Some(AgeGroup::FortyPlus));
    }

    #[test]
    fn fifteen_year_old_lands_in_teen_band() {
        let group = derive_age_group(dob(2010, 1, 1), 2025).unwrap();
        assert_eq!(group, AgeGroup::ThirteenToEighteen);
        assert_eq!(group.label(), "13 - 18 Years");
    }

    #[test]
    fn band_membership_check() {
        let configured = vec!["13 - 18 Years".to_string()];
        assert!(group_allowed("13 - 18 Years", &configured));
        assert!(!group_allowed("19 - 39 Years", &configured));
    }
}
