pub mod age_group;
pub mod pricing;
pub mod ranking;
