pub mod applications;
pub mod participants;
pub mod scoring;
