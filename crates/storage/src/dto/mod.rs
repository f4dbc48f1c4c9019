pub mod application;
pub mod common;
pub mod participant;
pub mod scoring;
