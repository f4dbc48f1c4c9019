pub mod authz;
pub mod organization;
pub mod pageant;
pub mod participant;
pub mod payment;
pub mod user;
