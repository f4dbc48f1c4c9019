mod organization;
mod pageant;
mod participant;
mod payment;
mod status;
mod user;

pub use organization::Organization;
pub use pageant::Pageant;
pub use participant::{CommunicationNote, Participant, ParticipantCategory};
pub use payment::Payment;
pub use status::{PageantStatus, ParticipantStatus, PaymentStatus};
pub use user::User;
