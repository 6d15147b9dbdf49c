mod patient;
mod user;

pub use patient::{Patient, PatientCard, PatientField};
pub use user::{User, UserField};
